use crate::binding::{Class, ParameterSource};
use crate::errors::{error_codes, ContainerError};
use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use std::sync::Arc;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern"));

static COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern"));

static LEADING_CONSTRUCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*constructor\s*\(").expect("leading constructor pattern"));

static MEMBER_CONSTRUCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^constructor\s*\(").expect("member constructor pattern"));

static FN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfn\s+[A-Za-z_][A-Za-z0-9_]*\s*").expect("fn header pattern"));

static LIFETIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'[A-Za-z_][A-Za-z0-9_]*").expect("lifetime pattern"));

static CLASS_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*class\b").expect("class pattern"));

/// **PARAMETER NAME EXTRACTOR**
///
/// **PURPOSE**: Derives the ordered parameter names of one constructor.
/// **GUARANTEE**: Names are derived at most once; every later `parse` returns
/// the same `Arc` instance. A failed parse is not cached.
pub struct ParameterNameExtractor {
    class: Class,
    parsed_names: OnceCell<Arc<Vec<String>>>,
}

impl ParameterNameExtractor {
    pub fn new(class: Class) -> Self {
        Self {
            class,
            parsed_names: OnceCell::new(),
        }
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed_names.get().is_some()
    }

    pub fn parse(&self) -> Result<Arc<Vec<String>>, ContainerError> {
        self.parsed_names
            .get_or_try_init(|| {
                let names = match self.class.parameter_source() {
                    ParameterSource::Declared(names) => names.clone(),
                    ParameterSource::Signature(signature) => {
                        log::trace!("Parsing constructor signature of {}", self.class.name());
                        parse_parameter_names(signature).map_err(|message| {
                            ContainerError::configuration(
                                error_codes::MALFORMED_SIGNATURE,
                                format!(
                                    "Malformed signature for constructor {{{}}}: {}",
                                    self.class.name(),
                                    message
                                ),
                            )
                        })?
                    }
                };
                Ok(Arc::new(names))
            })
            .map(Arc::clone)
    }
}

/// **SIGNATURE PARSING**
///
/// Extracts plain identifier parameter names, in declared order, from a
/// constructor's textual declaration. Destructured, rest, defaulted and
/// receiver parameters are skipped.
///
/// **LOCATING THE LIST**:
/// - `class` text: the `constructor(` member of the class body, or none
/// - text starting with `constructor(`: that list
/// - Rust `fn name<..>(`: the list after the generic parameters
/// - anything else: the first `(`
pub fn parse_parameter_names(signature: &str) -> Result<Vec<String>, String> {
    let code = COMMENTS.replace_all(signature, " ");

    let open = match parameter_list_start(&code)? {
        Some(open) => open,
        None => return Ok(Vec::new()),
    };

    Ok(parameters(&code[open..])?
        .into_iter()
        .filter_map(parameter_name)
        .collect())
}

fn parameter_list_start(code: &str) -> Result<Option<usize>, String> {
    if CLASS_KEYWORD.is_match(code) {
        return Ok(class_constructor(code));
    }
    if let Some(found) = LEADING_CONSTRUCTOR.find(code) {
        return Ok(Some(found.end() - 1));
    }
    if let Some(header) = FN_HEADER.find(code) {
        let after_generics = skip_generics(code, header.end())?;
        return Ok(code[after_generics..]
            .find('(')
            .map(|offset| after_generics + offset));
    }
    Ok(code.find('('))
}

/// Offset of the `(` opening the `constructor` member declared directly in
/// the class body. Calls such as `this.constructor(x)` inside method bodies
/// sit deeper and are ignored.
fn class_constructor(code: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous = '\0';

    for (index, c) in code.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
                previous = c;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            'c' if depth == 1 && !is_member_char(previous) => {
                if let Some(found) = MEMBER_CONSTRUCTOR.find(&code[index..]) {
                    return Some(index + found.end() - 1);
                }
            }
            _ => {}
        }
        previous = c;
    }
    None
}

fn is_member_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

/// Offset just past the balanced `<..>` starting at `start`, or `start`
/// itself when no generic list follows.
fn skip_generics(code: &str, start: usize) -> Result<usize, String> {
    if !code[start..].starts_with('<') {
        return Ok(start);
    }

    let mut depth = 0usize;
    let mut previous = '\0';
    for (offset, c) in code[start..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' if previous == '-' || previous == '=' => {}
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + offset + 1);
                }
            }
            _ => {}
        }
        previous = c;
    }
    Err("unterminated generic parameter list".to_string())
}

/// Splits the parenthesised list at the start of `code` into its top-level
/// entries. `<` only opens a bracket inside a type annotation, so
/// comparisons in default values are plain text.
fn parameters(code: &str) -> Result<Vec<&str>, String> {
    let mut expected: Vec<char> = Vec::new();
    let mut parts = Vec::new();
    let mut start = 1;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous = '\0';
    let mut last_significant = '\0';
    let mut in_type = false;
    let mut has_default = false;

    for (index, c) in code.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
                previous = c;
                last_significant = c;
            }
            continue;
        }

        let top_level = expected.len() == 1;
        match c {
            '\'' if last_significant != '=' && is_lifetime(&code[index..]) => {}
            '"' | '\'' | '`' => quote = Some(c),
            '(' => expected.push(')'),
            '[' => expected.push(']'),
            '{' => expected.push('}'),
            '<' if in_type => expected.push('>'),
            '>' if previous == '-' || previous == '=' => {}
            '>' if expected.last() != Some(&'>') => {}
            ')' | ']' | '}' | '>' => match expected.pop() {
                Some(closer) if closer == c => {
                    if expected.is_empty() {
                        parts.push(&code[start..index]);
                        return Ok(parts
                            .into_iter()
                            .map(str::trim)
                            .filter(|part| !part.is_empty())
                            .collect());
                    }
                }
                Some(closer) => {
                    return Err(format!(
                        "expected '{}' but found '{}' at offset {}",
                        closer, c, index
                    ))
                }
                None => return Err(format!("unbalanced '{}' at offset {}", c, index)),
            },
            ',' if top_level => {
                parts.push(&code[start..index]);
                start = index + 1;
                in_type = false;
                has_default = false;
            }
            ':' if top_level && !has_default => in_type = true,
            '=' if top_level && !code[index + 1..].starts_with('>') => {
                in_type = false;
                has_default = true;
            }
            _ => {}
        }
        previous = c;
        if !c.is_whitespace() {
            last_significant = c;
        }
    }

    Err("unterminated parameter list".to_string())
}

fn is_lifetime(rest: &str) -> bool {
    LIFETIME
        .find(rest)
        .map_or(false, |found| !rest[found.end()..].starts_with('\''))
}

fn parameter_name(parameter: &str) -> Option<String> {
    let parameter = parameter.strip_prefix("mut ").unwrap_or(parameter).trim_start();
    let pattern = parameter.split(':').next().unwrap_or_default().trim();

    if pattern == "_" || pattern == "self" || !IDENTIFIER.is_match(pattern) {
        return None;
    }
    Some(pattern.to_string())
}
