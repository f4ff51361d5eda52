use crate::binding::Class;
use crate::dependencies::Parameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("RESOLUTION ERROR: {0}")]
    ResolutionFailed(Box<ResolutionFailed>),

    #[error("CONFIGURATION ERROR: {code} - {message}")]
    Configuration { code: String, message: String },

    #[error("TYPE MISMATCH ERROR: {code} - {message}")]
    TypeMismatch { code: String, message: String },
}

impl ContainerError {
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        ContainerError::Configuration {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        ContainerError::TypeMismatch {
            code: error_codes::TYPE_MISMATCH.to_string(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ContainerError::ResolutionFailed(failure) => failure.code(),
            ContainerError::Configuration { code, .. } | ContainerError::TypeMismatch { code, .. } => {
                code.as_str()
            }
        }
    }

    /// Returns the resolution failure payload, if this is one.
    pub fn as_resolution_failure(&self) -> Option<&ResolutionFailed> {
        match self {
            ContainerError::ResolutionFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ResolutionFailed> for ContainerError {
    fn from(failure: ResolutionFailed) -> Self {
        ContainerError::ResolutionFailed(Box::new(failure))
    }
}

/// **RESOLUTION FAILURE**
///
/// **PURPOSE**: Single failure kind raised by the resolver.
/// **GUARANTEE**: Carries a snapshot of the class stack and the parameters stack
/// taken at the moment the failure was detected, so the caller can see the full
/// chain of "who needed what".
pub struct ResolutionFailed {
    code: String,
    message: String,
    class_stack: Vec<Class>,
    parameters_stack: Vec<Parameters>,
}

impl ResolutionFailed {
    pub fn new(
        code: &str,
        message: impl Into<String>,
        class_stack: Vec<Class>,
        parameters_stack: Vec<Parameters>,
    ) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            class_stack,
            parameters_stack,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn class_stack(&self) -> &[Class] {
        &self.class_stack
    }

    pub fn parameters_stack(&self) -> &[Parameters] {
        &self.parameters_stack
    }

    /// **SERIALIZABLE REPORT** - Class names and parameter names per frame
    pub fn diagnostics(&self) -> ResolutionDiagnostics {
        ResolutionDiagnostics {
            code: self.code.clone(),
            message: self.message.clone(),
            class_stack: self
                .class_stack
                .iter()
                .map(|class| class.name().to_string())
                .collect(),
            parameters_stack: self
                .parameters_stack
                .iter()
                .map(|parameters| parameters.names().into_iter().map(String::from).collect())
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.diagnostics()).unwrap_or_default()
    }
}

impl fmt::Display for ResolutionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.message)
    }
}

impl fmt::Debug for ResolutionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionFailed")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("class_stack", &self.class_stack)
            .field("parameters_stack", &self.parameters_stack)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDiagnostics {
    pub code: String,
    pub message: String,
    pub class_stack: Vec<String>,
    pub parameters_stack: Vec<Vec<String>>,
}

/// **CONTAINER ERROR CODES**
pub mod error_codes {
    pub const UNBOUND_KEY: &str = "RUST_CORE_RESOLUTION_UNBOUND_KEY";
    pub const MISSING_PARAMETER: &str = "RUST_CORE_RESOLUTION_MISSING_PARAMETER";
    pub const UNMAPPED_CLASS: &str = "RUST_CORE_RESOLUTION_UNMAPPED_CLASS";
    pub const DEPTH_EXCEEDED: &str = "RUST_CORE_RESOLUTION_DEPTH_EXCEEDED";
    pub const TYPE_MISMATCH: &str = "RUST_CORE_RESOLUTION_TYPE_MISMATCH";
    pub const MALFORMED_SIGNATURE: &str = "RUST_CORE_CONFIGURATION_MALFORMED_SIGNATURE";
    pub const INVALID_CONFIG: &str = "RUST_CORE_CONFIGURATION_INVALID_CONFIG";
}
