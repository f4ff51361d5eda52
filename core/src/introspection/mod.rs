pub mod parser;

pub use parser::{parse_parameter_names, ParameterNameExtractor};
