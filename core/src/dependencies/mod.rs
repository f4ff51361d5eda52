pub mod resolver;
pub mod types;

pub use resolver::Resolver;
pub use types::{Arguments, Parameters};
