pub mod entry;

pub use entry::{BindingEntry, Class, Factory, ParameterSource};
