pub use crate::binding::{BindingEntry, Class, Factory, ParameterSource};
pub use crate::config::ResolverConfig;
pub use crate::container::Container;
pub use crate::dependencies::{Arguments, Parameters, Resolver};
pub use crate::errors::{error_codes, ContainerError, ResolutionDiagnostics, ResolutionFailed};
pub use crate::events::{RebindEventObserver, RebindEventSource};
pub use crate::introspection::{parse_parameter_names, ParameterNameExtractor};
pub use crate::manager::ContainerManager;
pub use crate::registry::{parameter_keys, Extender, ParameterKeys};
pub use crate::types::{shared, Key, Value};
