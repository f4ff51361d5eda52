use crate::errors::{error_codes, ContainerError};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ResolverConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "WEAVE_MAX_RESOLUTION_DEPTH";

/// **RESOLVER CONFIGURATION**
///
/// **PURPOSE**: Runtime limits for the resolver.
/// **USAGE**: `ResolverConfig::default()` suits almost every object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// **MAXIMUM DEPTH** - In-flight builds allowed before a resolution is
    /// treated as a cycle
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ResolverConfig {
    /// **JSON CONFIGURATION** - Missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ContainerError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            ContainerError::configuration(
                error_codes::INVALID_CONFIG,
                format!("Invalid resolver configuration: {}", e),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// **ENVIRONMENT CONFIGURATION**
    ///
    /// Reads `WEAVE_MAX_RESOLUTION_DEPTH`; an unset variable keeps the default.
    pub fn from_env() -> Result<Self, ContainerError> {
        match std::env::var(MAX_DEPTH_ENV) {
            Ok(raw) => Self::from_depth_str(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_depth_str(raw: &str) -> Result<Self, ContainerError> {
        let max_depth = raw.trim().parse::<usize>().map_err(|e| {
            ContainerError::configuration(
                error_codes::INVALID_CONFIG,
                format!("{} must be a positive integer, got '{}': {}", MAX_DEPTH_ENV, raw, e),
            )
        })?;
        let config = Self { max_depth };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.max_depth == 0 {
            return Err(ContainerError::configuration(
                error_codes::INVALID_CONFIG,
                "max_depth must be at least 1",
            ));
        }
        Ok(())
    }
}
