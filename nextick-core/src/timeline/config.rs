//! Runtime configuration.

use serde::{Deserialize, Serialize};

use super::Tick;

/// Errors from loading or validating a [`RuntimeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed into a config.
    #[error("invalid runtime config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The clock would start too close to the end of the tick range.
    #[error("initial tick {tick} is past the maximum initial tick {max}")]
    InitialTickTooLarge { tick: Tick, max: Tick },
}

/// Settings for a new [`Runtime`](super::Runtime).
///
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// The tick the clock starts at. At most [`Tick::MAX_INITIAL`].
    pub initial_tick: Tick,
    /// Number of live-thunk entries to pre-allocate in the registry.
    pub registry_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            initial_tick: Tick::ZERO,
            registry_capacity: 64,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that a runtime built from this config can always advance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_tick > Tick::MAX_INITIAL {
            return Err(ConfigError::InitialTickTooLarge {
                tick: self.initial_tick,
                max: Tick::MAX_INITIAL,
            });
        }
        Ok(())
    }
}
