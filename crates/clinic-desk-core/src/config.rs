//! Search tunables.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quiet period after the last keystroke before a lookup fires.
pub const DEBOUNCE_MS: u64 = 300;

/// Shorter normalized queries never reach a lookup. Configuration may raise
/// this floor but never lower it.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Medication suggestions are capped; condition suggestions are not.
pub const DEFAULT_MEDICATION_LIMIT: usize = 10;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings shared by every search field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub min_query_chars: usize,
    /// `None` lifts the cap
    pub medication_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            medication_limit: Some(DEFAULT_MEDICATION_LIMIT),
        }
    }
}

impl SearchConfig {
    /// Parse from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_query_chars < DEFAULT_MIN_QUERY_CHARS {
            return Err(ConfigError::Invalid {
                field: "min_query_chars",
                reason: format!("must be at least {}", DEFAULT_MIN_QUERY_CHARS),
            });
        }
        if self.medication_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "medication_limit",
                reason: "use null for no limit".into(),
            });
        }
        Ok(())
    }

    /// Debounce window; fixed, not configurable.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(DEBOUNCE_MS)
    }
}
