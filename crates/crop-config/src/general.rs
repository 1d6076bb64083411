//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "warn".to_string()
}

/// Default display precision.
const fn default_decimals() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Tracing filter used when `CROPCAST_LOG` is unset and no verbosity flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Decimal places for displayed predictions.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            decimals: default_decimals(),
        }
    }
}
