//! # crop-config
//!
//! Layered configuration loading for cropcast using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CROPCAST_*` prefix, `__` as separator)
//! 2. Project-level `.cropcast/config.toml`
//! 3. User-level `~/.config/cropcast/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CROPCAST_ARTIFACTS__MODEL_PATH` -> `artifacts.model_path`,
//! `CROPCAST_DATA__RECORDS_PATH` -> `data.records_path`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use crop_config::CropConfig;
//!
//! let config = CropConfig::load_with_dotenv().expect("config");
//! println!("model: {}", config.artifacts.model_file().display());
//! ```

mod artifacts;
mod data;
mod error;
mod general;

pub use artifacts::ArtifactsConfig;
pub use data::DataConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest display precision accepted for `general.decimals`.
const MAX_DECIMALS: usize = 6;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CropConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CropConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse and
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is fine; every value has a default.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".cropcast/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CROPCAST_").split("__"))
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "general.decimals".to_string(),
                reason: format!(
                    "{} exceeds the maximum of {MAX_DECIMALS}",
                    self.general.decimals
                ),
            });
        }
        for (field, value) in [
            ("artifacts.model_path", &self.artifacts.model_path),
            ("artifacts.encoder_path", &self.artifacts.encoder_path),
            (
                "artifacts.categorical_columns_path",
                &self.artifacts.categorical_columns_path,
            ),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cropcast").join("config.toml"))
    }
}
