//! Locations of the pre-fitted artifacts loaded at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_model_path() -> String {
    "model.json".to_string()
}

fn default_encoder_path() -> String {
    "onehotencoder.json".to_string()
}

fn default_categorical_columns_path() -> String {
    "categorical_columns.json".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArtifactsConfig {
    /// Base directory for relative artifact paths. Empty means the working directory.
    #[serde(default)]
    pub dir: String,

    /// Trained model in XGBoost JSON format.
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Fitted one-hot encoder.
    #[serde(default = "default_encoder_path")]
    pub encoder_path: String,

    /// JSON array of the categorical field names used at training time.
    #[serde(default = "default_categorical_columns_path")]
    pub categorical_columns_path: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            model_path: default_model_path(),
            encoder_path: default_encoder_path(),
            categorical_columns_path: default_categorical_columns_path(),
        }
    }
}

impl ArtifactsConfig {
    #[must_use]
    pub fn model_file(&self) -> PathBuf {
        self.resolve(&self.model_path)
    }

    #[must_use]
    pub fn encoder_file(&self) -> PathBuf {
        self.resolve(&self.encoder_path)
    }

    #[must_use]
    pub fn categorical_columns_file(&self) -> PathBuf {
        self.resolve(&self.categorical_columns_path)
    }

    /// Absolute paths are kept; relative paths are joined onto `dir`.
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() || self.dir.is_empty() {
            path.to_path_buf()
        } else {
            Path::new(&self.dir).join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_resolve_against_working_directory() {
        let config = ArtifactsConfig::default();
        assert_eq!(config.model_file(), PathBuf::from("model.json"));
        assert_eq!(config.encoder_file(), PathBuf::from("onehotencoder.json"));
        assert_eq!(
            config.categorical_columns_file(),
            PathBuf::from("categorical_columns.json")
        );
    }

    #[test]
    fn relative_paths_join_base_dir() {
        let config = ArtifactsConfig {
            dir: "artifacts".to_string(),
            ..ArtifactsConfig::default()
        };
        assert_eq!(config.model_file(), PathBuf::from("artifacts/model.json"));
    }

    #[test]
    fn absolute_paths_ignore_base_dir() {
        let absolute = std::env::temp_dir().join("model.json");
        let config = ArtifactsConfig {
            dir: "artifacts".to_string(),
            model_path: absolute.display().to_string(),
            ..ArtifactsConfig::default()
        };
        assert_eq!(config.model_file(), absolute);
    }
}
