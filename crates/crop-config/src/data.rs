//! Data source for the categorical lookup tables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataConfig {
    /// JSONL file with one record per line. Empty means "use the encoder's categories".
    #[serde(default)]
    pub records_path: String,
}

impl DataConfig {
    pub fn is_configured(&self) -> bool {
        !self.records_path.is_empty()
    }

    /// The records file, if one is configured.
    #[must_use]
    pub fn records_file(&self) -> Option<PathBuf> {
        self.is_configured()
            .then(|| PathBuf::from(&self.records_path))
    }
}
