use anyhow::Context;
use crop_config::CropConfig;
use crop_model::ArtifactSet;
use crop_predict::{InferenceService, LookupTable};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: CropConfig,
    pub artifacts: ArtifactSet,
    pub service: InferenceService,
}

impl AppContext {
    /// Load every artifact and wire the inference service.
    ///
    /// Any artifact failure aborts startup; no command runs against a partial
    /// pipeline.
    pub fn init(config: CropConfig) -> anyhow::Result<Self> {
        let artifacts =
            ArtifactSet::load(&config.artifacts).context("failed to load prediction artifacts")?;
        let service = InferenceService::new(
            artifacts.regressor(),
            artifacts.encoder(),
            artifacts.fields().clone(),
        )
        .context("artifacts are incompatible with each other")?;

        Ok(Self {
            config,
            artifacts,
            service,
        })
    }

    /// Categorical values from the configured records file, or from the
    /// encoder's fitted categories when no file is configured.
    pub fn lookup_table(&self) -> anyhow::Result<LookupTable> {
        match self.config.data.records_file() {
            Some(path) => LookupTable::from_records_file(&path, self.artifacts.fields())
                .context("failed to build lookup table from records"),
            None => Ok(LookupTable::from_encoder(
                self.artifacts.encoder().as_ref(),
                self.artifacts.fields(),
            )),
        }
    }

    pub const fn decimals(&self) -> usize {
        self.config.general.decimals
    }
}

#[cfg(test)]
mod tests {
    use crop_config::CropConfig;
    use crop_model::testing::write_sample_artifacts;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::AppContext;

    fn config(dir: &TempDir) -> CropConfig {
        CropConfig {
            artifacts: write_sample_artifacts(dir.path()).unwrap(),
            ..CropConfig::default()
        }
    }

    #[test]
    fn init_wires_service_from_artifacts() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::init(config(&dir)).unwrap();

        assert_eq!(ctx.service.schema().len(), 6);
        assert_eq!(ctx.decimals(), 2);
    }

    #[test]
    fn init_fails_without_artifacts() {
        let dir = TempDir::new().unwrap();
        let mut config = CropConfig::default();
        config.artifacts.dir = dir.path().display().to_string();

        let err = AppContext::init(config).err().unwrap();

        assert!(format!("{err:#}").contains("model artifact not found"));
    }

    #[test]
    fn lookup_falls_back_to_encoder_categories() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::init(config(&dir)).unwrap();

        let table = ctx.lookup_table().unwrap();

        assert_eq!(
            table.values("Crop"),
            Some(&["Rice".to_string(), "Wheat".to_string()][..])
        );
    }

    #[test]
    fn lookup_prefers_configured_records() {
        let dir = TempDir::new().unwrap();
        let records = dir.path().join("crops.jsonl");
        std::fs::write(
            &records,
            "{\"State\":\"Bihar\",\"District\":\"Patna\",\"Crop\":\"Maize\",\"Season\":\"Kharif\",\"Area\":1}\n",
        )
        .unwrap();
        let mut config = config(&dir);
        config.data.records_path = records.display().to_string();
        let ctx = AppContext::init(config).unwrap();

        let table = ctx.lookup_table().unwrap();

        assert_eq!(table.values("Crop"), Some(&["Maize".to_string()][..]));
    }
}
