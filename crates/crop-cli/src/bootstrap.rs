use anyhow::Context;
use crop_config::CropConfig;

use crate::cli::GlobalFlags;

/// Load configuration (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CropConfig> {
    let mut config = CropConfig::load_with_dotenv().context("failed to load cropcast config")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut CropConfig, flags: &GlobalFlags) {
    if let Some(dir) = &flags.artifacts_dir {
        config.artifacts.dir.clone_from(dir);
    }
}

#[cfg(test)]
mod tests {
    use crop_config::CropConfig;
    use pretty_assertions::assert_eq;

    use super::apply_overrides;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(artifacts_dir: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Text,
            quiet: false,
            verbose: false,
            artifacts_dir: artifacts_dir.map(String::from),
        }
    }

    #[test]
    fn artifacts_dir_flag_overrides_config() {
        let mut config = CropConfig::default();
        config.artifacts.dir = "/etc/cropcast".to_string();

        apply_overrides(&mut config, &flags(Some("/srv/models")));

        assert_eq!(config.artifacts.dir, "/srv/models");
        assert_eq!(
            config.artifacts.model_file(),
            std::path::PathBuf::from("/srv/models/model.json")
        );
    }

    #[test]
    fn absent_flag_keeps_config() {
        let mut config = CropConfig::default();
        config.artifacts.dir = "/etc/cropcast".to_string();

        apply_overrides(&mut config, &flags(None));

        assert_eq!(config.artifacts.dir, "/etc/cropcast");
    }
}
