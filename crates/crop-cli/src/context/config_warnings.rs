use crop_config::{ArtifactsConfig, CropConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &CropConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &CropConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if config.artifacts == ArtifactsConfig::default()
        && has_env_prefix(&env_keys, "CROPCAST_ARTIFACTS")
    {
        warnings.push(
            "Artifact paths appear default while CROPCAST_ARTIFACTS* env vars exist. Use double underscores (example: CROPCAST_ARTIFACTS__MODEL_PATH)."
                .to_string(),
        );
    }

    if !config.data.is_configured() && has_env_prefix(&env_keys, "CROPCAST_DATA") {
        warnings.push(
            "Data source appears unset while CROPCAST_DATA* env vars exist. Use double underscores (example: CROPCAST_DATA__RECORDS_PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use crop_config::CropConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = CropConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                (
                    "CROPCAST_ARTIFACTS_MODEL_PATH".to_string(),
                    "m.json".to_string(),
                ),
                (
                    "CROPCAST_DATA_RECORDS_PATH".to_string(),
                    "crops.jsonl".to_string(),
                ),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let mut config = CropConfig::default();
        config.artifacts.model_path = "m.json".to_string();
        config.data.records_path = "crops.jsonl".to_string();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                (
                    "CROPCAST_ARTIFACTS__MODEL_PATH".to_string(),
                    "m.json".to_string(),
                ),
                (
                    "CROPCAST_DATA__RECORDS_PATH".to_string(),
                    "crops.jsonl".to_string(),
                ),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn ignores_unrelated_env() {
        let warnings = collect_unconfigured_warnings(
            &CropConfig::default(),
            vec![("CROPCAST_LOG".to_string(), "debug".to_string())],
        );
        assert!(warnings.is_empty());
    }
}
