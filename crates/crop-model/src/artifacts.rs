use std::sync::Arc;

use crop_config::ArtifactsConfig;
use crop_core::model::{CategoricalEncoder, Regressor};
use crop_core::schema::CategoricalFieldSet;

use crate::booster::XgbRegressor;
use crate::columns::load_categorical_columns;
use crate::encoder::OneHotEncoder;
use crate::error::ArtifactError;

/// The three startup artifacts, loaded together.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    model: Arc<XgbRegressor>,
    encoder: Arc<OneHotEncoder>,
    fields: CategoricalFieldSet,
}

impl ArtifactSet {
    /// Load model, encoder, and categorical columns from the configured paths.
    ///
    /// Loading stops at the first failure; no partial set is ever returned.
    ///
    /// # Errors
    ///
    /// Returns the [`ArtifactError`] of the first artifact that fails to load.
    pub fn load(config: &ArtifactsConfig) -> Result<Self, ArtifactError> {
        let model_path = config.model_file();
        let model = XgbRegressor::load(&model_path)?;
        tracing::info!(
            path = %model_path.display(),
            trees = model.num_trees(),
            features = model.num_features(),
            "loaded model"
        );

        let encoder_path = config.encoder_file();
        let encoder = OneHotEncoder::load(&encoder_path)?;
        tracing::info!(
            path = %encoder_path.display(),
            fields = encoder.fields().len(),
            columns = encoder.width(),
            "loaded encoder"
        );

        let columns_path = config.categorical_columns_file();
        let fields = load_categorical_columns(&columns_path)?;
        tracing::info!(
            path = %columns_path.display(),
            fields = fields.len(),
            "loaded categorical columns"
        );

        Ok(Self {
            model: Arc::new(model),
            encoder: Arc::new(encoder),
            fields,
        })
    }

    #[must_use]
    pub fn regressor(&self) -> Arc<dyn Regressor> {
        self.model.clone()
    }

    #[must_use]
    pub fn encoder(&self) -> Arc<dyn CategoricalEncoder> {
        self.encoder.clone()
    }

    #[must_use]
    pub const fn fields(&self) -> &CategoricalFieldSet {
        &self.fields
    }

    /// The concrete model, for inspection beyond the [`Regressor`] trait.
    #[must_use]
    pub fn model(&self) -> &XgbRegressor {
        &self.model
    }
}
