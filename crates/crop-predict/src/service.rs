use std::sync::Arc;

use crop_core::errors::AlignmentError;
use crop_core::features::FeatureVector;
use crop_core::model::{CategoricalEncoder, Regressor};
use crop_core::prediction::PredictionResult;
use crop_core::record::Record;
use crop_core::schema::{CategoricalFieldSet, TrainingFeatureSchema};

use crate::align::FeatureAligner;
use crate::encoding::EncoderAdapter;
use crate::error::PredictError;

/// Predicts production and yield for one record at a time.
///
/// Built once from the loaded artifacts; `predict` takes `&self` and touches
/// nothing but the read-only model, so a single service can be shared across
/// threads.
#[derive(Clone)]
pub struct InferenceService {
    model: Arc<dyn Regressor>,
    adapter: EncoderAdapter,
    aligner: FeatureAligner,
}

impl std::fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceService")
            .field("adapter", &self.adapter)
            .field("aligner", &self.aligner)
            .finish_non_exhaustive()
    }
}

impl InferenceService {
    /// Wire the pipeline stages together.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError`] if the model's feature schema cannot be read
    /// or the encoder was fitted on fields other than `fields`.
    pub fn new(
        model: Arc<dyn Regressor>,
        encoder: Arc<dyn CategoricalEncoder>,
        fields: CategoricalFieldSet,
    ) -> Result<Self, AlignmentError> {
        let aligner = FeatureAligner::from_model(model.as_ref())?;
        let adapter = EncoderAdapter::new(fields, encoder)?;
        tracing::debug!(
            features = aligner.schema().len(),
            indicators = adapter.feature_names().len(),
            "inference service ready"
        );
        Ok(Self {
            model,
            adapter,
            aligner,
        })
    }

    /// Predict production for `record` and derive its yield.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Encoding`] if a categorical field is missing and
    /// [`PredictError::Alignment`] if the encoded record does not fit the
    /// training schema. No partial result is produced in either case.
    pub fn predict(&self, record: &Record) -> Result<PredictionResult, PredictError> {
        let span = tracing::debug_span!("predict", crop = %record.crop, area = record.area);
        let _guard = span.enter();

        let features = self.features(record)?;
        let production = self.model.predict(&features);
        if production < 0.0 {
            tracing::warn!(production, "model predicted negative production");
        }

        let result = PredictionResult::from_production(production, record.area);
        tracing::debug!(production, crop_yield = result.crop_yield, "prediction complete");
        Ok(result)
    }

    /// The schema-ordered feature vector `predict` hands to the model.
    ///
    /// # Errors
    ///
    /// Same as [`Self::predict`].
    pub fn features(&self, record: &Record) -> Result<FeatureVector, PredictError> {
        let encoded = self
            .adapter
            .encode(&record.categorical_values(self.adapter.fields()))?;

        self.aligner
            .align(&record.numeric_fields(), &encoded)
            .map_err(|error| {
                tracing::warn!(%error, "feature alignment failed");
                PredictError::from(error)
            })
    }

    #[must_use]
    pub const fn schema(&self) -> &TrainingFeatureSchema {
        self.aligner.schema()
    }

    #[must_use]
    pub const fn fields(&self) -> &CategoricalFieldSet {
        self.adapter.fields()
    }
}
