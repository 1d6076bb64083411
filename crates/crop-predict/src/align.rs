use crop_core::errors::AlignmentError;
use crop_core::features::{FeatureVector, NamedFeatures};
use crop_core::model::Regressor;
use crop_core::schema::TrainingFeatureSchema;

/// Lays candidate features out in the exact order the model was trained on.
///
/// Schema features absent from the candidate are zero-filled and candidate
/// features outside the schema are dropped, so the output always has the
/// schema's names, order, and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureAligner {
    schema: TrainingFeatureSchema,
}

impl FeatureAligner {
    #[must_use]
    pub const fn new(schema: TrainingFeatureSchema) -> Self {
        Self { schema }
    }

    /// Build an aligner from the schema recorded in a loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::SchemaUnavailable`] if the model does not
    /// report its feature names, or a schema construction error if they are
    /// empty or repeat.
    pub fn from_model(model: &dyn Regressor) -> Result<Self, AlignmentError> {
        TrainingFeatureSchema::from_model(model).map(Self::new)
    }

    #[must_use]
    pub const fn schema(&self) -> &TrainingFeatureSchema {
        &self.schema
    }

    /// Merge numeric and encoded features into a schema-ordered vector.
    ///
    /// On a name present in both inputs the encoded value wins.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::NoOverlap`] if not a single candidate feature
    /// occurs in the schema.
    pub fn align(
        &self,
        numeric: &NamedFeatures,
        encoded: &NamedFeatures,
    ) -> Result<FeatureVector, AlignmentError> {
        let mut vector = FeatureVector::zeros(&self.schema);
        let mut dropped = Vec::new();
        let mut matched = 0_usize;

        for (name, value) in numeric.iter().chain(encoded) {
            if vector.set(name, *value) {
                matched += 1;
            } else {
                dropped.push(name.as_str());
            }
        }

        if matched == 0 {
            return Err(AlignmentError::NoOverlap {
                candidates: numeric.len() + encoded.len(),
                expected: self.schema.len(),
            });
        }

        if !dropped.is_empty() {
            tracing::debug!(features = ?dropped, "dropping features outside the training schema");
        }
        let zero_filled: Vec<&str> = self
            .schema
            .names()
            .iter()
            .filter(|name| !numeric.contains_key(*name) && !encoded.contains_key(*name))
            .map(String::as_str)
            .collect();
        if !zero_filled.is_empty() {
            tracing::debug!(features = ?zero_filled, "zero-filling features absent from the record");
        }

        Ok(vector)
    }
}
