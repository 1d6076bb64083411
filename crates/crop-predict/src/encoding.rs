use std::collections::BTreeMap;
use std::sync::Arc;

use crop_core::errors::{AlignmentError, EncodingError};
use crop_core::features::NamedFeatures;
use crop_core::model::CategoricalEncoder;
use crop_core::schema::CategoricalFieldSet;

/// Turns categorical values into named indicator features using the fitted encoder.
#[derive(Clone)]
pub struct EncoderAdapter {
    fields: CategoricalFieldSet,
    encoder: Arc<dyn CategoricalEncoder>,
    feature_names: Arc<[String]>,
}

impl std::fmt::Debug for EncoderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderAdapter")
            .field("fields", &self.fields)
            .field("features", &self.feature_names.len())
            .finish_non_exhaustive()
    }
}

impl EncoderAdapter {
    /// Pair a field set with the encoder fitted on it.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::FieldMismatch`] if the encoder was fitted on a
    /// different set of fields.
    pub fn new(
        fields: CategoricalFieldSet,
        encoder: Arc<dyn CategoricalEncoder>,
    ) -> Result<Self, AlignmentError> {
        if !fields.same_fields(encoder.fields()) {
            return Err(AlignmentError::FieldMismatch {
                encoder: encoder.fields().to_vec(),
                expected: fields.as_slice().to_vec(),
            });
        }
        let feature_names = encoder.feature_names_out().into();
        Ok(Self {
            fields,
            encoder,
            feature_names,
        })
    }

    /// Encode one record's categorical values.
    ///
    /// Keys outside the field set are ignored. A value the encoder never saw
    /// yields zeros for its field.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::MissingField`] for the first field of the set
    /// that is absent or blank.
    pub fn encode(&self, values: &BTreeMap<String, String>) -> Result<NamedFeatures, EncodingError> {
        let ignored: Vec<&str> = values
            .keys()
            .filter(|key| !self.fields.contains(key))
            .map(String::as_str)
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(fields = ?ignored, "ignoring non-categorical fields");
        }

        if let Some(missing) = self.fields.iter().find(|field| {
            values
                .get(*field)
                .is_none_or(|value| value.trim().is_empty())
        }) {
            return Err(EncodingError::MissingField {
                field: missing.to_string(),
            });
        }

        // The encoder expects its own fit order, which may differ from the set's.
        let row: Vec<&str> = self
            .encoder
            .fields()
            .iter()
            .map(|field| values.get(field).map_or("", String::as_str))
            .collect();

        let encoded = self.encoder.transform(&row);
        Ok(self.feature_names.iter().cloned().zip(encoded).collect())
    }

    #[must_use]
    pub const fn fields(&self) -> &CategoricalFieldSet {
        &self.fields
    }

    /// Indicator feature names in encoder output order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
