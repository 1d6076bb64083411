//! Named features and schema-ordered feature vectors.

use std::collections::BTreeMap;

use crate::schema::TrainingFeatureSchema;

/// Feature name to value, as produced by the encoder or taken from a record.
pub type NamedFeatures = BTreeMap<String, f64>;

/// Feature values laid out exactly as a [`TrainingFeatureSchema`] orders them.
///
/// A vector can only be created from a schema, so its names, order, and length
/// always equal the schema's.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: TrainingFeatureSchema,
    values: Vec<f64>,
}

impl FeatureVector {
    /// All-zero vector for `schema`.
    #[must_use]
    pub fn zeros(schema: &TrainingFeatureSchema) -> Self {
        Self {
            schema: schema.clone(),
            values: vec![0.0; schema.len()],
        }
    }

    /// Set the value of a schema feature. Returns `false` if the schema does not
    /// contain `name`, leaving the vector unchanged.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.schema.position(name) {
            Some(position) => {
                self.values[position] = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.schema.position(name).map(|position| self.values[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature names in model column order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        self.schema.names()
    }

    /// Values in model column order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub const fn schema(&self) -> &TrainingFeatureSchema {
        &self.schema
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
