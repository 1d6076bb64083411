//! Schema registry: the categorical field set and the training feature schema.
//!
//! Both are fixed once the artifacts are loaded and are cheap to clone, so the
//! encoder adapter and the aligner can each hold their own handle.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::errors::{AlignmentError, CoreError};
use crate::model::Regressor;
use crate::record::CATEGORICAL_FIELDS;

/// Ordered set of field names treated as categorical at training time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalFieldSet {
    fields: Arc<[String]>,
}

impl CategoricalFieldSet {
    /// Build a field set, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `fields` is empty, contains a blank
    /// name, or names a field twice.
    pub fn new(fields: Vec<String>) -> Result<Self, CoreError> {
        if fields.is_empty() {
            return Err(CoreError::Validation(
                "categorical field set is empty".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.trim().is_empty() {
                return Err(CoreError::Validation(
                    "categorical field set contains a blank field name".to_string(),
                ));
            }
            if !seen.insert(field.as_str()) {
                return Err(CoreError::Validation(format!(
                    "categorical field '{field}' is listed more than once"
                )));
            }
        }
        Ok(Self {
            fields: fields.into(),
        })
    }

    /// The four categorical fields of a [`Record`](crate::record::Record).
    #[must_use]
    pub fn standard() -> Self {
        Self {
            fields: CATEGORICAL_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    /// Same fields regardless of order.
    #[must_use]
    pub fn same_fields(&self, other: &[String]) -> bool {
        self.fields.len() == other.len() && other.iter().all(|f| self.contains(f))
    }
}

/// Ordered feature names the model was trained on.
///
/// The position of a name is the column index the model reads it from.
#[derive(Debug, Clone)]
pub struct TrainingFeatureSchema {
    names: Arc<[String]>,
    index: Arc<HashMap<String, usize>>,
}

impl TrainingFeatureSchema {
    /// Build a schema from an ordered list of feature names.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::EmptySchema`] for an empty list and
    /// [`AlignmentError::DuplicateFeature`] if a name repeats.
    pub fn new(names: Vec<String>) -> Result<Self, AlignmentError> {
        if names.is_empty() {
            return Err(AlignmentError::EmptySchema);
        }
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(AlignmentError::DuplicateFeature(name.clone()));
            }
        }
        Ok(Self {
            names: names.into(),
            index: Arc::new(index),
        })
    }

    /// Read the schema reported by a loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::SchemaUnavailable`] if the model carries no
    /// feature names, plus any error from [`Self::new`].
    pub fn from_model(model: &dyn Regressor) -> Result<Self, AlignmentError> {
        let names = model.feature_names().ok_or_else(|| {
            AlignmentError::SchemaUnavailable(
                "model artifact does not record its training feature names".to_string(),
            )
        })?;
        Self::new(names.to_vec())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index of `name`, if the model was trained on it.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl PartialEq for TrainingFeatureSchema {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for TrainingFeatureSchema {}
