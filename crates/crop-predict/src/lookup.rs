//! Distinct categorical values offered to callers.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crop_core::model::CategoricalEncoder;
use crop_core::record::Record;
use crop_core::schema::CategoricalFieldSet;

use crate::error::LookupError;

/// Sorted distinct values per categorical field, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    values: BTreeMap<String, Vec<String>>,
}

impl LookupTable {
    /// Collect the values found in `records`. Blank values are skipped.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        fields: &CategoricalFieldSet,
    ) -> Self {
        let mut sets: BTreeMap<String, BTreeSet<String>> = fields
            .iter()
            .map(|field| (field.to_string(), BTreeSet::new()))
            .collect();

        for record in records {
            for (field, value) in record.categorical_values(fields) {
                sets.entry(field).or_default().insert(value);
            }
        }

        Self {
            values: sets
                .into_iter()
                .map(|(field, set)| (field, set.into_iter().collect()))
                .collect(),
        }
    }

    /// Read a JSON Lines file of records, one per line.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Read`] if the file cannot be opened or a line is
    /// not a record.
    pub fn from_records_file(
        path: impl AsRef<Path>,
        fields: &CategoricalFieldSet,
    ) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let read_error = |source| LookupError::Read {
            path: path.to_path_buf(),
            source,
        };

        let records: Vec<Record> = serde_jsonlines::json_lines(path)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;

        let table = Self::from_records(&records, fields);
        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "loaded lookup values from records"
        );
        Ok(table)
    }

    /// Use the categories the encoder was fitted on, verbatim.
    pub fn from_encoder(encoder: &dyn CategoricalEncoder, fields: &CategoricalFieldSet) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let set: BTreeSet<String> = encoder
                    .categories(field)
                    .unwrap_or_default()
                    .iter()
                    .filter(|value| !value.trim().is_empty())
                    .cloned()
                    .collect();
                (field.to_string(), set.into_iter().collect())
            })
            .collect();
        Self { values }
    }

    /// Values for `field`, `None` if the field is not categorical.
    #[must_use]
    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.values.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values
            .iter()
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }
}
