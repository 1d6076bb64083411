//! Fitted one-hot encoder.
//!
//! The artifact records what a fitted one-hot encoder learned: the input field
//! names (`feature_names_in`) and, per field, the categories observed during
//! fitting (`categories`). Output columns are named `{field}_{category}` and
//! grouped by field in fit order.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crop_core::model::CategoricalEncoder;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ArtifactError, ArtifactKind, EncoderError};

#[derive(Debug, Deserialize)]
struct EncoderDocument {
    feature_names_in: Vec<String>,
    categories: Vec<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    fields: Vec<String>,
    categories: Vec<Vec<String>>,
    /// Per field: category -> position within the field's block.
    lookup: Vec<HashMap<String, usize>>,
    /// Per field: first output column of the field's block.
    offsets: Vec<usize>,
    width: usize,
}

impl OneHotEncoder {
    /// Build an encoder from fitted state.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError`] if there are no fields, the field and category
    /// lists differ in length, a field repeats, a field has no categories, or a
    /// category repeats within a field.
    pub fn new(fields: Vec<String>, categories: Vec<Vec<String>>) -> Result<Self, EncoderError> {
        if fields.is_empty() {
            return Err(EncoderError::NoFields);
        }
        if fields.len() != categories.len() {
            return Err(EncoderError::LengthMismatch {
                fields: fields.len(),
                categories: categories.len(),
            });
        }

        let mut seen_fields = HashSet::with_capacity(fields.len());
        let mut lookup = Vec::with_capacity(fields.len());
        let mut offsets = Vec::with_capacity(fields.len());
        let mut width = 0;

        for (field, field_categories) in fields.iter().zip(&categories) {
            if !seen_fields.insert(field.as_str()) {
                return Err(EncoderError::DuplicateField(field.clone()));
            }
            if field_categories.is_empty() {
                return Err(EncoderError::NoCategories(field.clone()));
            }
            let mut positions = HashMap::with_capacity(field_categories.len());
            for (position, category) in field_categories.iter().enumerate() {
                if positions.insert(category.clone(), position).is_some() {
                    return Err(EncoderError::DuplicateCategory {
                        field: field.clone(),
                        category: category.clone(),
                    });
                }
            }
            offsets.push(width);
            width += field_categories.len();
            lookup.push(positions);
        }

        Ok(Self {
            fields,
            categories,
            lookup,
            offsets,
            width,
        })
    }

    /// Load a fitted encoder artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Missing`] / [`ArtifactError::Unreadable`] for I/O
    /// failures and [`ArtifactError::Malformed`] for invalid contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let malformed = |reason: String| ArtifactError::Malformed {
            kind: ArtifactKind::Encoder,
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path)
            .map_err(|e| ArtifactError::from_io(ArtifactKind::Encoder, path.to_path_buf(), e))?;
        let document: EncoderDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| malformed(e.to_string()))?;

        Self::from_document(document).map_err(|e| malformed(e.to_string()))
    }

    /// Parse an encoder from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::Parse`] if the JSON is not an encoder document,
    /// plus any error from [`Self::new`].
    pub fn from_json_str(json: &str) -> Result<Self, EncoderError> {
        let document: EncoderDocument =
            serde_json::from_str(json).map_err(|e| EncoderError::Parse(e.to_string()))?;
        Self::from_document(document)
    }

    fn from_document(document: EncoderDocument) -> Result<Self, EncoderError> {
        let fields = document.feature_names_in;
        if fields.len() != document.categories.len() {
            return Err(EncoderError::LengthMismatch {
                fields: fields.len(),
                categories: document.categories.len(),
            });
        }
        let categories = fields
            .iter()
            .zip(&document.categories)
            .map(|(field, values)| {
                values
                    .iter()
                    .map(|value| category_label(field, value))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(fields, categories)
    }

    /// Number of output columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

/// Categories are stored as JSON scalars; numbers and booleans use their JSON text.
fn category_label(field: &str, value: &Value) -> Result<String, EncoderError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(EncoderError::InvalidCategory {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn fields(&self) -> &[String] {
        &self.fields
    }

    fn categories(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .position(|f| f == field)
            .map(|index| self.categories[index].as_slice())
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.fields
            .iter()
            .zip(&self.categories)
            .flat_map(|(field, categories)| {
                categories
                    .iter()
                    .map(move |category| format!("{field}_{category}"))
            })
            .collect()
    }

    fn transform(&self, values: &[&str]) -> Vec<f64> {
        let mut row = vec![0.0; self.width];
        for ((positions, offset), value) in self.lookup.iter().zip(&self.offsets).zip(values) {
            if let Some(position) = positions.get(*value) {
                row[offset + position] = 1.0;
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SAMPLE_ENCODER_JSON;
    use pretty_assertions::assert_eq;

    fn sample() -> OneHotEncoder {
        OneHotEncoder::from_json_str(SAMPLE_ENCODER_JSON).expect("sample encoder parses")
    }

    #[test]
    fn feature_names_follow_field_then_category_order() {
        assert_eq!(
            sample().feature_names_out(),
            vec![
                "State_Punjab",
                "State_X",
                "District_Ludhiana",
                "District_Y",
                "Crop_Rice",
                "Crop_Wheat",
                "Season_Kharif",
                "Season_Rabi",
            ]
        );
    }

    #[test]
    fn transform_sets_one_indicator_per_field() {
        let row = sample().transform(&["X", "Y", "Wheat", "Kharif"]);
        assert_eq!(row, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn unseen_value_zeroes_its_field_only() {
        let row = sample().transform(&["X", "Y", "Quinoa", "Kharif"]);
        assert_eq!(row, vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn categories_lookup_by_field() {
        let encoder = sample();
        assert_eq!(
            encoder.categories("Crop"),
            Some(&["Rice".to_string(), "Wheat".to_string()][..])
        );
        assert_eq!(encoder.categories("Region"), None);
        assert_eq!(encoder.width(), 8);
    }

    #[test]
    fn numeric_categories_use_json_text() {
        let encoder = OneHotEncoder::from_json_str(
            r#"{"feature_names_in": ["Crop_Year"], "categories": [[1997, 1998]]}"#,
        )
        .expect("numeric categories parse");
        assert_eq!(
            encoder.feature_names_out(),
            vec!["Crop_Year_1997", "Crop_Year_1998"]
        );
        assert_eq!(encoder.transform(&["1998"]), vec![0.0, 1.0]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = OneHotEncoder::new(
            vec!["State".into(), "Crop".into()],
            vec![vec!["X".into()]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EncoderError::LengthMismatch {
                fields: 2,
                categories: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_categories() {
        let err = OneHotEncoder::new(
            vec!["Crop".into()],
            vec![vec!["Rice".into(), "Rice".into()]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EncoderError::DuplicateCategory {
                field: "Crop".into(),
                category: "Rice".into()
            }
        );
    }

    #[test]
    fn rejects_empty_category_list() {
        let err = OneHotEncoder::new(vec!["Crop".into()], vec![vec![]]).unwrap_err();
        assert_eq!(err, EncoderError::NoCategories("Crop".into()));
    }

    #[test]
    fn rejects_nested_category_values() {
        let err = OneHotEncoder::from_json_str(
            r#"{"feature_names_in": ["Crop"], "categories": [[["Rice"]]]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EncoderError::InvalidCategory { .. }));
    }
}
