//! The agricultural record accepted at the input boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::schema::CategoricalFieldSet;

/// Wire name of the state field.
pub const STATE: &str = "State";
/// Wire name of the district field.
pub const DISTRICT: &str = "District";
/// Wire name of the crop field.
pub const CROP: &str = "Crop";
/// Wire name of the season field.
pub const SEASON: &str = "Season";
/// Wire name of the cultivated area field (hectares).
pub const AREA: &str = "Area";

/// Categorical fields of a [`Record`], in training order.
pub const CATEGORICAL_FIELDS: [&str; 4] = [STATE, DISTRICT, CROP, SEASON];

/// One observation submitted for prediction.
///
/// Categorical fields default to the empty string when absent from the wire
/// format; blank values are reported as missing by the encoder rather than
/// rejected here, so a JSON record without `District` still deserializes and
/// fails later with an encoding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "District", default)]
    pub district: String,
    #[serde(rename = "Crop", default)]
    pub crop: String,
    #[serde(rename = "Season", default)]
    pub season: String,
    /// Cultivated area in hectares. Defaults to 0 when unset.
    #[serde(rename = "Area", default)]
    pub area: f64,
}

impl Record {
    pub fn new(
        state: impl Into<String>,
        district: impl Into<String>,
        crop: impl Into<String>,
        season: impl Into<String>,
        area: f64,
    ) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
            crop: crop.into(),
            season: season.into(),
            area,
        }
    }

    /// Check the input-boundary constraints on the numeric field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `area` is negative or not finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.area.is_finite() {
            return Err(CoreError::Validation(format!(
                "{AREA} must be a finite number, got {}",
                self.area
            )));
        }
        if self.area < 0.0 {
            return Err(CoreError::Validation(format!(
                "{AREA} must be non-negative, got {}",
                self.area
            )));
        }
        Ok(())
    }

    /// Look up a categorical value by its wire name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            STATE => Some(&self.state),
            DISTRICT => Some(&self.district),
            CROP => Some(&self.crop),
            SEASON => Some(&self.season),
            _ => None,
        }
    }

    /// Numeric passthrough fields keyed by wire name.
    #[must_use]
    pub fn numeric_fields(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([(AREA.to_string(), self.area)])
    }

    /// Categorical values for the fields in `fields`.
    ///
    /// Fields this record does not carry, and blank values, are left out of
    /// the mapping. Other values are kept verbatim so they match fitted
    /// categories exactly.
    #[must_use]
    pub fn categorical_values(&self, fields: &CategoricalFieldSet) -> BTreeMap<String, String> {
        fields
            .iter()
            .filter_map(|field| {
                let value = self.get(field)?;
                (!value.trim().is_empty()).then(|| (field.to_string(), value.to_string()))
            })
            .collect()
    }
}
