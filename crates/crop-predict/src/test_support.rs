use std::sync::Arc;

use crop_core::features::FeatureVector;
use crop_core::model::Regressor;
use crop_core::schema::CategoricalFieldSet;
use crop_model::OneHotEncoder;
use crop_model::testing::SAMPLE_ENCODER_JSON;

/// Training schema matching the sample encoder plus `Area` and one crop the
/// encoder never saw.
pub const SCHEMA: [&str; 6] = [
    "Area",
    "Crop_Rice",
    "Crop_Wheat",
    "Crop_Maize",
    "Season_Kharif",
    "Season_Rabi",
];

/// Returns a fixed production regardless of input.
pub struct FixedModel {
    pub names: Option<Vec<String>>,
    pub output: f64,
}

impl FixedModel {
    pub fn new(output: f64) -> Self {
        Self {
            names: Some(SCHEMA.iter().map(ToString::to_string).collect()),
            output,
        }
    }
}

impl Regressor for FixedModel {
    fn feature_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    fn predict(&self, _features: &FeatureVector) -> f64 {
        self.output
    }
}

pub fn encoder() -> Arc<OneHotEncoder> {
    Arc::new(OneHotEncoder::from_json_str(SAMPLE_ENCODER_JSON).unwrap())
}

/// Encoder whose `Season` categories carry trailing spaces, as some training
/// data exports do.
pub fn padded_encoder() -> Arc<OneHotEncoder> {
    Arc::new(
        OneHotEncoder::from_json_str(
            r#"{"feature_names_in": ["State", "District", "Crop", "Season"],
                "categories": [["X"], ["Y"], ["Rice"], ["Kharif     ", "Rabi       "]]}"#,
        )
        .unwrap(),
    )
}

pub fn fields() -> CategoricalFieldSet {
    CategoricalFieldSet::standard()
}
