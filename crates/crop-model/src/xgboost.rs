//! XGBoost JSON model format.
//!
//! Foreign types covering the part of the XGBoost JSON schema that inference
//! needs. Unknown keys are ignored, so models written by any XGBoost release that
//! emits `learner.feature_names` parse without changes. XGBoost writes most
//! scalars as strings (`"num_nodes": "3"`); both strings and numbers are accepted.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::error::{ArtifactError, ArtifactKind};

// =============================================================================
// Custom deserializers for XGBoost-specific formats
// =============================================================================

/// `base_score` appears as a number, a string (`"5E-1"`), a bracketed string
/// (`"[5E-1]"`, XGBoost >= 3.0), or an array. The first element is used.
fn deserialize_base_score<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    let mut current = Value::deserialize(deserializer)?;
    loop {
        match current {
            Value::Number(n) => {
                #[allow(clippy::cast_possible_truncation)]
                return n
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| SerdeError::custom("invalid base_score number"));
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if let Ok(f) = trimmed.parse::<f32>() {
                    return Ok(f);
                }
                if let Some(inner) = trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    let first = inner.split(',').next().unwrap_or_default().trim();
                    if let Ok(f) = first.parse::<f32>() {
                        return Ok(f);
                    }
                }
                return Err(SerdeError::custom(format!(
                    "cannot parse base_score from string: {s}"
                )));
            }
            Value::Array(values) => {
                current = values
                    .into_iter()
                    .next()
                    .ok_or_else(|| SerdeError::custom("empty base_score array"))?;
            }
            _ => {
                return Err(SerdeError::custom(
                    "base_score must be number, string, or array",
                ));
            }
        }
    }
}

/// `default_left` is an array of 0/1 integers in current releases and of
/// booleans in some older ones.
fn deserialize_flags<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(|value| match value {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => n
                .as_i64()
                .map(|i| i != 0)
                .ok_or_else(|| SerdeError::custom("invalid number for flag")),
            other => Err(SerdeError::custom(format!("unsupported flag value: {other}"))),
        })
        .collect()
}

const fn default_num_target() -> i64 {
    1
}

// =============================================================================
// Tree / model level definitions
// =============================================================================

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct TreeParam {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub num_nodes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub tree_param: TreeParam,
    #[serde(default)]
    pub id: i32,
    /// Node weights before learning-rate scaling and leaf refresh. Leaf
    /// outputs live in `split_conditions`.
    #[serde(default)]
    pub base_weights: Vec<f32>,
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    pub split_indices: Vec<i32>,
    /// Threshold for split nodes, output value for leaves.
    pub split_conditions: Vec<f32>,
    #[serde(default)]
    pub split_type: Vec<i32>,
    #[serde(deserialize_with = "deserialize_flags")]
    pub default_left: Vec<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTrees {
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub tree_info: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbTreeDefinition {
    pub model: ModelTrees,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbLinearModel {
    pub weights: Vec<f32>,
}

/// Gradient booster variants (gbtree | gblinear | dart).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum GradientBooster {
    Gbtree {
        model: ModelTrees,
    },
    Gblinear {
        model: GbLinearModel,
    },
    Dart {
        gbtree: GbTreeDefinition,
        weight_drop: Vec<f32>,
    },
}

// =============================================================================
// Learner-level definitions
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveSpec {
    pub name: String,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct LearnerModelParam {
    #[serde(deserialize_with = "deserialize_base_score")]
    pub base_score: f32,
    #[serde(rename = "num_class", default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub n_class: i64,
    #[serde(rename = "num_feature")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub n_features: i64,
    #[serde(default = "default_num_target")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub num_target: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Learner {
    /// Training column names; empty when the model was fitted on an unnamed matrix.
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub gradient_booster: GradientBooster,
    pub objective: ObjectiveSpec,
    pub learner_model_param: LearnerModelParam,
}

// =============================================================================
// Top-level XGBoost model
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct XgbModel {
    #[serde(default)]
    pub version: Vec<u32>,
    pub learner: Learner,
}

impl XgbModel {
    /// Load a model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Missing`] / [`ArtifactError::Unreadable`] for I/O
    /// failures and [`ArtifactError::Malformed`] if the JSON does not describe an
    /// XGBoost model.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ArtifactError::from_io(ArtifactKind::Model, path.to_path_buf(), e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ArtifactError::Malformed {
            kind: ArtifactKind::Model,
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse a model from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Training feature names, `None` when the model does not record them.
    #[must_use]
    pub fn feature_names(&self) -> Option<&[String]> {
        let names = &self.learner.feature_names;
        (!names.is_empty()).then_some(names.as_slice())
    }

    #[must_use]
    pub fn objective(&self) -> &str {
        &self.learner.objective.name
    }
}
