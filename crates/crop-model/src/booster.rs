//! Native regressor converted from an [`XgbModel`].
//!
//! Trees are flattened into a node array validated at load time, so prediction
//! never indexes out of bounds and always terminates.

use std::path::Path;

use crop_core::features::FeatureVector;
use crop_core::model::Regressor;

use crate::error::{ArtifactError, ArtifactKind, ConversionError};
use crate::xgboost::{GradientBooster, ModelTrees, Tree as XgbTree, XgbModel};

/// Inverse link applied to the raw margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Identity,
    Exp,
    Sigmoid,
}

impl Link {
    /// Link for a single-output regression objective, `None` for anything else.
    #[must_use]
    pub fn for_objective(objective: &str) -> Option<Self> {
        match objective {
            "reg:squarederror"
            | "reg:linear"
            | "reg:squaredlogerror"
            | "reg:pseudohubererror"
            | "reg:absoluteerror"
            | "reg:quantileerror" => Some(Self::Identity),
            "count:poisson" | "reg:gamma" | "reg:tweedie" => Some(Self::Exp),
            "reg:logistic" | "binary:logistic" => Some(Self::Sigmoid),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Exp => "exp",
            Self::Sigmoid => "sigmoid",
        }
    }

    #[must_use]
    pub fn apply(self, margin: f64) -> f64 {
        match self {
            Self::Identity => margin,
            Self::Exp => margin.exp(),
            Self::Sigmoid => 1.0 / (1.0 + (-margin).exp()),
        }
    }

    /// XGBoost stores `base_score` in output space; the predictor sums in margin space.
    fn to_margin(self, base_score: f32) -> f32 {
        match self {
            Self::Identity => base_score,
            Self::Exp => base_score.max(1e-7).ln(),
            Self::Sigmoid => {
                let p = base_score.clamp(1e-7, 1.0 - 1e-7);
                (p / (1.0 - p)).ln()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        default_left: bool,
        left: usize,
        right: usize,
    },
    Leaf(f32),
}

#[derive(Debug, Clone)]
struct NativeTree {
    nodes: Box<[Node]>,
}

impl NativeTree {
    fn leaf_value(&self, features: &[f64]) -> f32 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    default_left,
                    left,
                    right,
                } => {
                    // XGBoost compares in single precision.
                    #[allow(clippy::cast_possible_truncation)]
                    let x = features.get(feature).map_or(f32::NAN, |&v| v as f32);
                    let go_left = if x.is_nan() { default_left } else { x < threshold };
                    index = if go_left { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Booster {
    Trees {
        trees: Vec<NativeTree>,
        /// Per-tree DART drop weights; `None` for plain gbtree.
        weights: Option<Vec<f32>>,
    },
    Linear {
        weights: Vec<f32>,
        bias: f32,
    },
}

/// Immutable regressor built from an XGBoost JSON model.
#[derive(Debug, Clone)]
pub struct XgbRegressor {
    feature_names: Option<Vec<String>>,
    num_features: usize,
    booster: Booster,
    base_margin: f32,
    link: Link,
}

impl XgbRegressor {
    /// Load and convert a model file in one step.
    ///
    /// # Errors
    ///
    /// Returns any [`ArtifactError`] from reading the file, and maps conversion
    /// failures to [`ArtifactError::Unsupported`] or [`ArtifactError::Malformed`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let model = XgbModel::from_file(path)?;
        Self::from_model(&model).map_err(|e| {
            let reason = e.to_string();
            if e.is_unsupported() {
                ArtifactError::Unsupported {
                    kind: ArtifactKind::Model,
                    path: path.to_path_buf(),
                    reason,
                }
            } else {
                ArtifactError::Malformed {
                    kind: ArtifactKind::Model,
                    path: path.to_path_buf(),
                    reason,
                }
            }
        })
    }

    /// Convert a parsed model.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] for multi-output or non-regression objectives,
    /// categorical splits, and structurally invalid trees or weights.
    pub fn from_model(model: &XgbModel) -> Result<Self, ConversionError> {
        let learner = &model.learner;
        let param = &learner.learner_model_param;

        let link = Link::for_objective(&learner.objective.name)
            .ok_or_else(|| ConversionError::UnsupportedObjective(learner.objective.name.clone()))?;
        if param.n_class > 1 || param.num_target > 1 {
            return Err(ConversionError::MultiOutput {
                num_class: param.n_class,
                num_target: param.num_target,
            });
        }

        let feature_names = model.feature_names().map(<[String]>::to_vec);
        let declared = usize::try_from(param.n_features).unwrap_or(0);
        let num_features = match &feature_names {
            Some(names) if declared != 0 && names.len() != declared => {
                return Err(ConversionError::FeatureNameCount {
                    names: names.len(),
                    num_features: declared,
                });
            }
            Some(names) => names.len(),
            None => declared,
        };

        let booster = match &learner.gradient_booster {
            GradientBooster::Gbtree { model } => Booster::Trees {
                trees: convert_trees(model, num_features)?,
                weights: None,
            },
            GradientBooster::Dart {
                gbtree,
                weight_drop,
            } => {
                let trees = convert_trees(&gbtree.model, num_features)?;
                if weight_drop.len() != trees.len() {
                    return Err(ConversionError::DartWeights {
                        trees: trees.len(),
                        weights: weight_drop.len(),
                    });
                }
                Booster::Trees {
                    trees,
                    weights: Some(weight_drop.clone()),
                }
            }
            GradientBooster::Gblinear { model } => {
                // Row-major [num_features + 1, 1]; the last row is the bias.
                let expected = num_features + 1;
                if model.weights.len() != expected {
                    return Err(ConversionError::InvalidLinearWeights {
                        actual: model.weights.len(),
                        expected,
                    });
                }
                let (weights, bias) = model.weights.split_at(num_features);
                Booster::Linear {
                    weights: weights.to_vec(),
                    bias: bias[0],
                }
            }
        };

        Ok(Self {
            feature_names,
            num_features,
            booster,
            base_margin: link.to_margin(param.base_score),
            link,
        })
    }

    #[must_use]
    pub const fn num_features(&self) -> usize {
        self.num_features
    }

    #[must_use]
    pub const fn link(&self) -> Link {
        self.link
    }

    /// Number of trees, 0 for a linear booster.
    #[must_use]
    pub fn num_trees(&self) -> usize {
        match &self.booster {
            Booster::Trees { trees, .. } => trees.len(),
            Booster::Linear { .. } => 0,
        }
    }

    /// Raw margin before the inverse link.
    #[must_use]
    pub fn predict_margin(&self, features: &[f64]) -> f64 {
        let sum = match &self.booster {
            Booster::Trees { trees, weights } => match weights {
                Some(weights) => trees
                    .iter()
                    .zip(weights)
                    .map(|(tree, weight)| tree.leaf_value(features) * weight)
                    .sum::<f32>(),
                None => trees.iter().map(|tree| tree.leaf_value(features)).sum(),
            },
            Booster::Linear { weights, bias } => {
                #[allow(clippy::cast_possible_truncation)]
                let dot: f32 = weights
                    .iter()
                    .zip(features)
                    .map(|(w, &x)| w * x as f32)
                    .sum();
                dot + bias
            }
        };
        f64::from(sum + self.base_margin)
    }

    /// Prediction for a raw, already-ordered row.
    #[must_use]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.link.apply(self.predict_margin(features))
    }
}

impl Regressor for XgbRegressor {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        self.predict_row(features.values())
    }
}

fn convert_trees(
    model: &ModelTrees,
    num_features: usize,
) -> Result<Vec<NativeTree>, ConversionError> {
    model
        .trees
        .iter()
        .enumerate()
        .map(|(tree_idx, tree)| convert_tree(tree, tree_idx, num_features))
        .collect()
}

/// Convert a single XGBoost tree to a validated node array.
fn convert_tree(
    xgb_tree: &XgbTree,
    tree_idx: usize,
    num_features: usize,
) -> Result<NativeTree, ConversionError> {
    let num_nodes = usize::try_from(xgb_tree.tree_param.num_nodes).unwrap_or(0);
    if num_nodes == 0 {
        return Err(ConversionError::EmptyTree(tree_idx));
    }

    for (field, actual) in [
        ("left_children", xgb_tree.left_children.len()),
        ("right_children", xgb_tree.right_children.len()),
        ("split_indices", xgb_tree.split_indices.len()),
        ("split_conditions", xgb_tree.split_conditions.len()),
        ("default_left", xgb_tree.default_left.len()),
    ] {
        if actual < num_nodes {
            return Err(ConversionError::TruncatedTree {
                tree: tree_idx,
                field,
                expected: num_nodes,
                actual,
            });
        }
    }

    let child_index = |node: usize, child: i32| -> Result<usize, ConversionError> {
        // Children are always allocated after their parent, which also rules out cycles.
        usize::try_from(child)
            .ok()
            .filter(|&c| c > node && c < num_nodes)
            .ok_or(ConversionError::InvalidNodeIndex {
                tree: tree_idx,
                node,
                child,
                num_nodes,
            })
    };

    let mut nodes = Vec::with_capacity(num_nodes);
    for node_idx in 0..num_nodes {
        let left_child = xgb_tree.left_children[node_idx];

        // A node is a leaf if left_child == -1 (XGBoost convention); its
        // output is stored where a split keeps its threshold.
        if left_child == -1 {
            nodes.push(Node::Leaf(xgb_tree.split_conditions[node_idx]));
            continue;
        }

        if xgb_tree.split_type.get(node_idx).copied().unwrap_or(0) == 1 {
            return Err(ConversionError::CategoricalSplit {
                tree: tree_idx,
                node: node_idx,
            });
        }

        let raw_feature = xgb_tree.split_indices[node_idx];
        let feature = usize::try_from(raw_feature)
            .ok()
            .filter(|&f| num_features == 0 || f < num_features)
            .ok_or(ConversionError::FeatureOutOfRange {
                tree: tree_idx,
                node: node_idx,
                feature: raw_feature,
                num_features,
            })?;

        nodes.push(Node::Split {
            feature,
            threshold: xgb_tree.split_conditions[node_idx],
            default_left: xgb_tree.default_left[node_idx],
            left: child_index(node_idx, left_child)?,
            right: child_index(node_idx, xgb_tree.right_children[node_idx])?,
        });
    }

    Ok(NativeTree {
        nodes: nodes.into_boxed_slice(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SAMPLE_MODEL_JSON;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn sample() -> XgbRegressor {
        let model = XgbModel::from_json_str(SAMPLE_MODEL_JSON).expect("sample model parses");
        XgbRegressor::from_model(&model).expect("sample model converts")
    }

    fn with_learner_patch(patch: impl FnOnce(&mut Value)) -> XgbModel {
        let mut value: Value = serde_json::from_str(SAMPLE_MODEL_JSON).expect("sample json");
        patch(&mut value["learner"]);
        serde_json::from_value(value).expect("patched model parses")
    }

    #[test]
    fn sample_model_reports_feature_names() {
        let regressor = sample();
        assert_eq!(regressor.num_features(), 6);
        assert_eq!(regressor.num_trees(), 2);
        assert_eq!(
            regressor.feature_names().map(<[String]>::len),
            Some(6),
            "feature names should come from learner.feature_names"
        );
    }

    // Columns: Area, Crop_Rice, Crop_Wheat, Crop_Maize, Season_Kharif, Season_Rabi
    #[rstest]
    #[case(&[10.0, 1.0, 0.0, 0.0, 1.0, 0.0], 50.0 + 30.0 + 100.0)]
    #[case(&[10.0, 0.0, 1.0, 0.0, 0.0, 1.0], 20.0 + 30.0 + 100.0)]
    #[case(&[2.0, 1.0, 0.0, 0.0, 1.0, 0.0], 50.0 + 5.0 + 100.0)]
    #[case(&[2.0, 0.0, 0.0, 0.0, 0.0, 0.0], 20.0 + 5.0 + 100.0)]
    fn trees_sum_leaves_and_base_score(#[case] row: &[f64], #[case] expected: f64) {
        assert_relative_eq!(sample().predict_row(row), expected, epsilon = 1e-4);
    }

    #[test]
    fn nan_follows_default_direction() {
        // Tree 0 defaults left (Crop_Rice missing -> not rice), tree 1 defaults right.
        let row = [f64::NAN, f64::NAN, 0.0, 0.0, 0.0, 0.0];
        assert_relative_eq!(sample().predict_row(&row), 20.0 + 30.0 + 100.0, epsilon = 1e-4);
    }

    #[test]
    fn short_rows_treat_missing_columns_as_nan() {
        let row = [10.0];
        assert_relative_eq!(sample().predict_row(&row), 20.0 + 30.0 + 100.0, epsilon = 1e-4);
    }

    #[test]
    fn leaf_outputs_come_from_split_conditions() {
        let model = with_learner_patch(|learner| {
            let tree = &mut learner["gradient_booster"]["model"]["trees"][0];
            tree["split_conditions"] = json!([0.5, 2.0, 5.0]);
            tree["base_weights"] = json!([0.0, 20.0, 50.0]);
        });
        let regressor = XgbRegressor::from_model(&model).expect("pruned leaves convert");
        let row = [10.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        assert_relative_eq!(regressor.predict_row(&row), 5.0 + 30.0 + 100.0, epsilon = 1e-4);
    }

    #[test]
    fn dart_weights_scale_tree_outputs() {
        let model = with_learner_patch(|learner| {
            let trees = learner["gradient_booster"]["model"].clone();
            learner["gradient_booster"] = json!({
                "name": "dart",
                "gbtree": {"name": "gbtree", "model": trees},
                "weight_drop": [0.5, 1.0]
            });
        });
        let regressor = XgbRegressor::from_model(&model).expect("dart converts");
        let row = [10.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        assert_relative_eq!(regressor.predict_row(&row), 25.0 + 30.0 + 100.0, epsilon = 1e-4);
    }

    #[test]
    fn dart_weight_count_must_match_trees() {
        let model = with_learner_patch(|learner| {
            let trees = learner["gradient_booster"]["model"].clone();
            learner["gradient_booster"] = json!({
                "name": "dart",
                "gbtree": {"name": "gbtree", "model": trees},
                "weight_drop": [1.0]
            });
        });
        assert_eq!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::DartWeights {
                trees: 2,
                weights: 1
            }
        );
    }

    #[test]
    fn gblinear_computes_dot_product_plus_bias() {
        let model = with_learner_patch(|learner| {
            learner["gradient_booster"] = json!({
                "name": "gblinear",
                "model": {"weights": [2.0, 10.0, 0.0, 0.0, 0.0, 0.0, 1.0]}
            });
        });
        let regressor = XgbRegressor::from_model(&model).expect("gblinear converts");
        let row = [3.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert_relative_eq!(regressor.predict_row(&row), 6.0 + 10.0 + 1.0 + 100.0, epsilon = 1e-4);
    }

    #[test]
    fn exp_link_converts_base_score_to_margin() {
        let model = with_learner_patch(|learner| {
            learner["objective"] = json!({"name": "reg:gamma"});
            learner["gradient_booster"] = json!({
                "name": "gblinear",
                "model": {"weights": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]}
            });
        });
        let regressor = XgbRegressor::from_model(&model).expect("gamma converts");
        assert_eq!(regressor.link(), Link::Exp);
        assert_relative_eq!(regressor.predict_row(&[0.0; 6]), 100.0, max_relative = 1e-5);
    }

    #[test]
    fn sigmoid_link_is_logistic() {
        assert_relative_eq!(Link::Sigmoid.apply(0.0), 0.5);
        assert_relative_eq!(Link::Exp.apply(0.0), 1.0);
        assert_relative_eq!(Link::Identity.apply(3.25), 3.25);
    }

    #[test]
    fn classification_objectives_are_unsupported() {
        let model = with_learner_patch(|learner| {
            learner["objective"] = json!({"name": "multi:softprob"});
        });
        let err = XgbRegressor::from_model(&model).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn multi_target_models_are_unsupported() {
        let model = with_learner_patch(|learner| {
            learner["learner_model_param"]["num_target"] = json!("2");
        });
        assert!(matches!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::MultiOutput { .. }
        ));
    }

    #[test]
    fn categorical_splits_are_unsupported() {
        let model = with_learner_patch(|learner| {
            learner["gradient_booster"]["model"]["trees"][0]["split_type"] = json!([1, 0, 0]);
        });
        assert_eq!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::CategoricalSplit { tree: 0, node: 0 }
        );
    }

    #[test]
    fn backward_child_index_is_rejected() {
        let model = with_learner_patch(|learner| {
            learner["gradient_booster"]["model"]["trees"][1]["right_children"] = json!([0, -1, -1]);
        });
        assert!(matches!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::InvalidNodeIndex {
                tree: 1,
                node: 0,
                child: 0,
                ..
            }
        ));
    }

    #[test]
    fn split_feature_outside_schema_is_rejected() {
        let model = with_learner_patch(|learner| {
            learner["gradient_booster"]["model"]["trees"][0]["split_indices"] = json!([9, 0, 0]);
        });
        assert!(matches!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::FeatureOutOfRange { feature: 9, .. }
        ));
    }

    #[test]
    fn truncated_arrays_are_rejected() {
        let model = with_learner_patch(|learner| {
            learner["gradient_booster"]["model"]["trees"][0]["split_conditions"] = json!([0.5]);
        });
        assert!(matches!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::TruncatedTree {
                field: "split_conditions",
                ..
            }
        ));
    }

    #[test]
    fn feature_name_count_must_match_declared_features() {
        let model = with_learner_patch(|learner| {
            learner["learner_model_param"]["num_feature"] = json!("4");
        });
        assert_eq!(
            XgbRegressor::from_model(&model).unwrap_err(),
            ConversionError::FeatureNameCount {
                names: 6,
                num_features: 4
            }
        );
    }
}
