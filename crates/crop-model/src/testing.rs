//! Sample artifacts for tests across the workspace.
//!
//! The sample model is a two-tree XGBoost regressor over
//! `Area, Crop_Rice, Crop_Wheat, Crop_Maize, Season_Kharif, Season_Rabi` with a
//! base score of 100:
//!
//! - tree 0 splits on `Crop_Rice < 0.5` (missing goes left): 20 if not rice, 50 if rice
//! - tree 1 splits on `Area < 5` (missing goes right): 5 below, 30 at or above
//!
//! Leaf `base_weights` are a hundredth of the leaf outputs, as if scaled by a
//! learning rate after pruning, so only `split_conditions` gives these numbers.
//!
//! The sample encoder knows more categories than the model was trained on
//! (`State_*`, `District_*`) and fewer (`Crop_Maize` is never emitted), so it
//! exercises both the drop and zero-fill paths of alignment.

use std::path::Path;

use crop_config::ArtifactsConfig;

pub const SAMPLE_MODEL_JSON: &str = r#"{
  "version": [2, 1, 3],
  "learner": {
    "attributes": {},
    "feature_names": ["Area", "Crop_Rice", "Crop_Wheat", "Crop_Maize", "Season_Kharif", "Season_Rabi"],
    "feature_types": ["float", "float", "float", "float", "float", "float"],
    "gradient_booster": {
      "name": "gbtree",
      "model": {
        "gbtree_model_param": {"num_parallel_tree": "1", "num_trees": "2"},
        "iteration_indptr": [0, 1, 2],
        "tree_info": [0, 0],
        "trees": [
          {
            "base_weights": [0.0, 0.2, 0.5],
            "categories": [],
            "categories_nodes": [],
            "categories_segments": [],
            "categories_sizes": [],
            "default_left": [1, 0, 0],
            "id": 0,
            "left_children": [1, -1, -1],
            "loss_changes": [10.0, 0.0, 0.0],
            "parents": [2147483647, 0, 0],
            "right_children": [2, -1, -1],
            "split_conditions": [0.5, 20.0, 50.0],
            "split_indices": [1, 0, 0],
            "split_type": [0, 0, 0],
            "sum_hessian": [4.0, 2.0, 2.0],
            "tree_param": {"num_deleted": "0", "num_feature": "6", "num_nodes": "3", "size_leaf_vector": "1"}
          },
          {
            "base_weights": [0.0, 0.05, 0.3],
            "categories": [],
            "categories_nodes": [],
            "categories_segments": [],
            "categories_sizes": [],
            "default_left": [0, 0, 0],
            "id": 1,
            "left_children": [1, -1, -1],
            "loss_changes": [8.0, 0.0, 0.0],
            "parents": [2147483647, 0, 0],
            "right_children": [2, -1, -1],
            "split_conditions": [5.0, 5.0, 30.0],
            "split_indices": [0, 0, 0],
            "split_type": [0, 0, 0],
            "sum_hessian": [4.0, 2.0, 2.0],
            "tree_param": {"num_deleted": "0", "num_feature": "6", "num_nodes": "3", "size_leaf_vector": "1"}
          }
        ]
      }
    },
    "learner_model_param": {
      "base_score": "[1E2]",
      "boost_from_average": "1",
      "num_class": "0",
      "num_feature": "6",
      "num_target": "1"
    },
    "objective": {"name": "reg:squarederror", "reg_loss_param": {"scale_pos_weight": "1"}}
  }
}"#;

pub const SAMPLE_ENCODER_JSON: &str = r#"{
  "feature_names_in": ["State", "District", "Crop", "Season"],
  "categories": [
    ["Punjab", "X"],
    ["Ludhiana", "Y"],
    ["Rice", "Wheat"],
    ["Kharif", "Rabi"]
  ]
}"#;

pub const SAMPLE_COLUMNS_JSON: &str = r#"["State", "District", "Crop", "Season"]"#;

/// Write the sample artifacts into `dir` and return a config pointing at them.
///
/// # Errors
///
/// Returns any I/O error from writing the files.
pub fn write_sample_artifacts(dir: &Path) -> std::io::Result<ArtifactsConfig> {
    let config = ArtifactsConfig {
        dir: dir.display().to_string(),
        ..ArtifactsConfig::default()
    };
    std::fs::write(config.model_file(), SAMPLE_MODEL_JSON)?;
    std::fs::write(config.encoder_file(), SAMPLE_ENCODER_JSON)?;
    std::fs::write(config.categorical_columns_file(), SAMPLE_COLUMNS_JSON)?;
    Ok(config)
}
