//! # crop-model
//!
//! Loading of the pre-fitted artifacts the prediction pipeline consumes.
//!
//! ## Artifacts
//!
//! - **Model**: an XGBoost JSON model as written by `Booster.save_model("model.json")`.
//!   Parsed into [`XgbModel`] and converted to an immutable [`XgbRegressor`] that
//!   implements [`crop_core::model::Regressor`]. The training feature names come
//!   from `learner.feature_names`.
//! - **Encoder**: a fitted one-hot encoder stored as
//!   `{"feature_names_in": [...], "categories": [[...], ...]}`, loaded as
//!   [`OneHotEncoder`] which implements [`crop_core::model::CategoricalEncoder`].
//! - **Categorical columns**: a JSON array of field names.
//!
//! [`ArtifactSet::load`] loads all three in one deterministic step. Any failure is
//! an [`ArtifactError`] naming the artifact and path; there are no fallback
//! locations or alternative loaders.
//!
//! ## Thread safety
//!
//! Every loaded artifact is immutable, so a single [`ArtifactSet`] can be shared
//! behind an `Arc` and read from any number of threads.

mod artifacts;
mod booster;
mod columns;
mod encoder;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod xgboost;

pub use artifacts::ArtifactSet;
pub use booster::{Link, XgbRegressor};
pub use columns::load_categorical_columns;
pub use encoder::OneHotEncoder;
pub use error::{ArtifactError, ArtifactKind, ConversionError, EncoderError};
pub use xgboost::XgbModel;
