//! Seams to the pre-fitted artifacts.
//!
//! Both traits require `Send + Sync`: implementations are loaded once at
//! startup and shared read-only across every request.

use crate::features::FeatureVector;

/// A trained regression model.
pub trait Regressor: Send + Sync {
    /// Feature names the model was trained on, in column order.
    ///
    /// `None` when the artifact does not record them.
    fn feature_names(&self) -> Option<&[String]>;

    /// Predict a single value from a schema-ordered feature vector.
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// A fitted categorical-to-indicator transform.
pub trait CategoricalEncoder: Send + Sync {
    /// Fields the encoder was fitted on, in fit order.
    fn fields(&self) -> &[String];

    /// Categories observed for `field` during fitting, in output order.
    fn categories(&self, field: &str) -> Option<&[String]>;

    /// Output feature names in output order.
    fn feature_names_out(&self) -> Vec<String>;

    /// Encode one row. `values` is aligned with [`Self::fields`].
    ///
    /// The output is aligned with [`Self::feature_names_out`]. A value not seen
    /// during fitting produces zeros for every indicator of its field.
    fn transform(&self, values: &[&str]) -> Vec<f64>;
}
