//! Cross-cutting error types for cropcast.
//!
//! Encoding and alignment failures are defined here because both the schema
//! registry and the prediction pipeline raise them. Artifact loading errors
//! live in `crop-model`, and the CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors raised while validating core domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A record could not be encoded because the caller broke the input contract.
///
/// Unseen category values are never an encoding error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A required categorical field is absent or blank.
    #[error("Required categorical field '{field}' is missing from the record")]
    MissingField { field: String },
}

/// The model's feature schema is unreadable or incompatible with the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// The loaded model does not report the feature names it was trained on.
    #[error("Training feature schema is unavailable: {0}")]
    SchemaUnavailable(String),

    /// The model reports zero training features.
    #[error("Training feature schema is empty")]
    EmptySchema,

    /// The same feature name appears twice in the training schema.
    #[error("Training feature schema lists '{0}' more than once")]
    DuplicateFeature(String),

    /// No candidate feature matched the schema, so every value would be zero-filled.
    #[error(
        "None of the {candidates} candidate features occur in the training schema ({expected} features)"
    )]
    NoOverlap { candidates: usize, expected: usize },

    /// The fitted encoder was fitted on different fields than the categorical field set.
    #[error("Encoder was fitted on fields {encoder:?} but the categorical field set is {expected:?}")]
    FieldMismatch {
        encoder: Vec<String>,
        expected: Vec<String>,
    },
}
