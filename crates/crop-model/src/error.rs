//! Artifact loading error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The three startup artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Encoder,
    CategoricalColumns,
}

impl ArtifactKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Encoder => "encoder",
            Self::CategoricalColumns => "categorical columns",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A startup artifact could not be loaded. Always fatal: the service must not
/// accept requests with a partial pipeline.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file does not exist.
    #[error("{kind} artifact not found at {}", path.display())]
    Missing { kind: ArtifactKind, path: PathBuf },

    /// The artifact file exists but could not be read.
    #[error("{kind} artifact at {} could not be read: {source}", path.display())]
    Unreadable {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact was read but its contents are invalid.
    #[error("{kind} artifact at {} is malformed: {reason}", path.display())]
    Malformed {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },

    /// The artifact is well-formed but uses a feature this crate cannot serve.
    #[error("{kind} artifact at {} is not supported: {reason}", path.display())]
    Unsupported {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },
}

impl ArtifactError {
    /// Map an I/O error, separating "not found" from other read failures.
    pub(crate) fn from_io(kind: ArtifactKind, path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::Missing { kind, path }
        } else {
            Self::Unreadable { kind, path, source }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self {
            Self::Missing { kind, .. }
            | Self::Unreadable { kind, .. }
            | Self::Malformed { kind, .. }
            | Self::Unsupported { kind, .. } => *kind,
        }
    }
}

/// An XGBoost model parsed but cannot be turned into a native regressor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("tree {0} has no nodes")]
    EmptyTree(usize),

    #[error("tree {tree} field '{field}' has {actual} entries, expected {expected}")]
    TruncatedTree {
        tree: usize,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "invalid node index in tree {tree}: node {node} references child {child} but tree has {num_nodes} nodes"
    )]
    InvalidNodeIndex {
        tree: usize,
        node: usize,
        child: i32,
        num_nodes: usize,
    },

    #[error("tree {tree} node {node} splits on feature {feature} but the model has {num_features} features")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: i32,
        num_features: usize,
    },

    #[error("tree {tree} node {node} uses a categorical split")]
    CategoricalSplit { tree: usize, node: usize },

    #[error("model lists {names} feature names but declares {num_features} features")]
    FeatureNameCount { names: usize, num_features: usize },

    #[error("dart model has {trees} trees but {weights} drop weights")]
    DartWeights { trees: usize, weights: usize },

    #[error(
        "gblinear weights length {actual} doesn't match num_features + 1 = {expected}"
    )]
    InvalidLinearWeights { actual: usize, expected: usize },

    #[error("objective '{0}' is not a single-output regression objective")]
    UnsupportedObjective(String),

    #[error("model has {num_class} classes and {num_target} targets; only single-output models are supported")]
    MultiOutput { num_class: i64, num_target: i64 },
}

impl ConversionError {
    /// Whether the model is valid XGBoost but outside what the regressor serves.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::CategoricalSplit { .. } | Self::UnsupportedObjective(_) | Self::MultiOutput { .. }
        )
    }
}

/// A fitted encoder document is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    #[error("encoder document is not valid JSON: {0}")]
    Parse(String),

    #[error("encoder has no fields")]
    NoFields,

    #[error("encoder lists {fields} fields but {categories} category lists")]
    LengthMismatch { fields: usize, categories: usize },

    #[error("encoder field '{0}' is listed more than once")]
    DuplicateField(String),

    #[error("encoder field '{0}' has no categories")]
    NoCategories(String),

    #[error("encoder field '{field}' lists category '{category}' more than once")]
    DuplicateCategory { field: String, category: String },

    #[error("encoder field '{field}' has a non-scalar category: {value}")]
    InvalidCategory { field: String, value: String },
}
