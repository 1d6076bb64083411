//! Pipeline error types.

use std::path::PathBuf;

use crop_core::errors::{AlignmentError, EncodingError};
use thiserror::Error;

/// A single prediction failed. The original failure is preserved as the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

/// The lookup data source could not be read.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to read records from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
