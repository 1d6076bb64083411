//! # crop-predict
//!
//! The inference pipeline: a record's categorical values go through the
//! [`EncoderAdapter`], the encoded indicators and numeric fields are laid out in
//! training order by the [`FeatureAligner`], and the [`InferenceService`] hands
//! the resulting vector to the model and derives yield from the production it
//! returns.
//!
//! Every stage is built once from shared, read-only artifacts and takes `&self`
//! per request, so one service can serve any number of threads.
//!
//! [`LookupTable`] provides the distinct categorical values a caller may choose
//! from, built once from a records file or from the fitted encoder.

mod align;
mod encoding;
pub mod error;
mod lookup;
mod service;

pub use align::FeatureAligner;
pub use encoding::EncoderAdapter;
pub use error::{LookupError, PredictError};
pub use lookup::LookupTable;
pub use service::InferenceService;

#[cfg(test)]
pub(crate) mod test_support;
