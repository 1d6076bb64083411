//! # crop-core
//!
//! Core types, feature schemas, and error types for cropcast.
//!
//! This crate provides the foundational types shared across all cropcast crates:
//! - The input [`Record`](record::Record) and its field names
//! - The schema registry: [`CategoricalFieldSet`](schema::CategoricalFieldSet) and
//!   [`TrainingFeatureSchema`](schema::TrainingFeatureSchema)
//! - Schema-ordered [`FeatureVector`](features::FeatureVector)s
//! - The [`PredictionResult`](prediction::PredictionResult) handed back to callers
//! - The seams to pre-fitted artifacts: [`Regressor`](model::Regressor) and
//!   [`CategoricalEncoder`](model::CategoricalEncoder)
//! - Cross-cutting error types

pub mod errors;
pub mod features;
pub mod model;
pub mod prediction;
pub mod record;
pub mod schema;
