//! Estimator library for metal extraction cost prediction
//!
//! This crate provides the core functionality for:
//! - The feature schema shared by inputs, model artifacts and exports
//! - Loading and evaluating linear model artifacts
//! - The cost estimation service and report formatting
//! - Reference metal data and thermodynamic helpers
//! - Observability

pub mod export;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod reference;
pub mod schema;
pub mod thermo;

pub use export::{ExportError, ExportRecord};
pub use models::*;
pub use observability::{EstimatorMetrics, StructuredLogger};
pub use predictor::{
    ArtifactConfig, ArtifactInfo, ArtifactLoadError, EstimationService, ModelArtifact, Predictor,
    ReportFormatter,
};
pub use schema::{validate, Feature, SchemaError, FEATURE_COUNT};
