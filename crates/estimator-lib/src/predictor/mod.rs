//! Cost prediction engine

mod artifact;
mod report;
mod service;

pub use artifact::{
    compute_checksum, ArtifactBlob, ArtifactConfig, ArtifactInfo, ArtifactLoadError,
    ModelArtifact, DEFAULT_MAX_ARTIFACT_BYTES, DEFAULT_TOLERANCE,
};
pub use report::{format_currency, OutputConfig, ReportFormatter};
pub use service::EstimationService;

use crate::models::FeatureVector;

/// Trait for prediction implementations
///
/// Implementations are read-only after construction and may be shared
/// across threads without locking.
pub trait Predictor: Send + Sync {
    /// Evaluate the model on a validated feature vector
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Fixed uncertainty band reported with every estimate
    fn uncertainty(&self) -> f64;

    /// Get current model version
    fn model_version(&self) -> &str;
}
