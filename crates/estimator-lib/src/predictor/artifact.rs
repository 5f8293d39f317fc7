//! Linear model artifact
//!
//! An artifact is a single JSON blob holding the coefficients of a fitted
//! linear regression over the canonical features. Every structural check
//! happens in [`ModelArtifact::load`] so a bad artifact fails the process
//! before any request is served.

use super::Predictor;
use crate::models::FeatureVector;
use crate::schema::{Feature, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Maximum artifact size in bytes (64KB)
pub const DEFAULT_MAX_ARTIFACT_BYTES: usize = 64 * 1024;

/// Default absolute tolerance when an artifact does not declare one
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Options applied while loading an artifact
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    /// Reject blobs larger than this
    pub max_bytes: usize,
    /// Expected SHA256 of the blob (hex). Skipped when `None`.
    pub expected_checksum: Option<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
            expected_checksum: None,
        }
    }
}

/// Startup-fatal failure to load a model artifact
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("model artifact not found at {0}")]
    Missing(PathBuf),

    #[error("failed to read model artifact {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("model artifact is {size} bytes, maximum is {max}")]
    TooLarge { size: usize, max: usize },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model artifact has {found} coefficients, schema expects {expected}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("model artifact feature {position} is '{found}', schema expects '{expected}'")]
    FeatureOrderMismatch {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("model artifact {0} is not finite")]
    NonFinite(String),

    #[error("model artifact {name} must be finite and non-negative, got {value}")]
    InvalidUncertainty { name: &'static str, value: f64 },
}

/// On-disk artifact layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBlob {
    pub version: String,
    /// Feature names the model was trained on, in training order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Fixed ± band reported with every estimate
    pub uncertainty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
}

/// Summary of a loaded artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub version: String,
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub uncertainty: f64,
    pub tolerance: f64,
    pub checksum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    pub loaded_at: i64,
}

/// Immutable linear model: `estimate = w·x + b`
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    version: String,
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    uncertainty: f64,
    tolerance: f64,
    checksum: String,
    trained_at: Option<String>,
    loaded_at: i64,
}

impl ModelArtifact {
    /// Build an artifact directly from coefficients in canonical order
    pub fn new(
        version: impl Into<String>,
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
        uncertainty: f64,
    ) -> Result<Self, ArtifactLoadError> {
        let blob = ArtifactBlob {
            version: version.into(),
            features: None,
            coefficients: coefficients.to_vec(),
            intercept,
            uncertainty,
            tolerance: None,
            trained_at: None,
        };
        let bytes = serde_json::to_vec(&blob)?;
        Self::from_blob(blob, compute_checksum(&bytes))
    }

    /// Load an artifact from disk
    pub fn load(path: &Path, config: &ArtifactConfig) -> Result<Self, ArtifactLoadError> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ArtifactLoadError::Missing(path.to_path_buf())
            } else {
                ArtifactLoadError::Unreadable {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let artifact = Self::from_bytes(&bytes, config)?;
        debug!(
            path = %path.display(),
            version = %artifact.version,
            "Model artifact parsed"
        );
        Ok(artifact)
    }

    /// Parse and validate an artifact blob
    pub fn from_bytes(bytes: &[u8], config: &ArtifactConfig) -> Result<Self, ArtifactLoadError> {
        if bytes.len() > config.max_bytes {
            return Err(ArtifactLoadError::TooLarge {
                size: bytes.len(),
                max: config.max_bytes,
            });
        }

        let checksum = compute_checksum(bytes);
        if let Some(expected) = &config.expected_checksum {
            if !expected.eq_ignore_ascii_case(&checksum) {
                return Err(ArtifactLoadError::ChecksumMismatch {
                    expected: expected.clone(),
                    actual: checksum,
                });
            }
            debug!(checksum = %checksum, "Model artifact checksum validated");
        }

        let blob: ArtifactBlob = serde_json::from_slice(bytes)?;
        Self::from_blob(blob, checksum)
    }

    fn from_blob(blob: ArtifactBlob, checksum: String) -> Result<Self, ArtifactLoadError> {
        let found = blob.coefficients.len();
        let coefficients: [f64; FEATURE_COUNT] = blob
            .coefficients
            .as_slice()
            .try_into()
            .map_err(|_| ArtifactLoadError::ArityMismatch {
                expected: FEATURE_COUNT,
                found,
            })?;

        if let Some(features) = &blob.features {
            check_feature_order(features)?;
        }

        for (feature, weight) in Feature::ALL.iter().zip(coefficients.iter()) {
            if !weight.is_finite() {
                return Err(ArtifactLoadError::NonFinite(format!(
                    "coefficient for '{}'",
                    feature.name()
                )));
            }
        }
        if !blob.intercept.is_finite() {
            return Err(ArtifactLoadError::NonFinite("intercept".to_string()));
        }

        check_non_negative("uncertainty", blob.uncertainty)?;
        let tolerance = blob.tolerance.unwrap_or(DEFAULT_TOLERANCE);
        check_non_negative("tolerance", tolerance)?;

        Ok(Self {
            version: blob.version,
            coefficients,
            intercept: blob.intercept,
            uncertainty: blob.uncertainty,
            tolerance,
            checksum,
            trained_at: blob.trained_at,
            loaded_at: chrono::Utc::now().timestamp(),
        })
    }

    /// Evaluate the linear model on a validated vector
    pub fn evaluate(&self, features: &FeatureVector) -> f64 {
        features
            .to_array()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + w * x)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Absolute numeric tolerance declared for this artifact
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// SHA256 of the blob this artifact was loaded from
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn info(&self) -> ArtifactInfo {
        ArtifactInfo {
            version: self.version.clone(),
            features: Feature::ALL.iter().map(|f| f.name().to_string()).collect(),
            coefficients: self.coefficients.to_vec(),
            intercept: self.intercept,
            uncertainty: self.uncertainty,
            tolerance: self.tolerance,
            checksum: self.checksum.clone(),
            trained_at: self.trained_at.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.evaluate(features)
    }

    fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    fn model_version(&self) -> &str {
        &self.version
    }
}

fn check_feature_order(features: &[String]) -> Result<(), ArtifactLoadError> {
    if features.len() != FEATURE_COUNT {
        return Err(ArtifactLoadError::ArityMismatch {
            expected: FEATURE_COUNT,
            found: features.len(),
        });
    }
    for (position, (expected, found)) in Feature::ALL.iter().zip(features).enumerate() {
        if expected.name() != found {
            return Err(ArtifactLoadError::FeatureOrderMismatch {
                position,
                expected: expected.name(),
                found: found.clone(),
            });
        }
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ArtifactLoadError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ArtifactLoadError::InvalidUncertainty { name, value })
    }
}

/// Compute SHA256 checksum of data
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
