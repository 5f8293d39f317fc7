//! Estimator configuration

use anyhow::{Context, Result};
use estimator_lib::predictor::{ArtifactConfig, OutputConfig, DEFAULT_MAX_ARTIFACT_BYTES};
use serde::Deserialize;
use std::path::PathBuf;

/// Estimator service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Service name attached to structured log events
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Path to the model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Expected SHA256 of the model artifact
    #[serde(default)]
    pub model_sha256: Option<String>,

    /// Maximum model artifact size in bytes
    #[serde(default = "default_max_model_bytes")]
    pub max_model_bytes: usize,

    /// Currency code used in formatted estimates
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Unit the cost is quoted per
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_service_name() -> String {
    "cost-estimator".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/extraction_cost_model.json")
}

fn default_max_model_bytes() -> usize {
    DEFAULT_MAX_ARTIFACT_BYTES
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_unit() -> String {
    "ton".to_string()
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            api_port: default_api_port(),
            model_path: default_model_path(),
            model_sha256: None,
            max_model_bytes: default_max_model_bytes(),
            currency: default_currency(),
            unit: default_unit(),
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from an optional `estimator` config file and
    /// `ESTIMATOR_*` environment variables (environment wins)
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("estimator").required(false))
            .add_source(config::Environment::with_prefix("ESTIMATOR"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Invalid estimator configuration")
    }

    pub fn artifact_config(&self) -> ArtifactConfig {
        ArtifactConfig {
            max_bytes: self.max_model_bytes,
            expected_checksum: self.model_sha256.clone(),
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            currency: self.currency.clone(),
            unit: self.unit.clone(),
        }
    }
}
