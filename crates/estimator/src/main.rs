//! Cost Estimator - metal extraction cost prediction service
//!
//! Loads the model artifact once at startup and serves estimates over
//! HTTP. A missing or incompatible artifact stops the process before the
//! listener is bound.

use anyhow::{Context, Result};
use cost_estimator::{api, config::EstimatorConfig};
use estimator_lib::{
    EstimationService, EstimatorMetrics, ModelArtifact, ReportFormatter, StructuredLogger,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ESTIMATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting cost-estimator");

    let config = EstimatorConfig::load()?;
    info!(
        model_path = %config.model_path.display(),
        api_port = config.api_port,
        "Estimator configured"
    );

    let logger = StructuredLogger::new(&config.service_name);
    let metrics = EstimatorMetrics::new();

    let model_path = config.model_path.display().to_string();
    let artifact = match ModelArtifact::load(&config.model_path, &config.artifact_config()) {
        Ok(artifact) => Arc::new(artifact),
        Err(e) => {
            logger.log_artifact_rejected(&model_path, &e.to_string());
            return Err(e).context("Cannot start without a valid model artifact");
        }
    };
    logger.log_artifact_loaded(&model_path, artifact.version(), artifact.checksum());
    metrics.set_model_version(artifact.version());

    let service = EstimationService::new(artifact.clone(), metrics, logger.clone());
    let formatter = ReportFormatter::with_config(config.output_config());
    let app_state = Arc::new(api::AppState::new(service, artifact.clone(), formatter));

    logger.log_startup(ESTIMATOR_VERSION, artifact.version());

    let shutdown_logger = logger.clone();
    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        shutdown_logger.log_shutdown("SIGINT received");
    };

    api::serve(config.api_port, app_state, shutdown).await?;
    info!("Shut down");

    Ok(())
}
