//! Observability infrastructure for the cost estimator
//!
//! Provides:
//! - Prometheus metrics (estimate latency, estimate count, schema rejections, model version)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_counter_vec,
    GaugeVec, Histogram, IntCounter, IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Histogram buckets for estimate latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.000_001, 0.000_005, 0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EstimatorMetricsInner> = OnceLock::new();

struct EstimatorMetricsInner {
    estimate_latency_seconds: Histogram,
    estimates_total: IntCounter,
    schema_rejections_total: IntCounterVec,
    model_version_info: GaugeVec,
}

impl EstimatorMetricsInner {
    fn new() -> Self {
        Self {
            estimate_latency_seconds: register_histogram!(
                "cost_estimator_estimate_latency_seconds",
                "Time spent evaluating the cost model",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register estimate_latency_seconds"),

            estimates_total: register_int_counter!(
                "cost_estimator_estimates_total",
                "Total number of cost estimates produced"
            )
            .expect("Failed to register estimates_total"),

            schema_rejections_total: register_int_counter_vec!(
                "cost_estimator_schema_rejections_total",
                "Total number of input records rejected by the feature schema",
                &["reason"]
            )
            .expect("Failed to register schema_rejections_total"),

            model_version_info: register_gauge_vec!(
                "cost_estimator_model_version_info",
                "Information about the loaded model artifact",
                &["version"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Estimator metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct EstimatorMetrics {
    _private: (),
}

impl Default for EstimatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EstimatorMetricsInner {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new)
    }

    pub fn observe_estimate_latency(&self, duration_secs: f64) {
        self.inner().estimate_latency_seconds.observe(duration_secs);
    }

    pub fn inc_estimates(&self) {
        self.inner().estimates_total.inc();
    }

    pub fn inc_schema_rejection(&self, reason: &str) {
        self.inner()
            .schema_rejections_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Update model version info
    pub fn set_model_version(&self, version: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version])
            .set(1.0);
    }

    pub fn estimates_total(&self) -> u64 {
        self.inner().estimates_total.get()
    }

    pub fn schema_rejections(&self, reason: &str) -> u64 {
        self.inner()
            .schema_rejections_total
            .with_label_values(&[reason])
            .get()
    }
}

/// Structured logger for estimator events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn log_startup(&self, version: &str, model_version: &str) {
        info!(
            event = "estimator_started",
            service = %self.service_name,
            estimator_version = %version,
            model_version = %model_version,
            "Cost estimator started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "estimator_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Cost estimator shutting down"
        );
    }

    pub fn log_artifact_loaded(&self, path: &str, version: &str, checksum: &str) {
        info!(
            event = "artifact_loaded",
            service = %self.service_name,
            path = %path,
            model_version = %version,
            checksum = %checksum,
            "Model artifact loaded"
        );
    }

    /// Log a fatal artifact load failure
    pub fn log_artifact_rejected(&self, path: &str, reason: &str) {
        error!(
            event = "artifact_rejected",
            service = %self.service_name,
            path = %path,
            reason = %reason,
            "Model artifact rejected, refusing to serve"
        );
    }

    pub fn log_estimate(
        &self,
        model_version: &str,
        ore_grade: f64,
        estimate: f64,
        uncertainty: f64,
    ) {
        info!(
            event = "estimate_generated",
            service = %self.service_name,
            model_version = %model_version,
            ore_grade = ore_grade,
            estimate = estimate,
            uncertainty = uncertainty,
            "Generated extraction cost estimate"
        );
    }

    pub fn log_schema_rejection(&self, field: &str, reason: &str, details: &str) {
        warn!(
            event = "schema_rejected",
            service = %self.service_name,
            field = %field,
            reason = %reason,
            details = %details,
            "Input record rejected by feature schema"
        );
    }
}
