//! Prediction service
//!
//! Validates raw records against the feature schema, evaluates the shared
//! model and wraps the result with the model's fixed uncertainty band.
//! Calls are independent: the service keeps no per-request state.

use super::Predictor;
use crate::models::{FeatureVector, PredictionResult, RawRecord};
use crate::observability::{EstimatorMetrics, StructuredLogger};
use crate::schema::{self, SchemaError};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Estimates extraction cost from raw input records
#[derive(Clone)]
pub struct EstimationService {
    predictor: Arc<dyn Predictor>,
    metrics: EstimatorMetrics,
    logger: StructuredLogger,
}

impl EstimationService {
    pub fn new(
        predictor: Arc<dyn Predictor>,
        metrics: EstimatorMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            predictor,
            metrics,
            logger,
        }
    }

    /// Validate `raw` and estimate its extraction cost.
    ///
    /// Schema failures are returned unchanged; nothing is defaulted or
    /// retried.
    pub fn estimate_cost(&self, raw: &RawRecord) -> Result<PredictionResult, SchemaError> {
        self.estimate_record(raw).map(|(_, result)| result)
    }

    /// Like [`EstimationService::estimate_cost`], also returning the
    /// validated vector
    pub fn estimate_record(
        &self,
        raw: &RawRecord,
    ) -> Result<(FeatureVector, PredictionResult), SchemaError> {
        let features = schema::validate(raw).map_err(|err| {
            self.reject(&err);
            err
        })?;

        Ok((features, self.estimate_vector(&features)))
    }

    /// Record a schema rejection found before or during validation
    pub fn reject(&self, err: &SchemaError) {
        self.metrics.inc_schema_rejection(err.reason());
        self.logger.log_schema_rejection(err.field(), err.reason(), &err.to_string());
    }

    /// Estimate the cost of an already validated vector
    pub(crate) fn estimate_vector(&self, features: &FeatureVector) -> PredictionResult {
        let start = Instant::now();

        let result = PredictionResult {
            estimate: self.predictor.predict(features),
            uncertainty: self.predictor.uncertainty(),
        };

        let elapsed = start.elapsed();
        self.metrics.observe_estimate_latency(elapsed.as_secs_f64());
        self.metrics.inc_estimates();
        debug!(elapsed_us = elapsed.as_micros() as u64, "Estimate computed");

        self.logger.log_estimate(
            self.predictor.model_version(),
            features.ore_grade,
            result.estimate,
            result.uncertainty,
        );

        result
    }

    pub fn model_version(&self) -> &str {
        self.predictor.model_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::ModelArtifact;
    use crate::schema::Feature;
    use serde_json::{json, Value};

    fn service(artifact: ModelArtifact) -> EstimationService {
        EstimationService::new(
            Arc::new(artifact),
            EstimatorMetrics::new(),
            StructuredLogger::new("test-estimator"),
        )
    }

    fn reference_artifact() -> ModelArtifact {
        ModelArtifact::new("v1.0.0", [0.05, -45.0, 1.9, -4.2, 0.03, 0.01], 180.0, 100.0).unwrap()
    }

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn copper_record() -> RawRecord {
        record(json!({
            "delta_g": -146,
            "electrode_potential": 0.34,
            "enthalpy": 219,
            "ore_grade": 1.2,
            "melting_point": 1085,
            "boiling_point": 2562
        }))
    }

    #[test]
    fn test_copper_matches_direct_evaluation() {
        let artifact = reference_artifact();
        let w = *artifact.coefficients();
        let direct = artifact.intercept()
            + w[0] * -146.0
            + w[1] * 0.34
            + w[2] * 219.0
            + w[3] * 1.2
            + w[4] * 1085.0
            + w[5] * 2562.0;
        let tolerance = artifact.tolerance();

        let result = service(artifact).estimate_cost(&copper_record()).unwrap();

        assert!(
            (result.estimate - direct).abs() <= tolerance,
            "estimate {} differs from direct {}",
            result.estimate,
            direct
        );
        assert_eq!(result.uncertainty, 100.0);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let svc = service(reference_artifact());
        let first = svc.estimate_cost(&copper_record()).unwrap();
        for _ in 0..100 {
            let again = svc.estimate_cost(&copper_record()).unwrap();
            assert_eq!(again.estimate.to_bits(), first.estimate.to_bits());
            assert_eq!(again.uncertainty.to_bits(), first.uncertainty.to_bits());
        }
        assert!(first.estimate.is_finite());
    }

    #[test]
    fn test_schema_error_propagates_unchanged() {
        let svc = service(reference_artifact());

        let mut missing = copper_record();
        missing.remove("boiling_point");
        assert_eq!(
            svc.estimate_cost(&missing),
            Err(SchemaError::MissingField("boiling_point"))
        );

        let mut zero_grade = copper_record();
        zero_grade.insert("ore_grade".into(), json!(0.0));
        let expected = schema::validate(&zero_grade).unwrap_err();
        assert_eq!(svc.estimate_cost(&zero_grade), Err(expected));
    }

    #[test]
    fn test_field_order_is_not_taken_from_record() {
        // Same values inserted in reverse key order
        let mut reversed = RawRecord::new();
        for feature in Feature::ALL.iter().rev() {
            reversed.insert(feature.name().into(), copper_record()[feature.name()].clone());
        }
        let svc = service(reference_artifact());
        assert_eq!(
            svc.estimate_cost(&reversed).unwrap(),
            svc.estimate_cost(&copper_record()).unwrap()
        );
    }

    #[test]
    fn test_concurrent_requests_share_one_artifact() {
        let svc = service(reference_artifact());
        let expected = svc.estimate_cost(&copper_record()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                std::thread::spawn(move || svc.estimate_cost(&copper_record()).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_estimate_record_returns_validated_vector() {
        let svc = service(reference_artifact());
        let (features, result) = svc.estimate_record(&copper_record()).unwrap();
        assert_eq!(features.ore_grade, 1.2);
        assert_eq!(result, svc.estimate_vector(&features));
    }

    #[test]
    fn test_model_version_reported() {
        assert_eq!(service(reference_artifact()).model_version(), "v1.0.0");
    }
}
