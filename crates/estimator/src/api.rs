//! HTTP API for cost estimation, health checks and Prometheus metrics

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use estimator_lib::{
    export::ExportRecord,
    predictor::ArtifactInfo,
    reference::{self, ReferenceMetal},
    schema::{self, FieldSpec},
    thermo::{self, GibbsCurve, DEFAULT_CURVE_POINTS, DEFAULT_T_MAX, DEFAULT_T_MIN},
    EstimationService, Feature, FeatureVector, ModelArtifact, RawRecord, ReportFormatter,
    SchemaError,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state
pub struct AppState {
    pub service: EstimationService,
    pub artifact: Arc<ModelArtifact>,
    pub formatter: ReportFormatter,
}

impl AppState {
    pub fn new(
        service: EstimationService,
        artifact: Arc<ModelArtifact>,
        formatter: ReportFormatter,
    ) -> Self {
        Self {
            service,
            artifact,
            formatter,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_version: String,
}

/// Successful estimate
#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub features: FeatureVector,
    pub estimate: f64,
    pub uncertainty: f64,
    pub model_version: String,
    /// Currency-formatted estimate with its ± band
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API error mapped to an HTTP status
pub enum ApiError {
    Schema(SchemaError),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::Schema(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Schema(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: err.to_string(),
                    code: "schema_error".to_string(),
                    field: Some(err.field().to_string()),
                },
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: msg,
                    code: "not_found".to_string(),
                    field: None,
                },
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    code: "bad_request".to_string(),
                    field: None,
                },
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: msg,
                    code: "internal".to_string(),
                    field: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_version: state.service.model_version().to_string(),
    })
}

/// Prometheus metrics endpoint
async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).map_err(|e| {
        error!(error = %e, "Failed to encode metrics");
        ApiError::Internal("failed to encode metrics".to_string())
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        buffer,
    ))
}

async fn get_schema() -> Json<Vec<FieldSpec>> {
    Json(schema::describe())
}

async fn get_model(State(state): State<Arc<AppState>>) -> Json<ArtifactInfo> {
    Json(state.artifact.info())
}

async fn list_metals() -> Json<&'static [ReferenceMetal]> {
    Json(reference::REFERENCE_METALS)
}

async fn get_metal(Path(name): Path<String>) -> Result<Json<ReferenceMetal>, ApiError> {
    reference::find(&name)
        .copied()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("unknown metal '{}'", name)))
}

/// Decode a request body into a raw record.
///
/// Field values are kept raw until the object itself has parsed, so a value
/// that is not representable as f64 (e.g. `1e999`) is reported against its
/// field instead of failing the whole body.
fn decode_record(service: &EstimationService, body: &[u8]) -> Result<RawRecord, ApiError> {
    let fields: BTreeMap<String, Box<RawValue>> = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("request body must be a JSON object: {}", e)))?;

    let mut record = RawRecord::new();
    for (name, raw) in fields {
        match serde_json::from_str(raw.get()) {
            Ok(value) => {
                record.insert(name, value);
            }
            Err(_) => {
                let err = match Feature::from_name(&name) {
                    Some(feature) => SchemaError::NonNumeric {
                        field: feature.name(),
                        value: raw.get().to_string(),
                    },
                    None => SchemaError::UnknownField(name),
                };
                service.reject(&err);
                return Err(err.into());
            }
        }
    }

    Ok(record)
}

async fn estimate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<EstimateResponse>, ApiError> {
    let raw = decode_record(&state.service, &body)?;
    let (features, result) = state.service.estimate_record(&raw)?;

    Ok(Json(EstimateResponse {
        features,
        estimate: result.estimate,
        uncertainty: result.uncertainty,
        model_version: state.service.model_version().to_string(),
        display: state.formatter.format(&result),
    }))
}

async fn estimate_export(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let raw = decode_record(&state.service, &body)?;
    let (features, result) = state.service.estimate_record(&raw)?;
    let body = ExportRecord::new(features, &result).to_delimited();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"estimate.csv\"",
            ),
        ],
        body,
    ))
}

#[derive(Debug, Deserialize)]
pub struct CurveQuery {
    pub delta_h: f64,
    pub delta_s: f64,
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
    pub points: Option<usize>,
}

async fn thermo_curve(Query(q): Query<CurveQuery>) -> Result<Json<GibbsCurve>, ApiError> {
    thermo::gibbs_curve(
        q.delta_h,
        q.delta_s,
        q.t_min.unwrap_or(DEFAULT_T_MIN),
        q.t_max.unwrap_or(DEFAULT_T_MAX),
        q.points.unwrap_or(DEFAULT_CURVE_POINTS),
    )
    .map(Json)
    .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/api/v1/schema", get(get_schema))
        .route("/api/v1/model", get(get_model))
        .route("/api/v1/metals", get(list_metals))
        .route("/api/v1/metals/:name", get(get_metal))
        .route("/api/v1/estimate", post(estimate))
        .route("/api/v1/estimate/export", post(estimate_export))
        .route("/api/v1/thermo/curve", get(thermo_curve))
        .with_state(state)
}

/// Start the API server, stopping when `shutdown` resolves
pub async fn serve(
    port: u16,
    state: Arc<AppState>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
