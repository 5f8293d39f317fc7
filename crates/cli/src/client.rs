//! API client for communicating with the cost estimator service

use anyhow::{Context, Result};
use estimator_lib::{predictor::ArtifactInfo, FeatureVector, PredictionResult, RawRecord};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the cost estimator
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::decode(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => match err.field {
                    Some(field) => anyhow::bail!("{} (field: {})", err.error, field),
                    None => anyhow::bail!("API error ({}): {}", status, err.error),
                },
                Err(_) => anyhow::bail!("API error ({}): {}", status, body),
            }
        }

        response.json().await.context("Failed to parse response")
    }

    /// Request an estimate for a raw record
    pub async fn estimate(&self, record: &RawRecord) -> Result<EstimateResponse> {
        self.post("api/v1/estimate", record).await
    }

    /// Fetch information about the loaded model artifact
    pub async fn model_info(&self) -> Result<ArtifactInfo> {
        self.get("api/v1/model").await
    }
}

// API response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub features: FeatureVector,
    pub estimate: f64,
    pub uncertainty: f64,
    pub model_version: String,
    pub display: String,
}

impl EstimateResponse {
    pub fn result(&self) -> PredictionResult {
        PredictionResult {
            estimate: self.estimate,
            uncertainty: self.uncertainty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
