use serde::Deserialize;
use std::time::Duration;

use crate::error::{PredictorError, Result};
use crate::predictor::PredictionResponse;
use crate::record::StudentRecord;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a remote prediction service exposing `POST /predict`.
///
/// Each request has a single overall timeout and is never retried; a failed
/// or stale prediction has no cached fallback.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictorError::Remote(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict(&self, record: &StudentRecord) -> Result<PredictionResponse> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "prediction request failed");
                PredictorError::Remote(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| PredictorError::Remote(format!("invalid prediction body: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        tracing::warn!(%url, status = status.as_u16(), %message, "prediction service rejected request");

        Err(PredictorError::RemoteStatus {
            status: status.as_u16(),
            message,
        })
    }
}
