//! Prediction service REST client
//!
//! HTTP client for the external water-level prediction API. Four
//! operations, no retries: a failed call surfaces immediately so the
//! controller can mark the affected slot as failed.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::series::{ComparisonPoint, LevelRecord, PredictionPoint};
use crate::state::{validate_forecast_days, validate_test_days, StateError};

/// Prediction service client
pub struct PredictionClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the prediction service client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl PredictionClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// List the monitored cities
    ///
    /// An empty list means no cities are configured on the service; that is
    /// a valid answer, not an error.
    pub async fn list_cities(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(self.url("/api/cities"))
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Fetch the full historical level table for a city
    ///
    /// The service answers with per-date records keyed by city column; if no
    /// record carries a column for `city`, the payload cannot be the one we
    /// asked for and is reported as invalid.
    pub async fn fetch_historical(&self, city: &str) -> Result<Vec<LevelRecord>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/data/{city}")))
            .send()
            .await
            .map_err(transport_error)?;

        let records: Vec<LevelRecord> = decode(response).await?;

        if !records.is_empty() && !records.iter().any(|r| r.has_city(city)) {
            return Err(ClientError::InvalidResponse(format!(
                "historical records carry no column for city '{city}'"
            )));
        }

        Ok(records)
    }

    /// Request a forecast for the next `days` days
    ///
    /// The service decides how many points it actually returns; callers
    /// must not assume the length equals `days`.
    pub async fn request_prediction(
        &self,
        city: &str,
        days: u16,
    ) -> Result<Vec<PredictionPoint>, ClientError> {
        validate_forecast_days(days)?;

        let response = self
            .client
            .post(self.url(&format!("/api/predict/{city}")))
            .json(&PredictRequest { days })
            .send()
            .await
            .map_err(transport_error)?;

        let decoded: PredictResponse = decode(response).await?;
        Ok(decoded.predictions)
    }

    /// Request a prediction/actual comparison over the last `test_days` days
    pub async fn request_comparison(
        &self,
        city: &str,
        test_days: u16,
    ) -> Result<Vec<ComparisonPoint>, ClientError> {
        validate_test_days(test_days)?;

        let response = self
            .client
            .post(self.url(&format!("/api/compare/{city}")))
            .json(&CompareRequest { test_days })
            .send()
            .await
            .map_err(transport_error)?;

        let decoded: CompareResponse = decode(response).await?;
        Ok(decoded.comparison)
    }
}

/// Decode a response body, mapping non-2xx statuses to [`ClientError::Service`]
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        // The service reports errors as {"error": "..."} JSON
        let message = serde_json::from_str::<ServiceErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(ClientError::Service {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

fn transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Network(error)
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct PredictRequest {
    days: u16,
}

#[derive(Debug, Serialize)]
struct CompareRequest {
    test_days: u16,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<PredictionPoint>,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    comparison: Vec<ComparisonPoint>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

// ============================================
// Errors
// ============================================

/// Errors from the prediction service client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request timeout")]
    Timeout,

    #[error("service error {status}: {message}")]
    Service { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    DaysOutOfRange(#[from] StateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_url_normalizes_trailing_slash() {
        let client = PredictionClient::new(ClientConfig {
            base_url: "http://example.com/".to_string(),
            ..ClientConfig::default()
        });
        assert_eq!(client.url("/api/cities"), "http://example.com/api/cities");
    }

    #[tokio::test]
    async fn test_out_of_range_days_rejected_before_any_request() {
        // Deliberately unroutable; the request must never be sent.
        let client = PredictionClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        });

        let err = client.request_prediction("caicara", 0).await.unwrap_err();
        assert!(matches!(err, ClientError::DaysOutOfRange(_)));

        let err = client.request_comparison("caicara", 15).await.unwrap_err();
        assert!(matches!(err, ClientError::DaysOutOfRange(_)));
    }

    #[test]
    fn test_prediction_response_wire_format() {
        let json = r#"{
            "city": "caicara",
            "predictions": [
                {"fecha": "2024-03-08", "predicted_level": 21.4},
                {"fecha": "2024-03-09", "predicted_level": 21.9}
            ]
        }"#;
        let decoded: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.predictions.len(), 2);
        assert_eq!(decoded.predictions[0].predicted_level, 21.4);
    }

    #[test]
    fn test_comparison_response_wire_format() {
        let json = r#"{
            "comparison": [
                {"fecha": "2024-03-01", "actual": 20.0, "predicted": 19.5}
            ]
        }"#;
        let decoded: CompareResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.comparison.len(), 1);
        assert_eq!(decoded.comparison[0].actual, 20.0);
    }

    #[test]
    fn test_service_error_body_parses() {
        let body: ServiceErrorBody =
            serde_json::from_str(r#"{"error": "Ciudad no encontrada"}"#).unwrap();
        assert_eq!(body.error, "Ciudad no encontrada");
    }
}
