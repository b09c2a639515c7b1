//! HTTP API Client
//!
//! Functions for communicating with the water-level prediction REST API.

use gloo_net::http::Request;

use hydrosight::series::{ComparisonPoint, LevelRecord, PredictionPoint};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Get the API base URL from local storage or use default
///
/// Setting `hydrosight_api_url` in local storage points the dashboard at a
/// different service without rebuilding; there is no module-level mutable
/// base.
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("hydrosight_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<PredictionPoint>,
}

#[derive(Debug, serde::Deserialize)]
struct CompareResponse {
    #[serde(default)]
    comparison: Vec<ComparisonPoint>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: String,
}

// ============ API Functions ============

/// Fetch the monitored city list
pub async fn fetch_cities() -> Result<Vec<String>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/cities", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await
            .unwrap_or(ApiError { error: "Unknown error".to_string() });
        return Err(error.error);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the historical level table for a city
pub async fn fetch_historical(city: &str) -> Result<Vec<LevelRecord>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/data/{}", api_base, city))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await
            .unwrap_or(ApiError { error: "Unknown error".to_string() });
        return Err(error.error);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Request a forecast for the next `days` days
pub async fn request_prediction(city: &str, days: u16) -> Result<Vec<PredictionPoint>, String> {
    #[derive(serde::Serialize)]
    struct PredictRequest {
        days: u16,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/predict/{}", api_base, city))
        .json(&PredictRequest { days })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await
            .unwrap_or(ApiError { error: "Unknown error".to_string() });
        return Err(error.error);
    }

    let result: PredictResponse = response.json().await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.predictions)
}

/// Request a prediction/actual comparison over the last `test_days` days
pub async fn request_comparison(city: &str, test_days: u16) -> Result<Vec<ComparisonPoint>, String> {
    #[derive(serde::Serialize)]
    struct CompareRequest {
        test_days: u16,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/compare/{}", api_base, city))
        .json(&CompareRequest { test_days })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await
            .unwrap_or(ApiError { error: "Unknown error".to_string() });
        return Err(error.error);
    }

    let result: CompareResponse = response.json().await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.comparison)
}
