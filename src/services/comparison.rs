use crate::models::{CityMetrics, NearbyCityRef};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the comparison backend
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Body sent to the comparison backend
#[derive(Debug, Serialize)]
struct ComparisonPayload<'a> {
    #[serde(rename = "mainCity")]
    main_city: &'a str,
    #[serde(rename = "nearbyCities")]
    nearby_cities: &'a [NearbyCityRef],
}

/// Metrics for the main city and the neighbours the backend knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonData {
    #[serde(rename = "mainCity")]
    pub main_city: CityMetrics,
    #[serde(rename = "nearbyCities", default)]
    pub nearby_cities: Vec<CityMetrics>,
}

/// Comparison-data backend client
pub struct ComparisonClient {
    endpoint: String,
    client: Client,
}

impl ComparisonClient {
    pub fn new(endpoint: String, timeout_secs: u64) -> Result<Self, ComparisonError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { endpoint, client })
    }

    /// Fetch metrics for `main_city` and its neighbours
    pub async fn fetch(
        &self,
        main_city: &str,
        nearby_cities: &[NearbyCityRef],
    ) -> Result<ComparisonData, ComparisonError> {
        let payload = ComparisonPayload {
            main_city,
            nearby_cities,
        };

        tracing::debug!(
            "Requesting comparison data for {} with {} neighbours from {}",
            main_city,
            nearby_cities.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Comparison backend failed for {}: {} - {}", main_city, status, body);
            return Err(ComparisonError::ApiError(format!(
                "Failed to fetch comparison data: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        serde_json::from_value(json)
            .map_err(|e| ComparisonError::InvalidResponse(format!("Failed to parse comparison data: {}", e)))
    }
}
