use serde::{Deserialize, Serialize};
use crate::core::comparison::CityComparison;
use crate::models::domain::{CityMetrics, GeoPoint, PlaceCandidate, RankedCity};
use crate::services::cache::CacheStats;

/// Response for the nearby cities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchResponse {
    pub search_id: String,
    pub origin: GeoPoint,
    pub cities: Vec<RankedCity>,
    pub total_candidates: usize,
    pub widened: bool,
}

/// Response for the comparison endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub main_city: String,
    pub comparisons: Vec<CityComparison>,
    /// Requested neighbours the provider had no metrics for
    pub missing: Vec<String>,
}

/// Forward geocoding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub query: String,
    pub results: Vec<PlaceCandidate>,
}

/// Reverse geocoding response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocodeResponse {
    pub point: GeoPoint,
    pub display_name: Option<String>,
}

/// Static city list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityListResponse {
    pub cities: Vec<CityMetrics>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub geocoder_cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
