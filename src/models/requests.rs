use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{NearbyCityRef, PlaceKind, SortBy};
use crate::core::catalog::SortOrder;

/// Request to find cities near an origin
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub radius_miles: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub min_miles: Option<f64>,
    #[serde(default)]
    pub kinds: Option<Vec<PlaceKind>>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    /// Free-text hint forwarded to the geocoder's area search
    #[serde(default)]
    pub query: Option<String>,
    /// Caller-supplied candidates; skips the geocoder when present.
    /// Kept as raw JSON so one malformed record does not reject the request.
    #[serde(default)]
    pub candidates: Option<Vec<serde_json::Value>>,
}

/// Request to compare a city against its neighbours
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "main_city", rename = "mainCity")]
    pub main_city: String,
    #[serde(default)]
    #[serde(alias = "nearby_cities", rename = "nearbyCities")]
    pub nearby_cities: Vec<NearbyCityRef>,
}

/// Forward geocoding query string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeocodeQuery {
    #[validate(length(min = 1))]
    pub q: String,
}

/// Reverse geocoding query string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReverseGeocodeQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

/// Filters and ordering for the static city list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityListQuery {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub max_rent: Option<f64>,
    #[serde(default)]
    pub max_cost_of_living: Option<f64>,
    #[serde(default)]
    pub max_home_price: Option<f64>,
    #[serde(default)]
    pub min_salary: Option<f64>,
    #[serde(default)]
    pub min_transit_score: Option<u8>,
    #[serde(default)]
    pub max_restaurant_price: Option<u8>,
    #[serde(default)]
    pub min_sunny_days: Option<u16>,
}
