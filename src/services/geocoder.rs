use crate::models::{BoundingBox, GeoPoint, PlaceCandidate, PlaceKind};
use crate::services::cache::{CacheKey, CacheStats, ResponseCache};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the geocoding service
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Place record as returned by a Nominatim-compatible `/search` endpoint
///
/// Coordinates arrive as strings from Nominatim but as numbers from some
/// mirrors, so both are accepted.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    lat: Value,
    lon: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, rename = "type")]
    place_type: Option<String>,
    #[serde(default)]
    addresstype: Option<String>,
}

impl NominatimPlace {
    fn into_candidate(self) -> Option<PlaceCandidate> {
        let lat = coordinate(&self.lat)?;
        let lon = coordinate(&self.lon)?;

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|d| d.split(',').next())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            })?;

        let kind = [self.addresstype.as_deref(), self.place_type.as_deref()]
            .into_iter()
            .flatten()
            .map(PlaceKind::from_tag)
            .find(|kind| *kind != PlaceKind::Other)
            .unwrap_or(PlaceKind::Other);

        Some(PlaceCandidate::new(name, lat, lon, kind))
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Parse a JSON array of place records, dropping malformed entries
fn parse_places(json: Value) -> Result<Vec<PlaceCandidate>, GeocoderError> {
    let records = match json {
        Value::Array(records) => records,
        other => {
            return Err(GeocoderError::InvalidResponse(format!(
                "Expected an array of places, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = records.len();
    let places: Vec<PlaceCandidate> = records
        .into_iter()
        .filter_map(|record| {
            serde_json::from_value::<NominatimPlace>(record)
                .ok()
                .and_then(NominatimPlace::into_candidate)
        })
        .collect();

    if places.len() < total {
        tracing::warn!("Dropped {} malformed geocoder records", total - places.len());
    }

    Ok(places)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Geocoding client
///
/// Handles all communication with the geocoding collaborator:
/// - Forward search for a typed location
/// - Area search for places inside a bounding box
/// - Reverse lookup of a clicked point
pub struct GeocoderClient {
    base_url: String,
    max_results: usize,
    client: Client,
    places_cache: ResponseCache<Vec<PlaceCandidate>>,
    reverse_cache: ResponseCache<Option<String>>,
}

impl GeocoderClient {
    /// Create a new geocoder client
    pub fn new(
        base_url: String,
        user_agent: &str,
        timeout_secs: u64,
        max_results: usize,
        cache_size: u64,
        cache_ttl_secs: u64,
    ) -> Result<Self, GeocoderError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            max_results,
            client,
            places_cache: ResponseCache::new(cache_size, cache_ttl_secs),
            reverse_cache: ResponseCache::new(cache_size, cache_ttl_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Combined statistics of the place and reverse-lookup caches
    pub async fn cache_stats(&self) -> CacheStats {
        let places = self.places_cache.stats().await;
        let reverse = self.reverse_cache.stats().await;

        CacheStats {
            enabled: places.enabled || reverse.enabled,
            entries: places.entries + reverse.entries,
        }
    }

    /// Forward search: resolve free text to candidate places
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocoderError> {
        let key = CacheKey::search(query, self.max_results);
        if let Some(places) = self.places_cache.get(&key).await {
            return Ok(places);
        }

        let url = format!(
            "{}/search?format=jsonv2&q={}&limit={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            self.max_results
        );

        let places = self.fetch_places(&url).await?;
        self.places_cache.insert(key, places.clone()).await;
        Ok(places)
    }

    /// Area search: places matching `query` inside `bbox`
    pub async fn search_area(
        &self,
        bbox: &BoundingBox,
        query: &str,
    ) -> Result<Vec<PlaceCandidate>, GeocoderError> {
        let key = CacheKey::area(bbox, query, self.max_results);
        if let Some(places) = self.places_cache.get(&key).await {
            return Ok(places);
        }

        // viewbox order is left,top,right,bottom
        let url = format!(
            "{}/search?format=jsonv2&q={}&viewbox={},{},{},{}&bounded=1&limit={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            bbox.min_lon,
            bbox.max_lat,
            bbox.max_lon,
            bbox.min_lat,
            self.max_results
        );

        let places = self.fetch_places(&url).await?;
        self.places_cache.insert(key, places.clone()).await;
        Ok(places)
    }

    /// Reverse lookup: display name of the place at `point`, if any
    pub async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocoderError> {
        let key = CacheKey::reverse(point);
        if let Some(name) = self.reverse_cache.get(&key).await {
            return Ok(name);
        }

        let url = format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}&zoom=10",
            self.base_url.trim_end_matches('/'),
            point.lat,
            point.lon
        );

        tracing::debug!("Reverse geocoding: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocoderError::ApiError(format!(
                "Reverse lookup failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        // Nominatim answers 200 with {"error": "..."} for points in the ocean
        if json.get("error").is_some() {
            self.reverse_cache.insert(key, None).await;
            return Ok(None);
        }

        let name = json
            .get("display_name")
            .and_then(|d| d.as_str())
            .map(str::to_string);

        self.reverse_cache.insert(key, name.clone()).await;
        Ok(name)
    }

    async fn fetch_places(&self, url: &str) -> Result<Vec<PlaceCandidate>, GeocoderError> {
        tracing::debug!("Geocoder request: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Geocoder request failed: {} - {}", status, body);
            return Err(GeocoderError::ApiError(format!("Search failed: {}", status)));
        }

        let json: Value = response.json().await?;
        let places = parse_places(json)?;

        tracing::debug!("Geocoder returned {} usable places", places.len());

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(url: String) -> GeocoderClient {
        GeocoderClient::new(url, "city-scout-tests", 5, 20, 100, 60).unwrap()
    }

    const DURHAM_AREA: &str = r#"[
        {"lat": "35.7796", "lon": "-78.6382", "name": "Raleigh", "display_name": "Raleigh, Wake County, North Carolina, United States", "type": "administrative", "addresstype": "city"},
        {"lat": "35.9132", "lon": "-79.0558", "name": "", "display_name": "Chapel Hill, Orange County, North Carolina, United States", "type": "town"},
        {"lat": "not a number", "lon": "-79.0", "name": "Broken"},
        {"lon": "-79.0", "name": "No Latitude"},
        {"lat": 35.9101, "lon": -79.0753, "name": "Carrboro", "type": "hamlet"}
    ]"#;

    #[test]
    fn test_parse_places_drops_malformed() {
        let json: Value = serde_json::from_str(DURHAM_AREA).unwrap();

        let places = parse_places(json).unwrap();

        assert_eq!(places.len(), 3);
        assert_eq!(places[0].name, "Raleigh");
        assert_eq!(places[0].kind, PlaceKind::City);
        assert_eq!(places[1].name, "Chapel Hill");
        assert_eq!(places[1].kind, PlaceKind::Town);
        assert_eq!(places[2].kind, PlaceKind::Other);
    }

    #[test]
    fn test_parse_places_rejects_non_array() {
        let json: Value = serde_json::from_str(r#"{"error": "bad"}"#).unwrap();
        assert!(matches!(parse_places(json), Err(GeocoderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_search_area_hits_viewbox_and_caches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "city".into()),
                Matcher::UrlEncoded("bounded".into(), "1".into()),
                Matcher::Regex("viewbox=".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DURHAM_AREA)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(server.url());
        let bbox = crate::core::distance::calculate_bounding_box(GeoPoint::new(35.994, -78.8986), 50.0);

        let first = client.search_area(&bbox, "city").await.unwrap();
        let second = client.search_area(&bbox, "city").await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(client.cache_stats().await, CacheStats { enabled: true, entries: 1 });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_propagates_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(server.url());

        let result = client.search("Durham").await;
        assert!(matches!(result, Err(GeocoderError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/reverse")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"display_name": "Durham, Durham County, North Carolina, United States"}"#)
            .create_async()
            .await;

        let client = client_for(server.url());

        let name = client.reverse(GeoPoint::new(35.994, -78.8986)).await.unwrap();
        assert_eq!(name.as_deref(), Some("Durham, Durham County, North Carolina, United States"));
    }

    #[tokio::test]
    async fn test_reverse_lookup_in_ocean() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/reverse")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Unable to geocode"}"#)
            .create_async()
            .await;

        let client = client_for(server.url());

        assert_eq!(client.reverse(GeoPoint::new(30.0, -40.0)).await.unwrap(), None);
    }
}
