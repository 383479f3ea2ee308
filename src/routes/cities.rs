use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    CityListQuery, CityListResponse, CityMetrics, CompareRequest, CompareResponse, ErrorResponse,
    GeoPoint, HealthResponse, NearbySearchRequest, NearbySearchResponse, PlaceCandidate,
};
use crate::services::{GeocoderClient, GeocoderError, MetricsError, MetricsProvider, StaticDataset};
use crate::core::{
    calculate_bounding_box, compare_cities, merge_unique, normalize_city_name, select_cities,
    CatalogSort, CityFilter, NearbyResult, NearbySearch, SearchOptions, SearchOverrides, SearchSession,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<GeocoderClient>,
    pub metrics: Arc<MetricsProvider>,
    pub dataset: Arc<StaticDataset>,
    pub search: NearbySearch,
    /// Query text used for area searches when the request gives none
    pub area_query: String,
}

/// Configure all city-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/cities", web::get().to(list_cities))
        .route("/cities/nearby", web::post().to(find_nearby))
        .route("/cities/compare", web::post().to(compare));
}

fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };
    match status {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        502 => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        geocoder_cache: state.geocoder.cache_stats().await,
    })
}

/// Find nearby cities endpoint
///
/// POST /api/v1/cities/nearby
///
/// Request body:
/// ```json
/// {
///   "lat": 35.994,
///   "lon": -78.8986,
///   "radiusMiles": 150,
///   "sortBy": "distance",
///   "limit": 5,
///   "candidates": [{"name": "Raleigh", "lat": 35.7796, "lon": -78.6382, "kind": "city"}]
/// }
/// ```
/// Without `candidates` the geocoder is queried for the area around the origin.
async fn find_nearby(
    state: web::Data<AppState>,
    req: web::Json<NearbySearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby search: {:?}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let origin = GeoPoint::new(req.lat, req.lon);
    let options = state.search.resolve(&SearchOverrides {
        radius_miles: req.radius_miles,
        min_miles: req.min_miles,
        kinds: req.kinds,
        sort_by: req.sort_by,
        limit: req.limit.map(usize::from),
    });

    tracing::info!(
        "Nearby search around ({}, {}) within {} mi, limit {}",
        origin.lat,
        origin.lon,
        options.max_miles,
        options.limit
    );

    let session = match req.candidates {
        Some(raw) => {
            let candidates = parse_inline_candidates(raw);
            SearchSession::start(&state.search, origin, candidates, options)
        }
        None => {
            let query = req
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .unwrap_or(state.area_query.as_str());

            match search_with_geocoder(&state, origin, options, query).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!("Geocoder area search failed: {}", e);
                    return error_response(502, "Geocoder unavailable", e.to_string());
                }
            }
        }
    };

    let result = session.result();

    tracing::info!(
        "Returning {} nearby cities (from {} candidates, widened: {})",
        result.cities.len(),
        result.total_candidates,
        result.widened
    );

    HttpResponse::Ok().json(NearbySearchResponse {
        search_id: session.id().to_string(),
        origin: session.origin(),
        cities: session.cities().to_vec(),
        total_candidates: result.total_candidates,
        widened: result.widened,
    })
}

/// Decode caller-supplied candidates one by one, dropping the malformed ones
fn parse_inline_candidates(raw: Vec<serde_json::Value>) -> Vec<PlaceCandidate> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<PlaceCandidate>(value) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::warn!("Dropping malformed candidate: {}", e);
                None
            }
        })
        .collect()
}

/// Run the nearby pipeline against the geocoder's area search
///
/// A widened retry that fails is logged and the narrower results are kept.
async fn search_with_geocoder(
    state: &AppState,
    origin: GeoPoint,
    options: SearchOptions,
    query: &str,
) -> Result<SearchSession, GeocoderError> {
    let bbox = calculate_bounding_box(origin, options.max_miles);
    let mut candidates = state.geocoder.search_area(&bbox, query).await?;
    let mut measured = state.search.collect(origin, &candidates, &options);
    let mut widened = false;

    if let Some(wider) = state.search.widened(&options, measured.len()) {
        tracing::debug!(
            "Only {} cities within {} mi, widening to {} mi",
            measured.len(),
            options.max_miles,
            wider.max_miles
        );

        let wider_bbox = calculate_bounding_box(origin, wider.max_miles);
        match state.geocoder.search_area(&wider_bbox, query).await {
            Ok(extra) => {
                let extra_measured = state.search.collect(origin, &extra, &wider);
                measured = merge_unique(measured, extra_measured);
                for candidate in extra {
                    if !candidates.contains(&candidate) {
                        candidates.push(candidate);
                    }
                }
                widened = true;
            }
            Err(e) => {
                tracing::warn!("Widened search failed, keeping {} results: {}", measured.len(), e);
            }
        }
    }

    let result = NearbyResult {
        total_candidates: candidates.len(),
        cities: state.search.finish(measured, &options),
        widened,
    };

    Ok(SearchSession::from_result(origin, candidates, options, result))
}

/// Compare a city with its neighbours
///
/// POST /api/v1/cities/compare
///
/// Request body:
/// ```json
/// {
///   "mainCity": "New York",
///   "nearbyCities": [{"name": "Boston", "distance": 190.2}]
/// }
/// ```
async fn compare(
    state: web::Data<AppState>,
    req: web::Json<CompareRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    tracing::info!(
        "Comparing {} with {} nearby cities via {} provider",
        req.main_city,
        req.nearby_cities.len(),
        state.metrics.name()
    );

    let data = match state.metrics.fetch(&req.main_city, &req.nearby_cities).await {
        Ok(data) => data,
        Err(MetricsError::UnknownCity(name)) => {
            return error_response(404, "Unknown city", format!("No metrics available for {}", name));
        }
        Err(e) => {
            tracing::error!("Failed to fetch comparison data for {}: {}", req.main_city, e);
            return error_response(502, "Comparison backend unavailable", e.to_string());
        }
    };

    let others: Vec<(CityMetrics, Option<f64>)> = data
        .nearby_cities
        .into_iter()
        .map(|city| {
            let wanted = normalize_city_name(&city.name);
            let distance = req
                .nearby_cities
                .iter()
                .find(|r| normalize_city_name(&r.name) == wanted)
                .map(|r| r.distance);
            (city, distance)
        })
        .collect();

    let missing: Vec<String> = req
        .nearby_cities
        .iter()
        .filter(|r| {
            let wanted = normalize_city_name(&r.name);
            !others.iter().any(|(city, _)| normalize_city_name(&city.name) == wanted)
        })
        .map(|r| r.name.clone())
        .collect();

    if !missing.is_empty() {
        tracing::debug!("No metrics for {} requested cities: {:?}", missing.len(), missing);
    }

    HttpResponse::Ok().json(CompareResponse {
        comparisons: compare_cities(&data.main_city, &others),
        main_city: data.main_city.name,
        missing,
    })
}

/// List the built-in city records
///
/// GET /api/v1/cities?sortBy=home_price&order=desc&maxRent=2500
async fn list_cities(
    state: web::Data<AppState>,
    query: web::Query<CityListQuery>,
) -> impl Responder {
    let sort_by = match query.sort_by.as_deref() {
        None => None,
        Some(raw) => match CatalogSort::parse(raw) {
            Some(sort) => Some(sort),
            None => {
                return error_response(
                    400,
                    "Invalid sort key",
                    "sortBy must be one of: average_salary, average_rent, cost_of_living, home_price, transit_score, restaurant_price, sunny_days".to_string(),
                );
            }
        },
    };

    let filter = CityFilter {
        max_rent: query.max_rent,
        max_cost_of_living: query.max_cost_of_living,
        max_home_price: query.max_home_price,
        min_salary: query.min_salary,
        min_transit_score: query.min_transit_score,
        max_restaurant_price: query.max_restaurant_price,
        min_sunny_days: query.min_sunny_days,
    };

    let cities = select_cities(
        state.dataset.all(),
        &filter,
        sort_by,
        query.order.unwrap_or_default(),
    );

    HttpResponse::Ok().json(CityListResponse {
        total: cities.len(),
        cities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceKind;

    #[test]
    fn test_parse_inline_candidates_drops_bad_records() {
        let raw = vec![
            serde_json::json!({"name": "Raleigh", "lat": 35.7796, "lon": -78.6382, "kind": "city"}),
            serde_json::json!({"name": "No Coordinates"}),
            serde_json::json!({"name": "Text Latitude", "lat": "north", "lon": -78.0}),
            serde_json::json!({"name": "Apex", "lat": 35.7327, "lon": -78.8503}),
        ];

        let candidates = parse_inline_candidates(raw);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, PlaceKind::City);
        assert_eq!(candidates[1].kind, PlaceKind::Other);
    }

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            geocoder_cache: Default::default(),
        };

        assert_eq!(response.status, "healthy");
    }
}
