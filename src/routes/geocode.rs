use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, GeoPoint, GeocodeQuery, GeocodeResponse, ReverseGeocodeQuery,
    ReverseGeocodeResponse,
};
use crate::routes::cities::AppState;

/// Configure geocoding routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/geocode", web::get().to(forward))
        .route("/geocode/reverse", web::get().to(reverse));
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

fn bad_gateway(message: String) -> HttpResponse {
    HttpResponse::BadGateway().json(ErrorResponse {
        error: "Geocoder unavailable".to_string(),
        message,
        status_code: 502,
    })
}

/// GET /api/v1/geocode?q=Durham, NC
async fn forward(
    state: web::Data<AppState>,
    query: web::Query<GeocodeQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let text = query.q.trim().to_string();

    if let Err(errors) = query.validate() {
        return bad_request(errors.to_string());
    }
    if text.is_empty() {
        return bad_request("q must not be blank".to_string());
    }

    match state.geocoder.search(&text).await {
        Ok(results) => {
            tracing::info!("Geocoded '{}' to {} places", text, results.len());
            HttpResponse::Ok().json(GeocodeResponse {
                query: text,
                results,
            })
        }
        Err(e) => {
            tracing::error!("Forward geocoding failed for '{}': {}", text, e);
            bad_gateway(e.to_string())
        }
    }
}

/// GET /api/v1/geocode/reverse?lat=35.994&lon=-78.8986
async fn reverse(
    state: web::Data<AppState>,
    query: web::Query<ReverseGeocodeQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request(errors.to_string());
    }

    let point = GeoPoint::new(query.lat, query.lon);

    match state.geocoder.reverse(point).await {
        Ok(display_name) => HttpResponse::Ok().json(ReverseGeocodeResponse {
            point,
            display_name,
        }),
        Err(e) => {
            tracing::error!("Reverse geocoding failed for ({}, {}): {}", point.lat, point.lon, e);
            bad_gateway(e.to_string())
        }
    }
}
