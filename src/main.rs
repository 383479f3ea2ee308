use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use city_scout::config::{ComparisonSettings, ProviderKind, Settings};
use city_scout::routes::{self, AppState};
use city_scout::services::{ComparisonClient, GeocoderClient, MetricsProvider, StaticDataset};
use std::sync::Arc;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn build_metrics_provider(settings: &ComparisonSettings, dataset: Arc<StaticDataset>) -> MetricsProvider {
    if settings.provider == ProviderKind::Static {
        return MetricsProvider::Static(dataset);
    }

    let Some(endpoint) = settings.endpoint.clone() else {
        warn!("Comparison provider is 'backend' but no endpoint is set, using built-in data");
        return MetricsProvider::Static(dataset);
    };

    match ComparisonClient::new(endpoint.clone(), settings.timeout_secs.unwrap_or(10)) {
        Ok(client) => {
            info!("Comparison backend at {}", endpoint);
            MetricsProvider::Backend(client)
        }
        Err(e) => {
            warn!("Failed to build comparison client ({}), using built-in data", e);
            MetricsProvider::Static(dataset)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration comes first so logging can honour it
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting City Scout service...");

    let geocoder = GeocoderClient::new(
        settings.geocoder.endpoint.clone(),
        &settings.geocoder.user_agent,
        settings.geocoder.timeout_secs,
        settings.geocoder.max_results,
        settings.geocoder.cache_size,
        settings.geocoder.cache_ttl_secs,
    )
    .map_err(|e| {
        error!("Failed to build geocoder client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Geocoder client initialized ({}, cache: {} entries, TTL: {}s)",
        geocoder.base_url(),
        settings.geocoder.cache_size,
        settings.geocoder.cache_ttl_secs
    );

    let dataset = Arc::new(StaticDataset::builtin());
    let metrics = build_metrics_provider(&settings.comparison, dataset.clone());

    info!("Using {} metrics provider", metrics.name());

    let search = settings.search.to_nearby_search();

    info!(
        "Nearby search defaults: {} - {} mi, limit {}",
        search.defaults().min_miles,
        search.defaults().max_miles,
        search.defaults().limit
    );

    // Build application state
    let app_state = AppState {
        geocoder: Arc::new(geocoder),
        metrics: Arc::new(metrics),
        dataset,
        search,
        area_query: settings.geocoder.area_query.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
