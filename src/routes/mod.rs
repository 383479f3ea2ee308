// Route exports
pub mod cities;
pub mod geocode;

use actix_web::web;

pub use cities::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(cities::configure)
            .configure(geocode::configure),
    );
}
