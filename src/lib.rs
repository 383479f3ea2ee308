//! City Scout - nearby city discovery and cost-of-living comparison
//!
//! This library finds cities around a point with great-circle distances and
//! compares a city's cost-of-living metrics against its neighbours.
//! The nearby search is a staged pipeline: measure, filter, widen, rank.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{NearbySearch, SearchOptions, SearchSession, compare_cities, distance::{distance_miles, calculate_bounding_box}};
pub use crate::models::{GeoPoint, PlaceCandidate, PlaceKind, RankedCity, CityMetrics, Metric, SortBy, NearbySearchRequest, NearbySearchResponse};
