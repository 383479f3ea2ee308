// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeoPoint, PlaceKind, PlaceCandidate, MeasuredCandidate, RankedCity, NearbyCityRef, SortBy, CityMetrics, Metric, BoundingBox};
pub use requests::{NearbySearchRequest, CompareRequest, GeocodeQuery, ReverseGeocodeQuery, CityListQuery};
pub use responses::{NearbySearchResponse, CompareResponse, GeocodeResponse, ReverseGeocodeResponse, CityListResponse, HealthResponse, ErrorResponse};
