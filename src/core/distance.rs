use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two points in miles (Haversine)
///
/// Symmetric in its arguments and exactly 0 for identical points.
/// Out-of-range coordinates are not checked here; callers validate upstream.
#[inline]
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Round a distance to one decimal place
#[inline]
pub fn round_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

/// Bounding box that contains every point within `radius_miles` of `center`
///
/// Used to build area queries for the geocoder; it over-covers the circle,
/// so results still go through the exact distance filter.
pub fn calculate_bounding_box(center: GeoPoint, radius_miles: f64) -> BoundingBox {
    let angular = radius_miles.max(0.0) / EARTH_RADIUS_MILES;
    let lat_delta = angular.to_degrees();

    // Widest longitude reached by the circle; it spans every meridian once it covers a pole
    let reach = angular.sin() / center.lat.to_radians().cos().abs();
    let lon_delta = if angular >= std::f64::consts::FRAC_PI_2 || !reach.is_finite() || reach >= 1.0 {
        180.0
    } else {
        reach.asin().to_degrees()
    };

    BoundingBox {
        min_lat: (center.lat - lat_delta).max(-90.0),
        max_lat: (center.lat + lat_delta).min(90.0),
        min_lon: (center.lon - lon_delta).max(-180.0),
        max_lon: (center.lon + lon_delta).min(180.0),
    }
}
