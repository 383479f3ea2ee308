use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.lon, point.lat)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

/// Place classification reported by the geocoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    City,
    Town,
    Village,
    #[serde(other)]
    Other,
}

impl PlaceKind {
    /// Map a geocoder type/class tag onto a kind
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "city" => PlaceKind::City,
            "town" => PlaceKind::Town,
            "village" => PlaceKind::Village,
            _ => PlaceKind::Other,
        }
    }
}

impl std::fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceKind::City => write!(f, "city"),
            PlaceKind::Town => write!(f, "town"),
            PlaceKind::Village => write!(f, "village"),
            PlaceKind::Other => write!(f, "other"),
        }
    }
}

/// Raw place record produced by the geocoding collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    #[serde(flatten)]
    pub point: GeoPoint,
    #[serde(default = "default_kind")]
    pub kind: PlaceKind,
}

fn default_kind() -> PlaceKind {
    PlaceKind::Other
}

impl PlaceCandidate {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, kind: PlaceKind) -> Self {
        Self {
            name: name.into(),
            point: GeoPoint::new(lat, lon),
            kind,
        }
    }
}

/// Candidate that passed the filter, paired with its distance from the origin
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredCandidate {
    pub candidate: PlaceCandidate,
    pub distance_miles: f64,
}

/// Nearby city ready for presentation, distance rounded to 0.1 mile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCity {
    pub name: String,
    pub distance: f64,
    pub lat: f64,
    pub lon: f64,
    pub kind: PlaceKind,
}

/// `{name, distance}` pair sent to the comparison backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyCityRef {
    pub name: String,
    pub distance: f64,
}

impl From<&RankedCity> for NearbyCityRef {
    fn from(city: &RankedCity) -> Self {
        Self {
            name: city.name.clone(),
            distance: city.distance,
        }
    }
}

/// Ranking order for nearby cities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Distance,
    Name,
}

/// Cost-of-living metrics for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMetrics {
    pub name: String,
    pub average_salary: f64,
    pub average_rent: f64,
    pub cost_of_living: f64,
    pub home_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public transit score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_score: Option<u8>,
    /// Dining cost on a 1-4 scale ($ to $$$$)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_price: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunny_days: Option<u16>,
}

/// One comparable metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AverageSalary,
    AverageRent,
    CostOfLiving,
    HomePrice,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::AverageSalary,
        Metric::AverageRent,
        Metric::CostOfLiving,
        Metric::HomePrice,
    ];

    /// Salary is the only metric where an increase is good news
    pub fn higher_is_better(self) -> bool {
        matches!(self, Metric::AverageSalary)
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::AverageSalary => "Average Salary",
            Metric::AverageRent => "Average Rent",
            Metric::CostOfLiving => "Cost of Living",
            Metric::HomePrice => "Median Home Price",
        }
    }

    pub fn value(self, city: &CityMetrics) -> f64 {
        match self {
            Metric::AverageSalary => city.average_salary,
            Metric::AverageRent => city.average_rent,
            Metric::CostOfLiving => city.cost_of_living,
            Metric::HomePrice => city.home_price,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "average_salary" | "salary" => Some(Metric::AverageSalary),
            "average_rent" | "rent" => Some(Metric::AverageRent),
            "cost_of_living" => Some(Metric::CostOfLiving),
            "home_price" => Some(Metric::HomePrice),
            _ => None,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
