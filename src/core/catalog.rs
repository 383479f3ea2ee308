use serde::{Deserialize, Serialize};
use crate::models::{CityMetrics, Metric};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Attribute a city list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSort {
    Metric(Metric),
    TransitScore,
    RestaurantPrice,
    SunnyDays,
}

impl CatalogSort {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(metric) = Metric::parse(raw) {
            return Some(CatalogSort::Metric(metric));
        }
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "transit_score" | "transit" => Some(CatalogSort::TransitScore),
            "restaurant_price" | "dining" => Some(CatalogSort::RestaurantPrice),
            "sunny_days" | "sunshine" => Some(CatalogSort::SunnyDays),
            _ => None,
        }
    }

    /// Sort key for `city`; `None` when the record lacks the attribute
    pub fn key(self, city: &CityMetrics) -> Option<f64> {
        match self {
            CatalogSort::Metric(metric) => Some(metric.value(city)),
            CatalogSort::TransitScore => city.transit_score.map(f64::from),
            CatalogSort::RestaurantPrice => city.restaurant_price.map(f64::from),
            CatalogSort::SunnyDays => city.sunny_days.map(f64::from),
        }
    }
}

/// Upper/lower bounds on city attributes; unset bounds accept everything
///
/// A set bound on an optional attribute rejects records without it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CityFilter {
    pub max_rent: Option<f64>,
    pub max_cost_of_living: Option<f64>,
    pub max_home_price: Option<f64>,
    pub min_salary: Option<f64>,
    pub min_transit_score: Option<u8>,
    pub max_restaurant_price: Option<u8>,
    pub min_sunny_days: Option<u16>,
}

impl CityFilter {
    #[inline]
    pub fn matches(&self, city: &CityMetrics) -> bool {
        self.max_rent.map_or(true, |max| city.average_rent <= max)
            && self.max_cost_of_living.map_or(true, |max| city.cost_of_living <= max)
            && self.max_home_price.map_or(true, |max| city.home_price <= max)
            && self.min_salary.map_or(true, |min| city.average_salary >= min)
            && self.min_transit_score.map_or(true, |min| city.transit_score.is_some_and(|v| v >= min))
            && self.max_restaurant_price.map_or(true, |max| city.restaurant_price.is_some_and(|v| v <= max))
            && self.min_sunny_days.map_or(true, |min| city.sunny_days.is_some_and(|v| v >= min))
    }
}

/// Filter city records, then stable-sort them by `sort_by` if given
///
/// Records missing the sort attribute go last in either order.
pub fn select_cities(
    cities: &[CityMetrics],
    filter: &CityFilter,
    sort_by: Option<CatalogSort>,
    order: SortOrder,
) -> Vec<CityMetrics> {
    let mut selected: Vec<CityMetrics> = cities
        .iter()
        .filter(|city| filter.matches(city))
        .cloned()
        .collect();

    if let Some(sort) = sort_by {
        selected.sort_by(|a, b| match (sort.key(a), sort.key(b)) {
            (Some(x), Some(y)) => match order {
                SortOrder::Asc => x.total_cmp(&y),
                SortOrder::Desc => y.total_cmp(&x),
            },
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    selected
}

/// Canonical form used to match city names across collaborators
pub fn normalize_city_name(name: &str) -> String {
    name.split(',')
        .next()
        .unwrap_or("")
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
