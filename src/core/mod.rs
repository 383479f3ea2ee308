// Core algorithm exports
pub mod catalog;
pub mod comparison;
pub mod distance;
pub mod filters;
pub mod nearby;
pub mod ranking;

pub use catalog::{normalize_city_name, select_cities, CatalogSort, CityFilter, SortOrder};
pub use comparison::{compare_cities, compare_city, percent_change, CityComparison, MetricDelta, Trend};
pub use distance::{distance_miles, calculate_bounding_box, round_tenth};
pub use filters::{filter_candidates, merge_unique};
pub use nearby::{NearbySearch, NearbyResult, SearchLimits, SearchOptions, SearchOverrides, SearchSession};
pub use ranking::rank;
