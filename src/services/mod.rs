// Service exports
pub mod cache;
pub mod comparison;
pub mod geocoder;
pub mod metrics;
pub mod static_data;

pub use cache::{ResponseCache, CacheKey, CacheStats};
pub use comparison::{ComparisonClient, ComparisonData, ComparisonError};
pub use geocoder::{GeocoderClient, GeocoderError};
pub use metrics::{MetricsError, MetricsProvider};
pub use static_data::StaticDataset;
