use std::sync::Arc;
use thiserror::Error;
use crate::models::NearbyCityRef;
use crate::services::comparison::{ComparisonClient, ComparisonData, ComparisonError};
use crate::services::static_data::StaticDataset;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(transparent)]
    Backend(#[from] ComparisonError),

    #[error("No metrics for city: {0}")]
    UnknownCity(String),
}

/// Source of per-city metrics for comparisons
pub enum MetricsProvider {
    Backend(ComparisonClient),
    Static(Arc<StaticDataset>),
}

impl MetricsProvider {
    pub fn name(&self) -> &'static str {
        match self {
            MetricsProvider::Backend(_) => "backend",
            MetricsProvider::Static(_) => "static",
        }
    }

    /// Metrics for `main_city` plus whichever neighbours the source knows
    pub async fn fetch(
        &self,
        main_city: &str,
        nearby_cities: &[NearbyCityRef],
    ) -> Result<ComparisonData, MetricsError> {
        match self {
            MetricsProvider::Backend(client) => Ok(client.fetch(main_city, nearby_cities).await?),
            MetricsProvider::Static(dataset) => {
                let main = dataset
                    .find(main_city)
                    .cloned()
                    .ok_or_else(|| MetricsError::UnknownCity(main_city.to_string()))?;

                let nearby = nearby_cities
                    .iter()
                    .filter_map(|city| dataset.find(&city.name).cloned())
                    .collect();

                Ok(ComparisonData {
                    main_city: main,
                    nearby_cities: nearby,
                })
            }
        }
    }
}
