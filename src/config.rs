use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use crate::core::{NearbySearch, SearchLimits, SearchOptions};
use crate::models::{PlaceKind, SortBy};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub comparison: ComparisonSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_area_query")]
    pub area_query: String,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            area_query: default_area_query(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_geocoder_endpoint() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_user_agent() -> String { format!("city-scout/{}", env!("CARGO_PKG_VERSION")) }
fn default_timeout_secs() -> u64 { 10 }
fn default_max_results() -> usize { 50 }
fn default_area_query() -> String { "city".to_string() }
fn default_cache_size() -> u64 { 1000 }
fn default_cache_ttl_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Static,
    Backend,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonSettings {
    #[serde(default)]
    pub provider: ProviderKind,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_min_miles")]
    pub min_miles: f64,
    #[serde(default = "default_max_miles")]
    pub default_max_miles: f64,
    #[serde(default = "default_max_allowed_miles")]
    pub max_allowed_miles: f64,
    #[serde(default = "default_allowed_kinds")]
    pub allowed_kinds: Vec<PlaceKind>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_min_results")]
    pub min_results: usize,
    #[serde(default = "default_true")]
    pub widen_fallback: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_miles: default_min_miles(),
            default_max_miles: default_max_miles(),
            max_allowed_miles: default_max_allowed_miles(),
            allowed_kinds: default_allowed_kinds(),
            sort_by: SortBy::default(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_results: default_min_results(),
            widen_fallback: true,
        }
    }
}

fn default_min_miles() -> f64 { 0.5 }
fn default_max_miles() -> f64 { 150.0 }
fn default_max_allowed_miles() -> f64 { 200.0 }
fn default_allowed_kinds() -> Vec<PlaceKind> { vec![PlaceKind::City, PlaceKind::Town, PlaceKind::Village] }
fn default_limit() -> usize { 5 }
fn default_max_limit() -> usize { 10 }
fn default_min_results() -> usize { 5 }
fn default_true() -> bool { true }

impl SearchSettings {
    /// Build the search pipeline from these settings
    ///
    /// The default radius and limit are clamped to their configured maximums.
    pub fn to_nearby_search(&self) -> NearbySearch {
        let limits = SearchLimits {
            max_allowed_miles: self.max_allowed_miles,
            max_limit: self.max_limit,
            min_results: self.min_results,
            widen_fallback: self.widen_fallback,
        };

        let defaults = SearchOptions {
            min_miles: self.min_miles,
            max_miles: self.default_max_miles.min(self.max_allowed_miles),
            allowed_kinds: self.allowed_kinds.iter().copied().collect(),
            sort_by: self.sort_by,
            limit: self.default_limit.min(self.max_limit),
        };

        NearbySearch::new(defaults, limits)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CITYSCOUT__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CITYSCOUT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CITYSCOUT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of the loaded config
///
/// `GEOCODER_URL` overrides the geocoder endpoint; `COMPARISON_BACKEND_URL`
/// sets the backend endpoint and switches the provider to `backend`.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let geocoder_url = env::var("GEOCODER_URL").ok();
    let backend_url = env::var("COMPARISON_BACKEND_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = geocoder_url {
        builder = builder.set_override("geocoder.endpoint", url)?;
    }
    if let Some(url) = backend_url {
        builder = builder
            .set_override("comparison.endpoint", url)?
            .set_override("comparison.provider", "backend")?;
    }

    builder.build()
}
