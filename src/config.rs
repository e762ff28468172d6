//! Runtime configuration shared with the effect handler

use std::path::PathBuf;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::capability::Coordinates;

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const WEATHERAPI_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_REFRESH_SECS: u64 = 120;

/// How overlapping fetch flows resolve
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencyPolicy {
    /// Every completion is shown; the last to arrive wins
    #[default]
    LastCompletion,
    /// Completions older than the newest request are dropped
    LatestRequest,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub weather_base_url: String,
    pub geo_api_key: Option<String>,
    pub geo_base_url: String,
    pub refresh_interval: Duration,
    pub initial_city: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub voice_command: Option<String>,
    pub concurrency: ConcurrencyPolicy,
    pub log_file: PathBuf,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            weather_base_url: OPENWEATHER_BASE_URL.to_string(),
            geo_api_key: None,
            geo_base_url: WEATHERAPI_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            initial_city: None,
            coordinates: None,
            voice_command: None,
            concurrency: ConcurrencyPolicy::default(),
            log_file: default_log_file(),
        }
    }

    /// Coordinates only count when both halves are present
    pub fn with_coordinates(mut self, lat: Option<f64>, lon: Option<f64>) -> Self {
        self.coordinates = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        };
        self
    }
}

pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("cityweather.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.refresh_interval, Duration::from_secs(120));
        assert_eq!(config.concurrency, ConcurrencyPolicy::LastCompletion);
        assert!(config.weather_base_url.starts_with("https://"));
        assert!(config.coordinates.is_none());
    }

    #[test]
    fn test_coordinates_need_both_halves() {
        let config = Config::new("key").with_coordinates(Some(1.0), None);
        assert!(config.coordinates.is_none());

        let config = Config::new("key").with_coordinates(Some(1.0), Some(2.0));
        assert_eq!(config.coordinates, Some(Coordinates { lat: 1.0, lon: 2.0 }));
    }
}
