//! OpenWeatherMap client, plus the reverse-geocoding lookup used on start

use std::fmt;

use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capability::Coordinates;
use crate::config::Config;
use crate::error::ClientError;
use crate::state::{CurrentConditions, ForecastEntry};

/// What to look up: a free-text city name or a position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Location {
    City(String),
    Coordinates(Coordinates),
}

impl Location {
    fn query(&self) -> String {
        match self {
            Location::City(name) => format!("q={}", urlencoding::encode(name.trim())),
            Location::Coordinates(c) => format!("lat={}&lon={}", c.lat, c.lon),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::City(name) => write!(f, "{}", name),
            Location::Coordinates(c) => write!(f, "{:.4},{:.4}", c.lat, c.lon),
        }
    }
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    #[serde(default)]
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    id: i64,
    #[serde(default)]
    main: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt_txt: String,
    main: MainBlock,
    weather: Vec<ConditionBlock>,
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
    geo_base_url: String,
    geo_api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_urls(
            &config.weather_base_url,
            &config.api_key,
            &config.geo_base_url,
            config.geo_api_key.clone(),
        )
    }

    pub fn with_base_urls(
        base_url: &str,
        api_key: &str,
        geo_base_url: &str,
        geo_api_key: Option<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            geo_base_url: geo_base_url.trim_end_matches('/').to_string(),
            geo_api_key,
        }
    }

    pub fn has_geo_credential(&self) -> bool {
        self.geo_api_key.is_some()
    }

    /// Current conditions for a location
    pub async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, ClientError> {
        let body = self.get_provider_json("weather", location).await?;
        let data: CurrentResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Malformed(e.to_string()))?;
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Malformed("empty weather list".into()))?;
        let humidity = data
            .main
            .humidity
            .ok_or_else(|| ClientError::Malformed("missing main.humidity".into()))?;

        Ok(CurrentConditions {
            location_name: data.name,
            temperature: data.main.temp,
            condition_code: condition.id,
            condition_label: condition.main,
            humidity,
            wind_speed: data.wind.speed,
        })
    }

    /// Raw 5-day/3-hour forecast, in provider order
    pub async fn fetch_forecast(&self, location: &Location) -> Result<Vec<ForecastEntry>, ClientError> {
        let body = self.get_provider_json("forecast", location).await?;
        let data: ForecastResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Malformed(e.to_string()))?;

        data.list
            .into_iter()
            .map(|item| {
                let condition = item.weather.into_iter().next().ok_or_else(|| {
                    ClientError::Malformed(format!("empty weather list at {}", item.dt_txt))
                })?;
                Ok(ForecastEntry {
                    timestamp: item.dt_txt,
                    condition_code: condition.id,
                    temperature: item.main.temp,
                })
            })
            .collect()
    }

    /// Resolve a position to a place name via the geolocation provider
    pub async fn resolve_place_name(&self, coords: Coordinates) -> Result<String, ClientError> {
        let key = self
            .geo_api_key
            .as_deref()
            .ok_or(ClientError::MissingCredential("geolocation provider"))?;
        let url = format!(
            "{}/current.json?key={}&q={},{}",
            self.geo_base_url,
            urlencoding::encode(key),
            coords.lat,
            coords.lon
        );

        let (status, body) = self.get_json(&url).await?;

        if let Some(name) = body.pointer("/location/name").and_then(Value::as_str) {
            return Ok(name.to_string());
        }
        if let Some(error) = body.get("error") {
            return Err(ClientError::Provider {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(status as i64),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        Err(ClientError::Malformed("missing location.name".into()))
    }

    async fn get_provider_json(&self, endpoint: &str, location: &Location) -> Result<Value, ClientError> {
        let url = format!(
            "{}/{}?{}&appid={}&units=metric",
            self.base_url,
            endpoint,
            location.query(),
            urlencoding::encode(&self.api_key)
        );

        let (_, body) = self.get_json(&url).await?;
        match status_code(&body) {
            Some(200) => Ok(body),
            Some(404) => Err(ClientError::NotFound(location.to_string())),
            Some(code) => Err(ClientError::Provider {
                code,
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
            None => Err(ClientError::Malformed("missing cod".into())),
        }
    }

    /// GET and parse a JSON body. A non-2xx response without a JSON body is
    /// reported as a provider error carrying the HTTP status.
    async fn get_json(&self, url: &str) -> Result<(u16, Value), ClientError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok((status.as_u16(), body)),
            Err(_) if !status.is_success() => Err(ClientError::Provider {
                code: i64::from(status.as_u16()),
                message: status.canonical_reason().unwrap_or("HTTP error").to_string(),
            }),
            Err(e) => Err(ClientError::Malformed(e.to_string())),
        }
    }
}

/// The provider's `cod` field: a number on `weather`, a string on `forecast`
fn status_code(body: &Value) -> Option<i64> {
    match body.get("cod")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
