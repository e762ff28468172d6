//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::capability::{GeoPermission, VoiceCapability};
use crate::config::ConcurrencyPolicy;
use crate::icons::WeatherIcon;

/// Current conditions from the `weather` endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature: f64,
    pub condition_code: i64,
    pub condition_label: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

impl CurrentConditions {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_code(self.condition_code)
    }
}

/// One 3-hour record from the `forecast` endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastEntry {
    /// Provider timestamp, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub condition_code: i64,
    pub temperature: f64,
}

impl ForecastEntry {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_code(self.condition_code)
    }
}

/// Result of one completed fetch flow
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// Already reduced to one entry per future day
    pub forecast: Vec<ForecastEntry>,
    pub date_label: String,
}

/// Failure of a fetch flow other than "location not found"
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FetchError {
    #[error("weather service unreachable: {0}")]
    Transport(String),
    #[error("unexpected response from weather service: {0}")]
    Malformed(String),
}

/// The panel currently shown; exactly one at a time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DisplayState {
    #[default]
    SearchPrompt,
    Results,
    NotFound,
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

pub fn format_wind_speed(speed: f64) -> String {
    format!("{speed} m/s")
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "View", label = "Panel", debug_fmt)]
    pub display: DisplayState,

    #[debug(section = "View", label = "Current", debug_fmt)]
    pub current: Option<CurrentConditions>,

    #[debug(section = "View", label = "Forecast days", debug_fmt)]
    pub forecast: Vec<ForecastEntry>,

    #[debug(skip)]
    pub date_label: String,

    /// Query of the last not-found search, shown in the not-found panel
    #[debug(section = "View", label = "Not found", debug_fmt)]
    pub not_found_query: Option<String>,

    #[debug(section = "View", label = "Error", debug_fmt)]
    pub last_error: Option<FetchError>,

    /// Set only by an applied successful search; read by the refresh tick
    #[debug(section = "Search", label = "Last searched")]
    pub last_searched: String,

    // --- Request bookkeeping ---
    #[debug(section = "Requests", label = "Next id")]
    pub next_request: u64,

    #[debug(section = "Requests", label = "In flight", debug_fmt)]
    pub in_flight: Vec<u64>,

    #[debug(section = "Requests", label = "Displayed", debug_fmt)]
    pub displayed_request: Option<u64>,

    #[debug(section = "Requests", label = "Policy", debug_fmt)]
    pub policy: ConcurrencyPolicy,

    // --- Capabilities, decided once at startup ---
    #[debug(section = "Capabilities", label = "Voice", debug_fmt)]
    pub voice: VoiceCapability,

    #[debug(section = "Capabilities", label = "Geolocation", debug_fmt)]
    pub geolocation: GeoPermission,

    #[debug(skip)]
    pub geolocation_used: bool,

    #[debug(section = "Capabilities", label = "Listening")]
    pub voice_listening: bool,

    /// Search to run on `Init` (from `--city`)
    #[debug(skip)]
    pub initial_city: Option<String>,

    // --- Search bar ---
    #[debug(skip)]
    pub input: String,

    #[debug(skip)]
    pub input_focused: bool,

    /// Transient user-visible message
    #[debug(skip)]
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(voice: VoiceCapability, geolocation: GeoPermission) -> Self {
        Self {
            display: DisplayState::SearchPrompt,
            current: None,
            forecast: Vec::new(),
            date_label: String::new(),
            not_found_query: None,
            last_error: None,
            last_searched: String::new(),
            next_request: 0,
            in_flight: Vec::new(),
            displayed_request: None,
            policy: ConcurrencyPolicy::default(),
            voice,
            geolocation,
            geolocation_used: false,
            voice_listening: false,
            initial_city: None,
            input: String::new(),
            input_focused: false,
            notice: None,
        }
    }

    pub fn with_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_initial_city(mut self, city: Option<String>) -> Self {
        self.initial_city = city.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Id of the newest request issued so far
    pub fn latest_request(&self) -> Option<u64> {
        (self.next_request > 0).then_some(self.next_request)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(VoiceCapability::Unavailable, GeoPermission::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature_rounds() {
        assert_eq!(format_temperature(21.6), "22°C");
        assert_eq!(format_temperature(21.4), "21°C");
        assert_eq!(format_temperature(-3.7), "-4°C");
        assert_eq!(format_temperature(0.0), "0°C");
    }

    #[test]
    fn test_format_wind_speed() {
        assert_eq!(format_wind_speed(4.1), "4.1 m/s");
        assert_eq!(format_wind_speed(3.0), "3 m/s");
    }

    #[test]
    fn test_default_state_shows_search_prompt() {
        let state = AppState::default();
        assert_eq!(state.display, DisplayState::SearchPrompt);
        assert!(state.last_searched.is_empty());
        assert!(!state.is_loading());
        assert_eq!(state.latest_request(), None);
    }

    #[test]
    fn test_initial_city_ignores_blank() {
        let state = AppState::default().with_initial_city(Some("   ".into()));
        assert_eq!(state.initial_city, None);

        let state = AppState::default().with_initial_city(Some("Oslo".into()));
        assert_eq!(state.initial_city.as_deref(), Some("Oslo"));
    }
}
