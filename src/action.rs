//! Actions: user intents, async results and timer ticks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::Location;
use crate::state::{FetchError, WeatherReport};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Re-run the lookup for the last searched location
    WeatherRefresh,

    /// Result: both endpoints answered; `query` is what the next refresh uses
    WeatherDidLoad {
        request: u64,
        query: String,
        report: WeatherReport,
    },

    /// Result: provider reported the location as unknown
    WeatherDidNotFind { request: u64, query: String },

    /// Result: network, parse or provider failure
    WeatherDidError { request: u64, error: FetchError },

    // ===== Search category =====
    /// Move keyboard focus into the search bar
    SearchFocus,

    /// Leave the search bar without submitting
    SearchBlur,

    /// Search bar text changed
    SearchInputChange(String),

    /// Submit the search bar text
    SearchSubmit(String),

    // ===== Voice category =====
    /// Start a single voice capture
    VoiceStart,

    /// Result: transcript captured
    VoiceDidCapture(String),

    /// Result: capture failed
    VoiceDidError(String),

    // ===== Geo category =====
    /// Result: start-up position turned into something searchable
    GeoDidResolve(Location),

    /// Result: start-up position lookup failed
    GeoDidError(String),

    // ===== UI category =====
    /// Hide the current notice
    UiDismissNotice,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// First action after start-up
    Init,

    /// Periodic auto-refresh
    RefreshTick,

    /// Exit the application
    Quit,
}
