//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::{debug, info, warn};
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::capability::{GeoPermission, VoiceCapability};
use crate::client::Location;
use crate::config::ConcurrencyPolicy;
use crate::effect::Effect;
use crate::state::{AppState, DisplayState};

pub const VOICE_UNSUPPORTED_NOTICE: &str =
    "Voice search is not supported here (start with --voice-command)";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherRefresh | Action::RefreshTick => {
            if state.last_searched.is_empty() {
                return DispatchResult::unchanged();
            }
            info!(city = %state.last_searched, "refreshing weather");
            let location = Location::City(state.last_searched.clone());
            begin_fetch(state, location)
        }

        Action::WeatherDidLoad {
            request,
            query,
            report,
        } => {
            if !settle(state, request) {
                return DispatchResult::changed();
            }
            state.display = DisplayState::Results;
            state.current = Some(report.current);
            state.forecast = report.forecast;
            state.date_label = report.date_label;
            state.not_found_query = None;
            state.last_error = None;
            state.last_searched = query;
            DispatchResult::changed()
        }

        Action::WeatherDidNotFind { request, query } => {
            if !settle(state, request) {
                return DispatchResult::changed();
            }
            clear_results(state);
            state.display = DisplayState::NotFound;
            state.not_found_query = Some(query);
            state.last_error = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, error } => {
            if !settle(state, request) {
                return DispatchResult::changed();
            }
            clear_results(state);
            state.display = DisplayState::SearchPrompt;
            state.not_found_query = None;
            state.last_error = Some(error);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchFocus => {
            if state.input_focused {
                return DispatchResult::unchanged();
            }
            state.input_focused = true;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if !state.input_focused {
                return DispatchResult::unchanged();
            }
            state.input_focused = false;
            DispatchResult::changed()
        }

        Action::SearchInputChange(text) => {
            state.input = text;
            DispatchResult::changed()
        }

        Action::SearchSubmit(text) => {
            let city = text.trim().to_string();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }
            state.input.clear();
            state.input_focused = false;
            info!(%city, "search submitted");
            begin_fetch(state, Location::City(city))
        }

        // ===== Voice actions =====
        Action::VoiceStart => match &state.voice {
            VoiceCapability::Unavailable => {
                info!("voice search requested but unavailable");
                state.notice = Some(VOICE_UNSUPPORTED_NOTICE.to_string());
                DispatchResult::changed()
            }
            VoiceCapability::Available { .. } if state.voice_listening => {
                DispatchResult::unchanged()
            }
            VoiceCapability::Available { command } => {
                let command = command.clone();
                state.voice_listening = true;
                state.notice = Some("Listening...".to_string());
                DispatchResult::changed_with(Effect::CaptureVoice { command })
            }
        },

        Action::VoiceDidCapture(transcript) => {
            state.voice_listening = false;
            let city = transcript.trim().to_string();
            if city.is_empty() {
                state.notice = Some("No speech recognised".to_string());
                return DispatchResult::changed();
            }
            state.notice = None;
            state.input.clear();
            state.input_focused = false;
            info!(%city, "voice search");
            begin_fetch(state, Location::City(city))
        }

        Action::VoiceDidError(message) => {
            warn!(%message, "voice recognition failed");
            state.voice_listening = false;
            state.notice = Some(format!("Voice search failed: {message}"));
            DispatchResult::changed()
        }

        // ===== Geolocation actions =====
        Action::GeoDidResolve(location) => begin_fetch(state, location),

        Action::GeoDidError(message) => {
            warn!(%message, "start-up location lookup failed");
            DispatchResult::unchanged()
        }

        // ===== UI actions =====
        Action::UiDismissNotice => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Init => {
            let mut effects = Vec::new();

            match state.geolocation {
                GeoPermission::Granted(coords) if !state.geolocation_used => {
                    state.geolocation_used = true;
                    effects.push(Effect::ResolveGeolocation { coords });
                }
                GeoPermission::Denied => warn!("location access denied"),
                _ => {}
            }

            if let Some(city) = state.initial_city.take() {
                effects.push(issue_request(state, Location::City(city)));
            }

            if effects.is_empty() {
                DispatchResult::unchanged()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn begin_fetch(state: &mut AppState, location: Location) -> DispatchResult<Effect> {
    DispatchResult::changed_with(issue_request(state, location))
}

/// Allocate the next request id and record it as in flight
fn issue_request(state: &mut AppState, location: Location) -> Effect {
    state.next_request += 1;
    let request = state.next_request;
    state.in_flight.push(request);
    debug!(request, %location, "request issued");
    Effect::FetchWeather { request, location }
}

/// Mark a request finished. Returns whether its result should be shown.
fn settle(state: &mut AppState, request: u64) -> bool {
    state.in_flight.retain(|&id| id != request);

    if state.policy == ConcurrencyPolicy::LatestRequest && state.latest_request() != Some(request) {
        debug!(request, latest = ?state.latest_request(), "discarding stale completion");
        return false;
    }
    state.displayed_request = Some(request);
    true
}

fn clear_results(state: &mut AppState) {
    state.current = None;
    state.forecast.clear();
    state.date_label.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Coordinates;
    use crate::state::{CurrentConditions, FetchError, WeatherReport};

    fn report(name: &str, temperature: f64) -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                location_name: name.into(),
                temperature,
                condition_code: 800,
                condition_label: "Clear".into(),
                humidity: 40,
                wind_speed: 3.0,
            },
            forecast: Vec::new(),
            date_label: "Mon, 18 Aug".into(),
        }
    }

    fn loaded(request: u64, query: &str) -> Action {
        Action::WeatherDidLoad {
            request,
            query: query.into(),
            report: report(query, 20.0),
        }
    }

    #[test]
    fn test_submit_issues_fetch_and_clears_input() {
        let mut state = AppState {
            input: "  Paris ".into(),
            input_focused: true,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit("  Paris ".into()));

        assert!(result.changed);
        assert!(state.input.is_empty());
        assert!(!state.input_focused);
        assert_eq!(state.in_flight, vec![1]);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request: 1,
                location: Location::City("Paris".into())
            }]
        );
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::SearchSubmit("   ".into()));
        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.next_request, 0);
    }

    #[test]
    fn test_load_sets_results_and_last_searched() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("Paris".into()));
        reducer(&mut state, loaded(1, "Paris"));

        assert_eq!(state.display, DisplayState::Results);
        assert_eq!(state.last_searched, "Paris");
        assert_eq!(state.displayed_request, Some(1));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_not_found_keeps_last_searched() {
        let mut state = AppState {
            last_searched: "Paris".into(),
            ..Default::default()
        };
        reducer(&mut state, Action::SearchSubmit("Atlantis".into()));
        reducer(
            &mut state,
            Action::WeatherDidNotFind {
                request: 1,
                query: "Atlantis".into(),
            },
        );

        assert_eq!(state.display, DisplayState::NotFound);
        assert_eq!(state.not_found_query.as_deref(), Some("Atlantis"));
        assert_eq!(state.last_searched, "Paris");
        assert!(state.current.is_none());
    }

    #[test]
    fn test_error_returns_to_prompt_without_stale_results() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("Paris".into()));
        reducer(&mut state, loaded(1, "Paris"));

        reducer(&mut state, Action::RefreshTick);
        reducer(
            &mut state,
            Action::WeatherDidError {
                request: 2,
                error: FetchError::Transport("connection refused".into()),
            },
        );

        assert_eq!(state.display, DisplayState::SearchPrompt);
        assert!(state.current.is_none());
        assert!(state.last_error.is_some());
        // A failed refresh does not forget what to refresh next time
        assert_eq!(state.last_searched, "Paris");
        let result = reducer(&mut state, Action::RefreshTick);
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_refresh_without_last_search_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::RefreshTick);
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::WeatherRefresh);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_last_completion_wins_by_default() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("CityA".into()));
        reducer(&mut state, Action::SearchSubmit("CityB".into()));

        reducer(&mut state, loaded(2, "CityB"));
        reducer(&mut state, loaded(1, "CityA"));

        assert_eq!(state.current.as_ref().unwrap().location_name, "CityA");
        assert_eq!(state.last_searched, "CityA");
        assert!(state.in_flight.is_empty());
    }

    #[test]
    fn test_latest_request_policy_drops_stale() {
        let mut state = AppState::default().with_policy(ConcurrencyPolicy::LatestRequest);
        reducer(&mut state, Action::SearchSubmit("CityA".into()));
        reducer(&mut state, Action::SearchSubmit("CityB".into()));

        reducer(&mut state, loaded(2, "CityB"));
        let result = reducer(&mut state, loaded(1, "CityA"));

        assert!(result.changed);
        assert_eq!(state.current.as_ref().unwrap().location_name, "CityB");
        assert_eq!(state.last_searched, "CityB");
        assert_eq!(state.displayed_request, Some(2));
        assert!(state.in_flight.is_empty());
    }

    #[test]
    fn test_voice_unavailable_sets_notice() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::VoiceStart);
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.notice.as_deref(), Some(VOICE_UNSUPPORTED_NOTICE));
        assert_eq!(state.display, DisplayState::SearchPrompt);
    }

    #[test]
    fn test_voice_available_captures_once() {
        let mut state = AppState {
            voice: VoiceCapability::Available {
                command: "listen".into(),
            },
            ..Default::default()
        };

        let result = reducer(&mut state, Action::VoiceStart);
        assert_eq!(
            result.effects,
            vec![Effect::CaptureVoice {
                command: "listen".into()
            }]
        );
        assert!(state.voice_listening);

        let result = reducer(&mut state, Action::VoiceStart);
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::VoiceDidCapture("Lima".into()));
        assert!(!state.voice_listening);
        assert!(matches!(
            &result.effects[..],
            [Effect::FetchWeather { location: Location::City(city), .. }] if city == "Lima"
        ));
    }

    #[test]
    fn test_init_fires_geolocation_once() {
        let coords = Coordinates { lat: 1.0, lon: 2.0 };
        let mut state = AppState::new(VoiceCapability::Unavailable, GeoPermission::Granted(coords));

        let result = reducer(&mut state, Action::Init);
        assert_eq!(result.effects, vec![Effect::ResolveGeolocation { coords }]);

        let result = reducer(&mut state, Action::Init);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_init_with_denied_geolocation_stays_on_prompt() {
        let mut state = AppState::new(VoiceCapability::Unavailable, GeoPermission::Denied);
        let result = reducer(&mut state, Action::Init);
        assert!(!result.changed);
        assert_eq!(state.display, DisplayState::SearchPrompt);
    }

    #[test]
    fn test_init_runs_initial_city() {
        let mut state = AppState::default().with_initial_city(Some("Quito".into()));
        let result = reducer(&mut state, Action::Init);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request: 1,
                location: Location::City("Quito".into())
            }]
        );
        assert!(state.initial_city.is_none());
    }

    #[test]
    fn test_dismiss_notice() {
        let mut state = AppState {
            notice: Some("hello".into()),
            ..Default::default()
        };
        assert!(reducer(&mut state, Action::UiDismissNotice).changed);
        assert!(!reducer(&mut state, Action::UiDismissNotice).changed);
    }
}
