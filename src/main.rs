//! City weather lookup widget

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use cityweather::action::Action;
use cityweather::capability::{GeoPermission, VoiceCapability};
use cityweather::client::WeatherClient;
use cityweather::components::{
    Component, SearchBar, SearchBarProps, WeatherDisplay, WeatherDisplayProps,
};
use cityweather::config::{
    ConcurrencyPolicy, Config, DEFAULT_REFRESH_SECS, OPENWEATHER_BASE_URL, WEATHERAPI_BASE_URL,
    default_log_file,
};
use cityweather::effect::Effect;
use cityweather::reducer::reducer;
use cityweather::state::AppState;
use cityweather::{flow, voice};

/// Current conditions and a daily forecast for any city
#[derive(Parser, Debug)]
#[command(name = "cityweather")]
#[command(about = "Look up current weather and a daily forecast for any city")]
struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY")]
    api_key: String,

    /// WeatherAPI key, used to name the start-up position
    #[arg(long, env = "WEATHERAPI_KEY")]
    geo_api_key: Option<String>,

    #[arg(long, default_value = OPENWEATHER_BASE_URL)]
    weather_base_url: String,

    #[arg(long, default_value = WEATHERAPI_BASE_URL)]
    geo_base_url: String,

    /// Refresh interval in seconds (minimum 1)
    #[arg(long, short, default_value_t = DEFAULT_REFRESH_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    /// City to look up on start
    #[arg(long, short)]
    city: Option<String>,

    /// Start-up latitude; together with --lon grants location access
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,

    /// Command that records one utterance and prints the transcript
    #[arg(long, env = "CITYWEATHER_VOICE_COMMAND")]
    voice_command: Option<String>,

    /// How overlapping lookups resolve
    #[arg(long, value_enum, default_value_t = ConcurrencyPolicy::LastCompletion)]
    concurrency: ConcurrencyPolicy,

    /// Log file (RUST_LOG controls verbosity)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn into_parts(self) -> (Config, DebugCliArgs) {
        let mut config = Config::new(self.api_key).with_coordinates(self.lat, self.lon);
        config.geo_api_key = self.geo_api_key.filter(|key| !key.is_empty());
        config.weather_base_url = self.weather_base_url;
        config.geo_base_url = self.geo_base_url;
        config.refresh_interval = Duration::from_secs(self.refresh_interval);
        config.initial_city = self.city;
        config.voice_command = self.voice_command;
        config.concurrency = self.concurrency;
        config.log_file = self.log_file.unwrap_or_else(default_log_file);
        (config, self.debug)
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
    Search,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        if self.input_focused {
            Some(WeatherComponentId::Search)
        } else {
            Some(WeatherComponentId::Display)
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        if self.input_focused {
            Some(WeatherComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Display => WeatherContext::Main,
            WeatherComponentId::Search => WeatherContext::Search,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let (config, debug_args) = Args::parse().into_parts();
    init_logging(&config.log_file)?;
    info!(
        refresh_secs = config.refresh_interval.as_secs(),
        concurrency = ?config.concurrency,
        "starting"
    );

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let config = Arc::new(config);
    let state = debug
        .load_state_or_else_async(|| {
            let config = Arc::clone(&config);
            async move {
                let state = AppState::new(
                    VoiceCapability::detect(config.voice_command.as_deref()),
                    GeoPermission::detect(config.coordinates),
                )
                .with_policy(config.concurrency)
                .with_initial_city(config.initial_city.clone());
                Ok::<AppState, io::Error>(state)
            }
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, config, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    info!("shutdown complete");
    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cityweather=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Height of the search bar above the widget
const SEARCH_BAR_HEIGHT: u16 = 3;

struct WeatherUi {
    display: WeatherDisplay,
    search: SearchBar,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay,
            search: SearchBar::new(),
        }
    }

    fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query: &state.input,
            is_focused,
            on_change: Action::SearchInputChange,
            on_submit: Action::SearchSubmit,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(1),
        ])
        .split(area);

        event_ctx.set_component_area(WeatherComponentId::Search, chunks[0]);
        event_ctx.set_component_area(WeatherComponentId::Display, chunks[1]);

        self.search.render(
            frame,
            chunks[0],
            Self::search_props(state, render_ctx.is_focused() && state.input_focused),
        );

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.input_focused,
        };
        self.display.render(frame, chunks[1], props);
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .search
            .handle_event(event, Self::search_props(state, true))
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    config: Arc<Config>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(WeatherComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(WeatherComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    let refresh_interval = config.refresh_interval;
    let client = WeatherClient::new(&config);

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime
                    .subscriptions()
                    .interval("refresh", refresh_interval, || Action::RefreshTick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, client.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: WeatherClient) {
    match effect {
        Effect::FetchWeather { request, location } => {
            // One task per request so overlapping lookups all complete
            let key = format!("weather-{request}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                flow::run_weather_flow(&client, request, location).await
            });
        }
        Effect::ResolveGeolocation { coords } => {
            ctx.tasks().spawn(TaskKey::new("geolocation"), async move {
                match flow::resolve_start_location(&client, coords).await {
                    Ok(location) => Action::GeoDidResolve(location),
                    Err(e) => Action::GeoDidError(e.to_string()),
                }
            });
        }
        Effect::CaptureVoice { command } => {
            ctx.tasks().spawn(TaskKey::new("voice"), async move {
                match voice::capture_transcript(&command).await {
                    Ok(transcript) => Action::VoiceDidCapture(transcript),
                    Err(e) => Action::VoiceDidError(e.to_string()),
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather::capability::Coordinates;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let mut argv = vec!["cityweather", "--api-key", "k"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn test_lat_without_lon_is_rejected() {
        let err = parse(&["--lat", "59.9"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = parse(&["--lon", "10.7"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_lat_and_lon_grant_coordinates() {
        let (config, _) = parse(&["--lat", "-33.9", "--lon", "18.4"])
            .unwrap()
            .into_parts();
        assert_eq!(
            config.coordinates,
            Some(Coordinates {
                lat: -33.9,
                lon: 18.4
            })
        );
    }

    #[test]
    fn test_refresh_interval_has_a_floor() {
        assert!(parse(&["--refresh-interval", "0"]).is_err());
        let (config, _) = parse(&["--refresh-interval", "5"]).unwrap().into_parts();
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
    }
}
