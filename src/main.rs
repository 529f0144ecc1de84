//! Weather widget - type a city, see its weather

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_widget::action::Action;
use weather_widget::api::{
    ApiConfig, DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL, OpenMeteoClient, WeatherApi,
};
use weather_widget::components::{Component, WeatherDisplay, WeatherDisplayProps};
use weather_widget::effect::Effect;
use weather_widget::reducer::reducer;
use weather_widget::state::{AppState, LOADING_ANIM_TICK_MS};
use weather_widget::storage::{self, QueryStore};
use weather_widget::{logging, pipeline};

/// Weather widget - city weather lookup backed by Open-Meteo
#[derive(Parser, Debug)]
#[command(name = "weather-widget")]
#[command(about = "Type a city name to see its current weather and forecast")]
struct Args {
    /// File that remembers the last query
    #[arg(long)]
    storage_path: Option<PathBuf>,

    /// Geocoding service base URL
    #[arg(long, default_value = DEFAULT_GEOCODING_URL)]
    geocoding_url: String,

    /// Forecast service base URL
    #[arg(long, default_value = DEFAULT_FORECAST_URL)]
    forecast_url: String,

    /// Re-run the lookup every N seconds (minimum 1); off by default
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: Option<u64>,

    /// Log file (the terminal is used by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `weather_widget=trace`; RUST_LOG wins
    #[arg(long)]
    log_level: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WidgetComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WidgetContext {
    Main,
}

impl EventRoutingState<WidgetComponentId, WidgetContext> for AppState {
    fn focused(&self) -> Option<WidgetComponentId> {
        Some(WidgetComponentId::Display)
    }

    fn modal(&self) -> Option<WidgetComponentId> {
        None
    }

    fn binding_context(&self, _id: WidgetComponentId) -> WidgetContext {
        WidgetContext::Main
    }

    fn default_context(&self) -> WidgetContext {
        WidgetContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        storage_path,
        geocoding_url,
        forecast_url,
        refresh_interval,
        log_file,
        log_level,
        debug: debug_args,
    } = Args::parse();

    let log_path = log_file.unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path, log_level.as_deref()) {
        eprintln!("Warning: logging disabled ({e})");
    }

    let store_file = QueryStore::new(storage_path.unwrap_or_else(storage::default_path));
    let saved_query = store_file.load_query();
    tracing::info!(path = %store_file.path().display(), query = %saved_query, "starting");

    let api: Arc<dyn WeatherApi> = Arc::new(OpenMeteoClient::new(ApiConfig {
        geocoding_url,
        forecast_url,
    }));

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
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

    // Restoring the saved query is an ordinary query change, so a usable
    // query triggers exactly one lookup on first render
    let initial_action = Action::SearchQueryChange(saved_query);

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        Services { api, store_file },
        initial_action,
        refresh_interval,
        replay_actions,
    )
    .await;

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

    tracing::info!("exiting");
    Ok(())
}

/// What the effect handler needs to talk to the outside world
struct Services {
    api: Arc<dyn WeatherApi>,
    store_file: QueryStore,
}

struct WidgetUi {
    display: WeatherDisplay,
}

impl WidgetUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WidgetComponentId>,
    ) {
        event_ctx.set_component_area(WidgetComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
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
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    services: Services,
    initial_action: Action,
    refresh_interval: Option<u64>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WidgetUi::new()));
    let mut bus: EventBus<AppState, Action, WidgetComponentId, WidgetContext> = EventBus::new();
    let keybindings: Keybindings<WidgetContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(WidgetComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(initial_action),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );

                if let Some(secs) = refresh_interval {
                    runtime.subscriptions().interval(
                        "refresh",
                        Duration::from_secs(secs),
                        || Action::WeatherRefresh,
                    );
                }
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(effect, ctx, &services),
        )
        .await
}

/// Handle effects: storage writes inline, network steps as tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::PersistQuery { query } => {
            if let Err(e) = services.store_file.save_query(&query) {
                tracing::warn!(error = %e, "could not save query");
            }
        }
        // One key for every step: a newer lookup replaces the task of an older one
        Effect::Geocode { request, query } => {
            let api = Arc::clone(&services.api);
            ctx.tasks()
                .spawn("weather", pipeline::geocode(api, request, query));
        }
        Effect::FetchCurrent { request, location } => {
            let api = Arc::clone(&services.api);
            ctx.tasks()
                .spawn("weather", pipeline::current(api, request, location));
        }
        Effect::FetchDaily { request, location } => {
            let api = Arc::clone(&services.api);
            ctx.tasks()
                .spawn("weather", pipeline::daily(api, request, location));
        }
    }
}
