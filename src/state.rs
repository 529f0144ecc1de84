//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimum query length (in characters) before a lookup is attempted
pub const MIN_QUERY_CHARS: usize = 2;

/// Identifies one run of the fetch pipeline; later runs supersede earlier ones
pub type RequestId = u64;

/// First geocoding match for the typed query
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name, or `auto` to let the forecast service pick one
    pub timezone: String,
}

/// Snapshot of the current weather at the resolved location
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    /// Local time of the reading, e.g. `2024-03-05T10:00`
    pub time: String,
    /// Sampling interval in seconds
    pub interval: u32,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub relative_humidity: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub rain: f64,
    pub snowfall: f64,
    pub weather_code: i32, // WMO weather code
    pub is_day: bool,
}

impl CurrentConditions {
    /// A reading without a timestamp has not been loaded yet
    pub fn is_renderable(&self) -> bool {
        !self.time.is_empty()
    }
}

/// Day-indexed forecast; index 0 is today
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub temperature_min: Vec<f64>,
    pub temperature_max: Vec<f64>,
    pub weather_code: Vec<i32>,
}

/// One row of the upcoming-days list
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastDay<'a> {
    pub date: &'a str,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub weather_code: i32,
}

impl DailyForecast {
    /// Days after today, in order. Stops at the shortest of the parallel sequences.
    pub fn upcoming(&self) -> impl Iterator<Item = ForecastDay<'_>> {
        self.time
            .iter()
            .zip(&self.temperature_min)
            .zip(&self.temperature_max)
            .zip(&self.weather_code)
            .skip(1)
            .map(|(((date, min), max), code)| ForecastDay {
                date,
                temperature_min: *min,
                temperature_max: *max,
                weather_code: *code,
            })
    }
}

/// Animation timing for the loading spinner.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// What the user typed
    #[debug(section = "Query", label = "Text")]
    pub query: String,

    /// Name of the last resolved location
    #[debug(section = "Location", label = "City", debug_fmt)]
    pub city: Option<String>,

    #[debug(section = "Location", label = "Resolved", debug_fmt)]
    pub location: Option<ResolvedLocation>,

    #[debug(section = "Weather", label = "Current", debug_fmt)]
    pub current: Option<CurrentConditions>,

    #[debug(section = "Weather", label = "Daily", debug_fmt)]
    pub daily: Option<DailyForecast>,

    /// True from pipeline start until it completes or fails
    #[debug(section = "Weather", label = "Loading")]
    pub is_loading: bool,

    /// Last pipeline failure; logged, never rendered
    #[debug(section = "Weather", label = "Last error", debug_fmt)]
    pub last_error: Option<String>,

    /// Id of the newest pipeline; results from older ones are dropped
    #[debug(section = "Weather", label = "Request")]
    pub request_id: RequestId,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Conditions ready for display, if any
    pub fn renderable_current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref().filter(|c| c.is_renderable())
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

/// A lookup runs only when the query actually changed and is long enough
pub fn should_fetch(previous: &str, next: &str) -> bool {
    previous != next && meets_min_length(next)
}

/// Any non-empty change is remembered, even if it is too short to look up
pub fn should_persist(previous: &str, next: &str) -> bool {
    previous != next && !next.is_empty()
}

pub fn meets_min_length(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}
