//! Actions: user intents and async pipeline results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{CurrentConditions, DailyForecast, RequestId, ResolvedLocation};

/// Result of one pipeline step, tagged with the pipeline that produced it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Fetched<T> {
    pub request: RequestId,
    pub data: T,
}

impl<T> Fetched<T> {
    pub fn new(request: RequestId, data: T) -> Self {
        Self { request, data }
    }
}

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Query text changed (keystroke, or restored from storage at startup)
    SearchQueryChange(String),

    /// Enter pressed in the input
    SearchQuerySubmit(String),

    // ===== Weather category =====
    /// Intent: re-run the pipeline for the current query
    WeatherRefresh,

    /// Result: geocoding found a location
    WeatherLocationDidResolve(Fetched<ResolvedLocation>),

    /// Result: current conditions loaded
    WeatherCurrentDidLoad(Fetched<CurrentConditions>),

    /// Result: daily forecast loaded; the pipeline is done
    WeatherDailyDidLoad(Fetched<DailyForecast>),

    /// Result: a pipeline step failed
    WeatherDidError(Fetched<String>),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
