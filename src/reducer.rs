//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::{Action, Fetched};
use crate::effect::Effect;
use crate::state::{meets_min_length, should_fetch, should_persist, AppState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if query == state.query {
                return DispatchResult::unchanged();
            }
            let previous = std::mem::replace(&mut state.query, query);

            let mut effects = Vec::new();
            if should_persist(&previous, &state.query) {
                effects.push(Effect::PersistQuery {
                    query: state.query.clone(),
                });
            }
            if should_fetch(&previous, &state.query) {
                effects.push(begin_pipeline(state));
            }

            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::SearchQuerySubmit(query) => {
            if query != state.query {
                // Text and submit can race; treat as an ordinary change
                return reducer(state, Action::SearchQueryChange(query));
            }
            refresh(state)
        }

        // ===== Weather actions =====
        Action::WeatherRefresh => refresh(state),

        Action::WeatherLocationDidResolve(Fetched { request, data }) => {
            if !is_current(state, request) {
                return DispatchResult::unchanged();
            }
            tracing::info!(
                request,
                city = %data.name,
                lat = data.latitude,
                lon = data.longitude,
                "location resolved"
            );
            state.city = Some(data.name.clone());
            state.location = Some(data.clone());
            DispatchResult::changed_with(Effect::FetchCurrent {
                request,
                location: data,
            })
        }

        Action::WeatherCurrentDidLoad(Fetched { request, data }) => {
            if !is_current(state, request) {
                return DispatchResult::unchanged();
            }
            state.current = Some(data);
            match state.location.clone() {
                Some(location) => {
                    DispatchResult::changed_with(Effect::FetchDaily { request, location })
                }
                None => {
                    state.is_loading = false;
                    DispatchResult::changed()
                }
            }
        }

        Action::WeatherDailyDidLoad(Fetched { request, data }) => {
            if !is_current(state, request) {
                return DispatchResult::unchanged();
            }
            state.daily = Some(data);
            state.is_loading = false;
            state.last_error = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError(Fetched { request, data }) => {
            if !is_current(state, request) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(request, query = %state.query, error = %data, "weather lookup failed");
            state.is_loading = false;
            state.last_error = Some(data);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Stamp a new pipeline run and return its first step
fn begin_pipeline(state: &mut AppState) -> Effect {
    state.request_id = state.request_id.wrapping_add(1);
    state.is_loading = true;
    state.tick_count = 0;
    tracing::info!(request = state.request_id, query = %state.query, "starting weather lookup");
    Effect::Geocode {
        request: state.request_id,
        query: state.query.clone(),
    }
}

fn refresh(state: &mut AppState) -> DispatchResult<Effect> {
    if !meets_min_length(&state.query) {
        return DispatchResult::unchanged();
    }
    DispatchResult::changed_with(begin_pipeline(state))
}

fn is_current(state: &AppState, request: u64) -> bool {
    if request == state.request_id {
        return true;
    }
    tracing::debug!(
        request,
        latest = state.request_id,
        "dropping result from superseded lookup"
    );
    false
}
