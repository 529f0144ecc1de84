//! Action and state tests using TestHarness
//!
//! FRAMEWORK PATTERN: TestHarness
//! - Create harness with initial state
//! - Emit actions to simulate user/async events
//! - Drain and assert emitted actions

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use weather_widget::{
    action::{Action, Fetched},
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CurrentConditions, ResolvedLocation},
};

fn lviv() -> ResolvedLocation {
    ResolvedLocation {
        name: "Lviv".into(),
        latitude: 49.84,
        longitude: 24.03,
        timezone: "Europe/Kyiv".into(),
    }
}

#[test]
fn test_reducer_query_change() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(!store.state().is_loading);

    let result = store.dispatch(Action::SearchQueryChange("Lviv".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().is_loading);
    assert_eq!(result.effects.len(), 2);
    assert!(matches!(result.effects[0], Effect::PersistQuery { .. }));
    assert!(matches!(
        result.effects[1],
        Effect::Geocode { request: 1, ref query } if query == "Lviv"
    ));
}

#[test]
fn test_reducer_location_then_current() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::SearchQueryChange("Lviv".into()));

    let result = store.dispatch(Action::WeatherLocationDidResolve(Fetched::new(1, lviv())));
    assert!(matches!(result.effects[0], Effect::FetchCurrent { request: 1, .. }));
    assert_eq!(store.state().city.as_deref(), Some("Lviv"));

    let current = CurrentConditions {
        time: "2024-03-05T10:00".into(),
        ..Default::default()
    };
    let result = store.dispatch(Action::WeatherCurrentDidLoad(Fetched::new(1, current.clone())));
    assert!(matches!(result.effects[0], Effect::FetchDaily { request: 1, .. }));
    assert_eq!(store.state().current.as_ref(), Some(&current));
    assert!(store.state().is_loading, "daily step still pending");
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::SearchQueryChange("a".into()));
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r q u", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::SearchQueryChange("Kyiv".into()));
    harness.emit(Action::WeatherRefresh);
    harness.emit(Action::WeatherDidError(Fetched::new(1, "oops".into())));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::SearchQueryChange("Kyiv".into()),
        Action::WeatherLocationDidResolve(Fetched::new(1, lviv())),
    ];

    assert_emitted!(actions, Action::SearchQueryChange(_));
    assert_emitted!(actions, Action::WeatherLocationDidResolve(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::WeatherDidError(_));
}

#[test]
fn test_with_query() {
    let state = AppState::with_query("Kyiv");

    assert_eq!(state.query, "Kyiv");
    assert!(!state.is_loading);
    assert!(state.current.is_none());
    assert!(state.daily.is_none());
}
