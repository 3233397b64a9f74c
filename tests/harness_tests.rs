//! Tests using the StoreTestHarness and EffectStoreTestHarness
//!
//! These tests demonstrate the integrated testing pattern where
//! store, component, and render testing are combined.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EventKind};
use weather_compare::{
    action::Action,
    components::{CompareDisplay, CompareDisplayProps, Component},
    effect::Effect,
    reducer::reducer,
    state::{AppState, WeatherReport},
};

/// Helper to create one mock report
fn mock_report(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.into(),
        temperature: 22.5,
        description: "晴天".into(),
        humidity: 45,
        wind_speed: 3.2,
    }
}

/// Helper to create state with a loaded comparison
fn state_with_reports() -> AppState {
    AppState {
        cities: vec!["Tokyo".into()],
        comparison: DataResource::Loaded(vec![mock_report("Tokyo")]),
        ..Default::default()
    }
}

fn ctrl(c: char) -> EventKind {
    EventKind::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_compare_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(
        AppState {
            cities: vec!["Tokyo".into(), "Osaka".into()],
            ..Default::default()
        },
        reducer,
    );

    // Trigger submit - should set loading and emit effect
    harness.dispatch_collect(Action::CompareSubmit);
    harness.assert_state(|s| s.comparison.is_loading());

    // Verify effect was emitted with the entries in input order
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchComparison { cities } if cities == &["Tokyo".to_string(), "Osaka".to_string()])
    });

    // Simulate async completion
    harness.complete_action(Action::CompareDidLoad(vec![
        mock_report("Tokyo"),
        mock_report("Osaka"),
    ]));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.comparison.is_loaded());
    harness.assert_state(|s| s.comparison.data().unwrap().len() == 2);
    harness.assert_state(|s| s.comparison.data().unwrap()[0].city == "Tokyo");
}

#[test]
fn test_compare_error_flow() {
    let mut harness = EffectStoreTestHarness::new(
        AppState {
            cities: vec!["Tokyo".into(), "Nonexistentville".into()],
            ..Default::default()
        },
        reducer,
    );

    harness.dispatch_collect(Action::CompareSubmit);
    harness.assert_state(|s| s.comparison.is_loading());

    // One bad city fails the whole comparison; no weather data survives
    harness.complete_action(Action::CompareDidError(
        "city Nonexistentville not found".into(),
    ));
    harness.process_emitted();

    harness.assert_state(|s| s.comparison.is_failed());
    harness.assert_state(|s| s.comparison.error() == Some("city Nonexistentville not found"));
    harness.assert_state(|s| s.comparison.data().is_none());
}

#[test]
fn test_resubmission_discards_stale_results() {
    let mut harness = EffectStoreTestHarness::new(state_with_reports(), reducer);

    harness.assert_state(|s| s.comparison.is_loaded());

    // A new submission replaces the prior results before anything settles
    harness.dispatch_collect(Action::CompareSubmit);
    harness.assert_state(|s| s.comparison.is_loading());
    harness.assert_state(|s| s.comparison.data().is_none());
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Dispatch multiple actions at once
    let results = harness.dispatch_all([Action::EntryAdd, Action::EntryAdd, Action::EntryAdd]);

    // All should have changed state
    assert_eq!(results, vec![true, true, true]);

    // Net result: one initial entry plus three added
    harness.assert_state(|s| s.cities.len() == 4);
    harness.assert_state(|s| s.selected == 3);
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_add_and_remove_entries() {
    let mut store = tui_dispatch::EffectStore::new(AppState::default(), reducer);
    let mut component = CompareDisplay::new();

    // Ctrl+N through the component adds an entry
    let actions: Vec<Action> = component
        .handle_event(
            &ctrl('n'),
            CompareDisplayProps {
                state: store.state(),
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    for action in actions {
        store.dispatch(action);
    }
    assert_eq!(store.state().cities.len(), 2);

    // Ctrl+D removes the focused entry again
    let actions: Vec<Action> = component
        .handle_event(
            &ctrl('d'),
            CompareDisplayProps {
                state: store.state(),
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    for action in actions {
        store.dispatch(action);
    }
    assert_eq!(store.state().cities.len(), 1);

    // With a single entry left, Ctrl+D is refused by the form
    let actions: Vec<Action> = component
        .handle_event(
            &ctrl('d'),
            CompareDisplayProps {
                state: store.state(),
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    actions.assert_empty();
    assert_eq!(store.state().cities.len(), 1);
}

#[test]
fn test_enter_submits_through_component() {
    let mut store = tui_dispatch::EffectStore::new(
        AppState {
            cities: vec!["Tokyo".into()],
            ..Default::default()
        },
        reducer,
    );
    let mut component = CompareDisplay::new();

    let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let actions: Vec<Action> = component
        .handle_event(
            &enter,
            CompareDisplayProps {
                state: store.state(),
                is_focused: true,
            },
        )
        .into_iter()
        .collect();

    actions.assert_count(1);
    actions.assert_first(Action::CompareSubmit);

    let result = store.dispatch(Action::CompareSubmit);
    assert!(store.state().comparison.is_loading());
    assert!(matches!(
        &result.effects[0],
        Effect::FetchComparison { cities } if cities == &["Tokyo".to_string()]
    ));
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_loading_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = CompareDisplay::new();

    // Trigger loading
    harness.dispatch_collect(Action::CompareSubmit);

    let output = harness.render_plain(80, 24, |frame, area, state| {
        let props = CompareDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Loading"),
        "Loading placeholder should be visible in output:\n{}",
        output
    );
}

#[test]
fn test_render_after_completion_shows_reports() {
    let mut harness = EffectStoreTestHarness::new(
        AppState {
            cities: vec!["Tokyo".into()],
            ..Default::default()
        },
        reducer,
    );
    let mut component = CompareDisplay::new();

    harness.dispatch_collect(Action::CompareSubmit);
    harness.complete_action(Action::CompareDidLoad(vec![mock_report("Tokyo")]));
    harness.process_emitted();

    let output = harness.render_plain(80, 24, |frame, area, state| {
        let props = CompareDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("晴天"),
        "Weather description should be visible in output:\n{}",
        output
    );
    assert!(!output.contains("Loading"));
}

// ============================================================================
// Effect Assertions Tests
// ============================================================================

#[test]
fn test_effect_assertions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Initially no effects
    let effects = harness.drain_effects();
    effects.effects_empty();

    // Entry edits never hit the network
    harness.dispatch_collect(Action::EntryAdd);
    harness.dispatch_collect(Action::EntryInput("Tokyo".into()));
    let effects = harness.drain_effects();
    effects.effects_empty();

    // After submit, exactly one fetch effect
    harness.dispatch_collect(Action::CompareSubmit);
    let effects = harness.drain_effects();
    effects.effects_not_empty();
    effects.effects_count(1);
    effects.effects_all_match(|e| matches!(e, Effect::FetchComparison { .. }));
}
