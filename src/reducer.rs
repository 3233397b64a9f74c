//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, LOADING_ANIM_CYCLE_TICKS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Entry actions =====
        Action::EntryAdd => {
            state.cities.push(String::new());
            state.selected = state.cities.len() - 1;
            DispatchResult::changed()
        }

        Action::EntryInput(value) => {
            // Callers only pass a valid focus index by construction; a stale
            // index is a silent no-op.
            match state.cities.get_mut(state.selected) {
                Some(entry) => {
                    *entry = value;
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::EntryRemove(index) => {
            // No floor here; the form refuses to emit a removal for the last
            // remaining entry.
            if index >= state.cities.len() {
                return DispatchResult::unchanged();
            }
            state.cities.remove(index);
            if index < state.selected {
                state.selected -= 1;
            }
            if state.selected >= state.cities.len() {
                state.selected = state.cities.len().saturating_sub(1);
            }
            DispatchResult::changed()
        }

        Action::EntrySelectNext => {
            if state.cities.len() > 1 {
                state.selected = (state.selected + 1) % state.cities.len();
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::EntrySelectPrev => {
            if state.cities.len() > 1 {
                state.selected = state
                    .selected
                    .checked_sub(1)
                    .unwrap_or(state.cities.len() - 1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Compare actions =====
        Action::CompareSubmit => {
            // Every submission starts from a clean slate: previous results
            // and previous error are both dropped before the fetch begins.
            state.comparison = DataResource::Loading;
            state.tick_count = 0;
            state.loading_anim_ticks_remaining = 0;
            DispatchResult::changed_with(Effect::FetchComparison {
                cities: state.cities.clone(),
            })
        }

        Action::CompareDidLoad(reports) => {
            state.comparison = DataResource::Loaded(reports);
            state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
            DispatchResult::changed()
        }

        Action::CompareDidError(msg) => {
            state.comparison = DataResource::Failed(msg);
            state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}
