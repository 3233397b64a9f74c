//! Actions demonstrating category inference and async patterns

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Entry category =====
    /// Append one empty city entry and focus it
    EntryAdd,

    /// Replace the focused entry's text
    EntryInput(String),

    /// Remove the entry at the given index
    EntryRemove(usize),

    /// Focus the next entry
    EntrySelectNext,

    /// Focus the previous entry
    EntrySelectPrev,

    // ===== Compare category =====
    /// Intent: Submit the current entries for comparison (triggers async fetch)
    CompareSubmit,

    /// Result: All city requests succeeded, reports in request order
    CompareDidLoad(Vec<WeatherReport>),

    /// Result: At least one city request failed
    CompareDidError(String),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
