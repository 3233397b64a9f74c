//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Current weather for one city, as returned by OpenWeatherMap
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    /// City name as echoed by the API
    pub city: String,
    /// Temperature in °C (requests are always metric)
    pub temperature: f32,
    /// Condition description (requests ask for Japanese text)
    pub description: String,
    /// Humidity percentage
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f32,
}

/// Animation timing for the title gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Ordered city-name entries, one per input row. Duplicates and empty
    /// strings are allowed and sent to the API as-is.
    #[debug(section = "Input", label = "Cities", debug_fmt)]
    pub cities: Vec<String>,

    /// Index of the focused entry
    #[debug(section = "Input", label = "Focused")]
    pub selected: usize,

    /// Comparison lifecycle: Empty → Loading → Loaded/Failed.
    /// Loaded holds one report per requested city, in request order; Failed
    /// holds the single error message. Each submission replaces this
    /// wholesale, so stale results never survive a resubmit.
    #[debug(section = "Comparison", label = "Result", debug_fmt)]
    pub comparison: DataResource<Vec<WeatherReport>>,

    // --- Animation internals (skipped) ---
    /// Animation frame counter (for gradient seam)
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,
}

impl AppState {
    /// Focused entry text, if the focus index is valid
    pub fn selected_city(&self) -> Option<&str> {
        self.cities.get(self.selected).map(String::as_str)
    }

    /// Mean temperature across loaded reports (drives the title gradient)
    pub fn mean_temperature(&self) -> Option<f32> {
        let reports = self.comparison.data()?;
        if reports.is_empty() {
            return None;
        }
        let sum: f32 = reports.iter().map(|r| r.temperature).sum();
        Some(sum / reports.len() as f32)
    }

    pub fn loading_anim_active(&self) -> bool {
        self.comparison.is_loading() || self.loading_anim_ticks_remaining > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            // One empty entry at startup
            cities: vec![String::new()],
            selected: 0,
            comparison: DataResource::Empty,
            tick_count: 0,
            loading_anim_ticks_remaining: 0,
        }
    }
}
