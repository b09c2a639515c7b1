//! Global Application State
//!
//! Reactive state management using Leptos signals. The result slots come
//! from the core crate: each fetch begins a request against its slot and
//! hands the returned token back on arrival, so a response from a
//! superseded request (e.g. the user switched city mid-flight) is dropped
//! instead of overwriting newer data.

use leptos::*;

use crate::api;
use hydrosight::series::{self, Anchor, ChartPoint, ComparisonPoint};
use hydrosight::state::{Selections, Slot, View};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Available cities from the service
    pub cities: RwSignal<Vec<String>>,
    /// Current selections (city, day counts, active view)
    pub selections: RwSignal<Selections>,
    /// Historical chart series slot
    pub historical: RwSignal<Slot<Vec<ChartPoint>>>,
    /// Prediction chart series slot
    pub predictions: RwSignal<Slot<Vec<ChartPoint>>>,
    /// Prediction/actual comparison slot
    pub comparison: RwSignal<Slot<Vec<ComparisonPoint>>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        cities: create_rw_signal(Vec::new()),
        selections: create_rw_signal(Selections::new()),
        historical: create_rw_signal(Slot::new()),
        predictions: create_rw_signal(Slot::new()),
        comparison: create_rw_signal(Slot::new()),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Currently selected city key
    pub fn selected_city(&self) -> Option<String> {
        self.selections.with(|s| s.city().map(str::to_string))
    }

    /// Historical context followed by the forecast, as one chart series
    pub fn combined_series(&self) -> Vec<ChartPoint> {
        series::merge_series(
            self.historical.with(|s| s.data().cloned().unwrap_or_default()),
            self.predictions.with(|s| s.data().cloned().unwrap_or_default()),
        )
    }

    /// Whether any slot has a request in flight
    pub fn is_loading(&self) -> bool {
        self.historical.with(Slot::is_loading)
            || self.predictions.with(Slot::is_loading)
            || self.comparison.with(Slot::is_loading)
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

// ============ Fetch Actions ============

/// Fetch the city list; selects the first city when none is selected
pub fn load_cities(state: GlobalState) {
    spawn_local(async move {
        match api::fetch_cities().await {
            Ok(cities) => {
                let first = cities.first().cloned();
                state.cities.set(cities);
                if state.selected_city().is_none() {
                    if let Some(city) = first {
                        select_city(state.clone(), city);
                    }
                }
            }
            Err(e) => {
                state.show_error(&format!("Failed to load cities: {}", e));
            }
        }
    });
}

/// Change the selected city; re-triggers the historical fetch on change
pub fn select_city(state: GlobalState, city: String) {
    let mut changed = false;
    state.selections.update(|s| changed = s.select_city(city));
    if changed {
        refresh_historical(state);
    }
}

/// Re-fetch the historical series for the current selection
pub fn refresh_historical(state: GlobalState) {
    let Some(city) = state.selected_city() else {
        return;
    };
    let window = state.selections.with_untracked(|s| s.days_to_predict()) as usize;

    let mut token = None;
    state.historical.update(|slot| token = Some(slot.begin()));
    let Some(token) = token else { return };

    spawn_local(async move {
        let result = api::fetch_historical(&city)
            .await
            .map(|records| series::historical_series(&records, &city, window, Anchor::Tail));

        if let Err(e) = &result {
            state.show_error(&format!("Failed to load historical data: {}", e));
        }
        state.historical.update(|slot| {
            if !slot.complete(token, result) {
                web_sys::console::warn_1(&"Discarded stale historical response".into());
            }
        });
    });
}

/// Request a forecast for the selected city
///
/// The forecast and its historical context are issued concurrently; each
/// lands in its own slot under its own token.
pub fn run_prediction(state: GlobalState) {
    let Some(city) = state.selected_city() else {
        return;
    };
    let days = state.selections.with_untracked(|s| s.days_to_predict());
    let window = days as usize;

    let mut token = None;
    state.predictions.update(|slot| token = Some(slot.begin()));
    let Some(token) = token else { return };

    {
        let state = state.clone();
        let city = city.clone();
        spawn_local(async move {
            let result = api::request_prediction(&city, days)
                .await
                .map(|points| series::prediction_series(&points, window, Anchor::Head));

            if let Err(e) = &result {
                state.show_error(&format!("Prediction failed: {}", e));
            }
            state.predictions.update(|slot| {
                if !slot.complete(token, result) {
                    web_sys::console::warn_1(&"Discarded stale prediction response".into());
                }
            });
        });
    }

    // Historical context trimmed to the same horizon
    refresh_historical(state);
}

/// Request a prediction/actual comparison for the selected city
pub fn run_comparison(state: GlobalState) {
    let Some(city) = state.selected_city() else {
        return;
    };
    let test_days = state.selections.with_untracked(|s| s.test_days());

    let mut token = None;
    state.comparison.update(|slot| token = Some(slot.begin()));
    let Some(token) = token else { return };

    spawn_local(async move {
        let result = api::request_comparison(&city, test_days)
            .await
            .map(|points| series::comparison_window(&points, test_days as usize));

        if let Err(e) = &result {
            state.show_error(&format!("Comparison failed: {}", e));
        }
        state.comparison.update(|slot| {
            if !slot.complete(token, result) {
                web_sys::console::warn_1(&"Discarded stale comparison response".into());
            }
        });
    });
}

// ============ Selection Updates ============

/// Update the forecast horizon; out-of-range values become an error banner
pub fn set_days_to_predict(state: &GlobalState, days: u16) {
    let mut result = Ok(());
    state.selections.update(|s| result = s.set_days_to_predict(days));
    if let Err(e) = result {
        state.show_error(&e.to_string());
    }
}

/// Update the held-out comparison window
pub fn set_test_days(state: &GlobalState, days: u16) {
    let mut result = Ok(());
    state.selections.update(|s| result = s.set_test_days(days));
    if let Err(e) = result {
        state.show_error(&e.to_string());
    }
}

/// Switch the active view; entering Compare triggers the comparison fetch
pub fn set_view(state: GlobalState, view: View) {
    state.selections.update(|s| s.set_view(view));
    if view == View::Compare {
        run_comparison(state);
    }
}
