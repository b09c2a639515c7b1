//! Dashboard Controls
//!
//! City selector, forecast-horizon input, and the predict button.

use leptos::*;

use crate::components::loading::InlineLoading;
use crate::state::{self, GlobalState};
use hydrosight::series::display_name;
use hydrosight::state::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS};

/// Control card above the charts
#[component]
pub fn Controls() -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow-lg p-6 mb-8">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <CitySelect />
                <DaysInput />
                <PredictButton />
            </div>
        </div>
    }
}

/// City selector fed from the service's city list
#[component]
fn CitySelect() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let cities = state.cities;

    let state_for_change = state.clone();
    let on_change = move |ev| {
        state::select_city(state_for_change.clone(), event_target_value(&ev));
    };

    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700 mb-2">
                "City"
            </label>
            <select
                on:change=on_change
                prop:value=move || state.selected_city().unwrap_or_default()
                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
            >
                {move || {
                    cities.get()
                        .into_iter()
                        .map(|city| view! {
                            <option value=city.clone()>{display_name(&city)}</option>
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

/// Forecast horizon input, bounded to the service's allowed range
#[component]
fn DaysInput() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let selections = state.selections;

    let on_input = move |ev| {
        if let Ok(days) = event_target_value(&ev).parse::<u16>() {
            state::set_days_to_predict(&state, days);
        }
    };

    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700 mb-2">
                "Days to Predict"
            </label>
            <input
                type="number"
                min=MIN_FORECAST_DAYS
                max=MAX_FORECAST_DAYS
                prop:value=move || selections.with(|s| s.days_to_predict()).to_string()
                on:input=on_input
                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
            />
        </div>
    }
}

/// Triggers the forecast fetch for the current selections
#[component]
fn PredictButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_click = state.clone();
    let on_click = move |_| {
        state::run_prediction(state_for_click.clone());
    };

    let state_for_disabled = state.clone();
    let disabled = move || {
        state_for_disabled.is_loading() || state_for_disabled.selected_city().is_none()
    };

    view! {
        <div class="flex items-end">
            <button
                on:click=on_click
                disabled=disabled
                class="w-full bg-blue-600 text-white px-4 py-2 rounded-md hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed flex items-center justify-center"
            >
                {move || {
                    if state.is_loading() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        view! { <span>"Predict"</span> }.into_view()
                    }
                }}
            </button>
        </div>
    }
}
