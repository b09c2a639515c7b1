//! Compare View
//!
//! Comparison tab: prediction vs. actual chart over a held-out window,
//! with the accuracy stats row.

use leptos::*;

use crate::components::{ComparisonChart, StatCard};
use crate::state::{self, GlobalState};
use hydrosight::accuracy::summarize_accuracy;
use hydrosight::series::display_name;
use hydrosight::state::{MAX_TEST_DAYS, MIN_TEST_DAYS};

#[component]
pub fn CompareView() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let comparison = state.comparison;

    let state_for_title = state.clone();
    let title = move || {
        let days = state_for_title.selections.with(|s| s.test_days());
        let city = state_for_title
            .selected_city()
            .map(|c| display_name(&c))
            .unwrap_or_else(|| "-".to_string());
        format!("Comparison over {} days - {}", days, city)
    };

    let counts = move || {
        let compared = comparison.with(|slot| slot.data().map(Vec::len).unwrap_or_default());
        format!("Comparing {} days of predictions vs actual levels", compared)
    };

    let has_data = move || comparison.with(|slot| slot.data().is_some_and(|d| !d.is_empty()));
    let is_loading = move || comparison.with(|slot| slot.is_loading());

    let compared_count = Signal::derive(move || {
        comparison
            .with(|slot| slot.data().map(Vec::len).unwrap_or_default())
            .to_string()
    });
    let accuracy = Signal::derive(move || {
        comparison.with(|slot| {
            format!(
                "{:.1}%",
                summarize_accuracy(slot.data().map_or(&[][..], Vec::as_slice))
            )
        })
    });

    let state_for_city = state.clone();
    let city_name = Signal::derive(move || {
        state_for_city
            .selected_city()
            .map(|c| display_name(&c))
            .unwrap_or_else(|| "-".to_string())
    });

    view! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h3 class="text-xl font-semibold">{title}</h3>
                <TestDaysControls />
            </div>
            <p class="text-sm text-gray-600 mb-4">{counts}</p>

            {move || {
                if has_data() {
                    view! { <ComparisonChart /> }.into_view()
                } else {
                    view! {
                        <div class="text-center py-12 text-gray-500">
                            {move || {
                                if is_loading() {
                                    "Loading comparison..."
                                } else {
                                    "Comparison data will appear here"
                                }
                            }}
                        </div>
                    }.into_view()
                }
            }}

            {move || {
                has_data().then(|| view! {
                    <div class="mt-8 grid grid-cols-1 md:grid-cols-3 gap-4">
                        <StatCard
                            label="Comparison"
                            value=compared_count
                            hint="days compared"
                        />
                        <StatCard
                            label="Model Accuracy"
                            value=accuracy
                            hint="100 - MAPE"
                        />
                        <StatCard
                            label="City"
                            value=city_name
                            hint="analyzed"
                        />
                    </div>
                })
            }}
        </div>
    }
}

/// Held-out window input plus a re-run button
#[component]
fn TestDaysControls() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let selections = state.selections;

    let state_for_input = state.clone();
    let on_input = move |ev| {
        if let Ok(days) = event_target_value(&ev).parse::<u16>() {
            state::set_test_days(&state_for_input, days);
        }
    };

    let on_click = move |_| {
        state::run_comparison(state.clone());
    };

    view! {
        <div class="flex items-center space-x-2">
            <label class="text-sm text-gray-600">"Test days"</label>
            <input
                type="number"
                min=MIN_TEST_DAYS
                max=MAX_TEST_DAYS
                prop:value=move || selections.with(|s| s.test_days()).to_string()
                on:input=on_input
                class="w-20 px-2 py-1 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
            />
            <button
                on:click=on_click
                class="px-3 py-1 bg-blue-600 text-white rounded-md hover:bg-blue-700 text-sm"
            >
                "Run"
            </button>
        </div>
    }
}
