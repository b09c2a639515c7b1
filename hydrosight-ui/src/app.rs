//! App Root Component
//!
//! Main application component: header, controls, and the two tab views.

use leptos::*;

use crate::components::{Controls, ErrorBanner};
use crate::pages::{CompareView, PredictView};
use crate::state::{self, provide_global_state, GlobalState};
use hydrosight::state::View;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch the city list on mount; selecting the first city pulls its history
    let state_for_effect = state.clone();
    create_effect(move |_| {
        state::load_cities(state_for_effect.clone());
    });

    let view_signal = state.selections;

    view! {
        <div class="min-h-screen bg-gradient-to-br from-blue-50 to-indigo-100">
            <div class="container mx-auto px-4 py-8">
                <Header />
                <ErrorBanner />
                <Controls />

                <div class="bg-white rounded-lg shadow-lg p-6">
                    <Tabs />

                    {move || {
                        match view_signal.with(|s| s.view()) {
                            View::Predict => view! { <PredictView /> }.into_view(),
                            View::Compare => view! { <CompareView /> }.into_view(),
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

/// Page header with title and subtitle
#[component]
fn Header() -> impl IntoView {
    view! {
        <div class="text-center mb-8">
            <h1 class="text-4xl font-bold text-gray-800 mb-4">
                "Water Level Predictions"
            </h1>
            <p class="text-gray-600 text-lg">
                "Forecasts for monitored river cities"
            </p>
        </div>
    }
}

/// Tab strip switching between the forecast and comparison views
#[component]
fn Tabs() -> impl IntoView {
    view! {
        <div class="flex space-x-4 mb-4">
            <TabButton label="Predictions" target=View::Predict />
            <TabButton label="Comparison" target=View::Compare />
        </div>
    }
}

#[component]
fn TabButton(label: &'static str, target: View) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let selections = state.selections;

    let state_for_click = state;
    let on_click = move |_| {
        // Entering the comparison tab also triggers the comparison fetch
        state::set_view(state_for_click.clone(), target);
    };

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "px-4 py-2 rounded-md";
                if selections.with(|s| s.view()) == target {
                    format!("{} bg-blue-600 text-white", base)
                } else {
                    format!("{} bg-gray-200 text-gray-700 hover:bg-gray-300", base)
                }
            }
        >
            {label}
        </button>
    }
}
