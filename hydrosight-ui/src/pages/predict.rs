//! Predict View
//!
//! Forecast tab: merged historical + prediction chart with its stats row.

use leptos::*;

use crate::components::{Loading, PredictionChart, StatCard};
use crate::state::GlobalState;
use hydrosight::accuracy::mean_level;
use hydrosight::series::display_name;
use hydrosight::state::Slot;

#[component]
pub fn PredictView() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_title = state.clone();
    let title = move || {
        let days = state_for_title.selections.with(|s| s.days_to_predict());
        let city = state_for_title
            .selected_city()
            .map(|c| display_name(&c))
            .unwrap_or_else(|| "-".to_string());
        format!("Predictions for {} days - {}", days, city)
    };

    let state_for_counts = state.clone();
    let counts = move || {
        let historical = state_for_counts
            .historical
            .with(|slot| slot.data().map(Vec::len).unwrap_or_default());
        let predicted = state_for_counts
            .predictions
            .with(|slot| slot.data().map(Vec::len).unwrap_or_default());
        format!(
            "Historical data ({} days) + Predictions ({} days)",
            historical, predicted
        )
    };

    let state_for_chart = state.clone();
    let has_data = move || !state_for_chart.combined_series().is_empty();
    let state_for_loading = state.clone();
    let is_loading = move || state_for_loading.is_loading();

    let predictions = state.predictions;
    let predicted_count = Signal::derive(move || {
        predictions
            .with(|slot| slot.data().map(Vec::len).unwrap_or_default())
            .to_string()
    });
    let mean_predicted = Signal::derive(move || {
        predictions.with(|slot| {
            format!(
                "{:.2}",
                mean_level(slot.data().map_or(&[][..], Vec::as_slice))
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

    let state_for_stats = state;
    let has_predictions =
        move || state_for_stats.predictions.with(|slot: &Slot<_>| slot.data().is_some());

    view! {
        <div>
            <h3 class="text-xl font-semibold mb-4">{title}</h3>
            <p class="text-sm text-gray-600 mb-4">{counts}</p>

            {move || {
                if has_data() {
                    view! { <PredictionChart /> }.into_view()
                } else if is_loading() {
                    view! { <Loading /> }.into_view()
                } else {
                    view! {
                        <div class="text-center py-12 text-gray-500">
                            "Select a city and click Predict to see the forecast"
                        </div>
                    }.into_view()
                }
            }}

            {move || {
                has_predictions().then(|| view! {
                    <div class="mt-8 grid grid-cols-1 md:grid-cols-3 gap-4">
                        <StatCard
                            label="Predictions"
                            value=predicted_count
                            hint="days predicted"
                        />
                        <StatCard
                            label="Mean Level"
                            value=mean_predicted
                            hint="predicted level"
                        />
                        <StatCard
                            label="City"
                            value=city_name
                            hint="selected"
                        />
                    </div>
                })
            }}
        </div>
    }
}
