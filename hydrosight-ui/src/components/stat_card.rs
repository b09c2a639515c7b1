//! Stat Card Component
//!
//! Small card showing one headline number with a label above and a hint
//! below, as in the stats row under each chart.

use leptos::*;

#[component]
pub fn StatCard(
    /// Label shown above the value
    #[prop(into)]
    label: String,
    /// Headline value, already formatted
    #[prop(into)]
    value: Signal<String>,
    /// Hint shown below the value
    #[prop(into)]
    hint: String,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-6 text-center">
            <h4 class="text-lg font-semibold text-gray-700">{label}</h4>
            <p class="text-3xl font-bold text-blue-600">{move || value.get()}</p>
            <p class="text-sm text-gray-500">{hint}</p>
        </div>
    }
}
