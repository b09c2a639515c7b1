//! Error Banner Component
//!
//! Dismissable banner showing the most recent fetch error. Errors
//! auto-clear after a few seconds (see `GlobalState::show_error`).

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let error = state.error;

    view! {
        {move || {
            error.get().map(|message| view! {
                <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-6 flex items-center justify-between">
                    <span>{message}</span>
                    <button
                        class="ml-4 font-bold"
                        on:click=move |_| error.set(None)
                    >
                        "x"
                    </button>
                </div>
            })
        }}
    }
}
