//! Hydrosight Dashboard
//!
//! Water-level prediction dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Historical water levels per monitored city
//! - Model forecasts with adjustable horizon
//! - Prediction vs. actual comparison with an accuracy summary
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the prediction service via HTTP; all
//! series shaping comes from the `hydrosight` core crate.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
