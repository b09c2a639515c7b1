//! State Management
//!
//! Global application state and the fetch actions that drive it.

pub mod global;

pub use global::{
    load_cities, provide_global_state, refresh_historical, run_comparison, run_prediction,
    select_city, set_days_to_predict, set_test_days, set_view, GlobalState,
};
