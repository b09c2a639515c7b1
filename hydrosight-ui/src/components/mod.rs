//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod controls;
pub mod error_banner;
pub mod loading;
pub mod stat_card;

pub use chart::{ComparisonChart, PredictionChart};
pub use controls::Controls;
pub use error_banner::ErrorBanner;
pub use loading::Loading;
pub use stat_card::StatCard;
