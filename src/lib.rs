//! # Hydrosight
//!
//! Water-level prediction dashboard core. Fetches historical river levels
//! and model forecasts for a set of monitored cities from an external
//! prediction service, and shapes them into chart-ready series.
//!
//! ## Modules
//!
//! - [`series`]: data model and series shaping (filtering, window trimming, merging)
//! - [`chart`]: padded axis-domain estimation
//! - [`accuracy`]: MAPE-based accuracy summary
//! - [`state`]: per-slot fetch state machine with stale-response discard
//! - [`client`]: REST client for the prediction service (feature `client`)
//! - [`dashboard`]: controller tying selections, slots, and client together (feature `client`)
//! - [`config`]: TOML/env configuration (feature `client`)
//!
//! The pure modules compile for `wasm32-unknown-unknown`; the browser
//! frontend in `hydrosight-ui/` consumes them with
//! `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hydrosight::client::{ClientConfig, PredictionClient};
//! use hydrosight::dashboard::Dashboard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PredictionClient::new(ClientConfig::default());
//!     let mut dashboard = Dashboard::new(client);
//!
//!     // Picks the first monitored city and loads its history
//!     dashboard.load_cities().await?;
//!
//!     dashboard.set_days_to_predict(7)?;
//!     dashboard.run_prediction().await;
//!
//!     for point in dashboard.combined_series() {
//!         println!("{} {:.2} ({:?})", point.date, point.value, point.kind);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod accuracy;
pub mod chart;
pub mod series;
pub mod state;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod dashboard;

// Re-export top-level types for convenience
pub use accuracy::{mean_absolute_percentage_error, mean_level, summarize_accuracy};

pub use chart::{chart_domain, comparison_domain, estimate_domain, DEFAULT_DOMAIN};

pub use series::{
    display_name, Anchor, ChartPoint, ComparisonPoint, LevelRecord, PredictionPoint, SeriesKind,
};

pub use state::{
    Phase, RequestToken, Selections, Slot, StateError, View, MAX_FORECAST_DAYS, MAX_TEST_DAYS,
    MIN_FORECAST_DAYS, MIN_TEST_DAYS,
};

#[cfg(feature = "client")]
pub use client::{ClientConfig, ClientError, PredictionClient};

#[cfg(feature = "client")]
pub use config::{Config, ConfigError};

#[cfg(feature = "client")]
pub use dashboard::Dashboard;
