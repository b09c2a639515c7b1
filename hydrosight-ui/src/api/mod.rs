//! API Layer
//!
//! HTTP communication with the prediction service.

pub mod client;

pub use client::{
    fetch_cities, fetch_historical, get_api_base, request_comparison, request_prediction,
};
