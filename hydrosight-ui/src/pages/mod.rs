//! Pages
//!
//! Top-level views for the two dashboard tabs.

pub mod compare;
pub mod predict;

pub use compare::CompareView;
pub use predict::PredictView;
