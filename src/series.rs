//! Core data types and series shaping for the water-level pipeline
//!
//! This module defines the types flowing from the prediction service to the
//! charts, and the transforms between them:
//! - `LevelRecord`: one row of the historical table (value may be absent)
//! - `PredictionPoint`: a forecast level for one future day
//! - `ComparisonPoint`: a held-out actual paired with its prediction
//! - `ChartPoint`: the normalized point the chart layer consumes
//!
//! Every transform preserves chronological order. Trimming takes a
//! contiguous window from the head or tail of a series and never pads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the historical table returned by `/api/data/{city}`
///
/// The service keys level columns by city, and a level may be missing for
/// some dates (gaps in the gauge record), so values are `Option<f64>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelRecord {
    /// Calendar date of the measurement
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    /// Water level per city column; `None` where the gauge has no reading
    #[serde(flatten)]
    pub levels: HashMap<String, Option<f64>>,
}

impl LevelRecord {
    /// Look up the level for a city, treating a null column as absent
    pub fn level_for(&self, city: &str) -> Option<f64> {
        self.levels.get(city).copied().flatten()
    }

    /// Whether this record carries a column for `city` at all (even a null one)
    pub fn has_city(&self, city: &str) -> bool {
        self.levels.contains_key(city)
    }
}

/// A forecast level for one future day, as returned by `/api/predict/{city}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionPoint {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    pub predicted_level: f64,
}

/// A held-out actual observation paired with the model's prediction for the
/// same date, as returned by `/api/compare/{city}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonPoint {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

/// Which series a chart point came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// A measured historical level
    Historical,
    /// A model-forecast level
    Prediction,
}

/// The normalized point consumed by the chart layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub kind: SeriesKind,
}

/// Which end of a series a trim window anchors to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Keep the first `window` points
    Head,
    /// Keep the last `window` points
    Tail,
}

/// Keep a contiguous window of `window` points from one end of a series
///
/// Returns `min(window, len)` points in original order; a short series is
/// returned whole, never padded. A zero window yields an empty series.
pub fn trim_window<T: Clone>(items: &[T], window: usize, anchor: Anchor) -> Vec<T> {
    if window == 0 || items.is_empty() {
        return Vec::new();
    }
    let take = window.min(items.len());
    match anchor {
        Anchor::Head => items[..take].to_vec(),
        Anchor::Tail => items[items.len() - take..].to_vec(),
    }
}

/// Shape historical records into a chart series for one city
///
/// Records without a reading for `city` are dropped first; the window is
/// applied to what remains. Tail-anchored with `window = days` this yields
/// "the last N measured days", matching the prediction context shown next
/// to a forecast.
pub fn historical_series(
    records: &[LevelRecord],
    city: &str,
    window: usize,
    anchor: Anchor,
) -> Vec<ChartPoint> {
    let present: Vec<ChartPoint> = records
        .iter()
        .filter_map(|record| {
            record.level_for(city).map(|value| ChartPoint {
                date: record.date,
                value,
                kind: SeriesKind::Historical,
            })
        })
        .collect();
    trim_window(&present, window, anchor)
}

/// Shape forecast points into a chart series
///
/// The service decides how many points it returns; head-anchored trimming
/// keeps exactly the first `window` of them (the days the user asked for).
pub fn prediction_series(
    points: &[PredictionPoint],
    window: usize,
    anchor: Anchor,
) -> Vec<ChartPoint> {
    let series: Vec<ChartPoint> = points
        .iter()
        .map(|point| ChartPoint {
            date: point.date,
            value: point.predicted_level,
            kind: SeriesKind::Prediction,
        })
        .collect();
    trim_window(&series, window, anchor)
}

/// Keep the first `test_days` points of a comparison series
pub fn comparison_window(points: &[ComparisonPoint], test_days: usize) -> Vec<ComparisonPoint> {
    trim_window(points, test_days, Anchor::Head)
}

/// Concatenate a historical series with a prediction series
///
/// No re-sort and no dedup: the historical window ends where the forecast
/// begins, so the merged series is chronological by construction.
pub fn merge_series(historical: Vec<ChartPoint>, predictions: Vec<ChartPoint>) -> Vec<ChartPoint> {
    let mut merged = historical;
    merged.extend(predictions);
    merged
}

/// Human-readable name for a city key: underscores to spaces, title case
///
/// `"ciudad_bolivar"` becomes `"Ciudad Bolivar"`.
pub fn display_name(city: &str) -> String {
    city.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn record(day: u32, level: Option<f64>) -> LevelRecord {
        let mut levels = HashMap::new();
        levels.insert("caicara".to_string(), level);
        LevelRecord {
            date: date(day),
            levels,
        }
    }

    #[test]
    fn test_trim_tail_keeps_last_window_in_order() {
        let items: Vec<u32> = (1..=10).collect();
        let trimmed = trim_window(&items, 3, Anchor::Tail);
        assert_eq!(trimmed, vec![8, 9, 10]);
    }

    #[test]
    fn test_trim_head_keeps_first_window_in_order() {
        let items: Vec<u32> = (1..=10).collect();
        let trimmed = trim_window(&items, 4, Anchor::Head);
        assert_eq!(trimmed, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_trim_never_pads_short_series() {
        let items = vec![1, 2];
        assert_eq!(trim_window(&items, 5, Anchor::Tail), vec![1, 2]);
        assert_eq!(trim_window(&items, 5, Anchor::Head), vec![1, 2]);
    }

    #[test]
    fn test_trim_zero_window_is_empty() {
        let items = vec![1, 2, 3];
        assert!(trim_window(&items, 0, Anchor::Tail).is_empty());
        assert!(trim_window::<u32>(&[], 3, Anchor::Head).is_empty());
    }

    #[test]
    fn test_historical_series_drops_absent_values_before_trimming() {
        let records = vec![
            record(1, Some(2.0)),
            record(2, None),
            record(3, Some(3.0)),
            record(4, Some(4.0)),
        ];
        let series = historical_series(&records, "caicara", 2, Anchor::Tail);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, date(3));
        assert_eq!(series[1].date, date(4));
        assert!(series.iter().all(|p| p.kind == SeriesKind::Historical));
    }

    #[test]
    fn test_historical_series_unknown_city_is_empty() {
        let records = vec![record(1, Some(2.0))];
        assert!(historical_series(&records, "palua", 7, Anchor::Tail).is_empty());
    }

    #[test]
    fn test_prediction_series_head_trim() {
        let points: Vec<PredictionPoint> = (1..=9)
            .map(|day| PredictionPoint {
                date: date(day),
                predicted_level: day as f64,
            })
            .collect();
        let series = prediction_series(&points, 7, Anchor::Head);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, date(1));
        assert_eq!(series[6].date, date(7));
        assert!(series.iter().all(|p| p.kind == SeriesKind::Prediction));
    }

    #[test]
    fn test_merge_preserves_argument_order() {
        let historical = vec![ChartPoint {
            date: date(1),
            value: 1.0,
            kind: SeriesKind::Historical,
        }];
        let predictions = vec![ChartPoint {
            date: date(2),
            value: 2.0,
            kind: SeriesKind::Prediction,
        }];
        let merged = merge_series(historical, predictions);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].kind, SeriesKind::Historical);
        assert_eq!(merged[1].kind, SeriesKind::Prediction);
    }

    #[test]
    fn test_merged_forecast_window() {
        // 30 days of history, a 7-day forecast request: trimmed to 7 each,
        // the merged chart series is exactly 7 historical + 7 predicted
        // points in chronological order.
        let records: Vec<LevelRecord> = (1..=30).map(|day| record(day, Some(day as f64))).collect();
        let forecast: Vec<PredictionPoint> = (1..=7)
            .map(|day| PredictionPoint {
                date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
                predicted_level: 30.0 + day as f64,
            })
            .collect();

        let historical = historical_series(&records, "caicara", 7, Anchor::Tail);
        let predictions = prediction_series(&forecast, 7, Anchor::Head);
        let merged = merge_series(historical, predictions);

        assert_eq!(merged.len(), 14);
        assert!(merged[..7].iter().all(|p| p.kind == SeriesKind::Historical));
        assert!(merged[7..].iter().all(|p| p.kind == SeriesKind::Prediction));
        assert_eq!(merged[0].date, date(24));
        assert_eq!(merged[6].date, date(30));
        assert!(merged.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_level_record_deserializes_flattened_columns() {
        let json = r#"{"fecha": "2024-03-01", "caicara": 12.5, "palua": null}"#;
        let record: LevelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.level_for("caicara"), Some(12.5));
        assert_eq!(record.level_for("palua"), None);
        assert!(record.has_city("palua"));
        assert!(!record.has_city("ayacucho"));
    }

    #[test]
    fn test_display_name_formats_city_keys() {
        assert_eq!(display_name("ayacucho"), "Ayacucho");
        assert_eq!(display_name("ciudad_bolivar"), "Ciudad Bolivar");
        assert_eq!(display_name(""), "");
    }
}
