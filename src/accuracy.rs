//! Prediction accuracy summary
//!
//! Aggregates a comparison series into the single percentage shown on the
//! dashboard's accuracy card, via mean absolute percentage error (MAPE).

use crate::series::{ChartPoint, ComparisonPoint};

/// Mean absolute percentage error over a comparison series, in percent
///
/// Points whose actual value is `0` are skipped entirely: the percentage
/// error is undefined there, and neither the error sum nor the divisor
/// includes them. With no usable points the result is `0.0`. No `NaN` or
/// infinity escapes this function for finite input.
pub fn mean_absolute_percentage_error(series: &[ComparisonPoint]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for point in series {
        if point.actual == 0.0 {
            continue;
        }
        sum += ((point.actual - point.predicted) / point.actual).abs() * 100.0;
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Model accuracy as `100 - MAPE`, unclamped
///
/// A wildly wrong model can score below zero; that is reported as-is rather
/// than hidden. An empty series (or one with only zero-actual points, see
/// [`mean_absolute_percentage_error`]) yields `0.0`.
pub fn summarize_accuracy(series: &[ComparisonPoint]) -> f64 {
    let usable = series.iter().filter(|p| p.actual != 0.0).count();
    if usable == 0 {
        return 0.0;
    }
    100.0 - mean_absolute_percentage_error(series)
}

/// Arithmetic mean of a chart series, `0.0` when empty
///
/// Backs the "average predicted level" card next to the forecast chart.
pub fn mean_level(points: &[ChartPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesKind;
    use chrono::NaiveDate;

    fn point(actual: f64, predicted: f64) -> ComparisonPoint {
        ComparisonPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            actual,
            predicted,
        }
    }

    #[test]
    fn test_empty_series_yields_zero() {
        assert_eq!(summarize_accuracy(&[]), 0.0);
        assert_eq!(mean_absolute_percentage_error(&[]), 0.0);
    }

    #[test]
    fn test_perfect_prediction_is_one_hundred_percent() {
        assert_eq!(summarize_accuracy(&[point(10.0, 10.0)]), 100.0);
    }

    #[test]
    fn test_twenty_percent_error_is_eighty_percent_accuracy() {
        // |10 - 12| / 10 * 100 = 20
        assert_eq!(summarize_accuracy(&[point(10.0, 12.0)]), 80.0);
    }

    #[test]
    fn test_accuracy_is_not_clamped() {
        // 300% error -> -200% accuracy, reported as-is
        assert_eq!(summarize_accuracy(&[point(1.0, 4.0)]), -200.0);
    }

    #[test]
    fn test_zero_actual_points_are_skipped() {
        let series = vec![point(0.0, 5.0), point(10.0, 12.0)];
        assert_eq!(mean_absolute_percentage_error(&series), 20.0);
        assert_eq!(summarize_accuracy(&series), 80.0);
    }

    #[test]
    fn test_all_zero_actual_series_yields_zero() {
        let series = vec![point(0.0, 5.0), point(0.0, 1.0)];
        assert_eq!(summarize_accuracy(&series), 0.0);
    }

    #[test]
    fn test_mape_averages_over_points() {
        // 20% and 10% error -> 15% MAPE
        let series = vec![point(10.0, 12.0), point(10.0, 11.0)];
        assert_eq!(mean_absolute_percentage_error(&series), 15.0);
        assert_eq!(summarize_accuracy(&series), 85.0);
    }

    #[test]
    fn test_mean_level() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let points: Vec<ChartPoint> = [2.0, 4.0, 6.0]
            .iter()
            .map(|&value| ChartPoint {
                date,
                value,
                kind: SeriesKind::Prediction,
            })
            .collect();
        assert_eq!(mean_level(&points), 4.0);
        assert_eq!(mean_level(&[]), 0.0);
    }
}
