//! Axis domain estimation for chart rendering
//!
//! A chart axis needs a numeric range that fits the plotted values with a
//! little breathing room. The estimate here is deterministic and pure: the
//! same values always produce the same domain.

use crate::series::{ChartPoint, ComparisonPoint};

/// Domain used when there is nothing to plot
pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Fraction of the value span added as margin on each side
const MARGIN_RATIO: f64 = 0.1;

/// Estimate a padded `[low, high]` axis domain over a set of values
///
/// Absent (`None`) and non-finite values are discarded. With no values left
/// the default `(0.0, 1.0)` domain is returned. Otherwise the margin is 10%
/// of the span; when the span is zero (all values equal) the margin falls
/// back to `1.0` so the axis never collapses to zero width.
pub fn estimate_domain<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;

    for value in values.into_iter().flatten() {
        if !value.is_finite() {
            continue;
        }
        seen = true;
        min = min.min(value);
        max = max.max(value);
    }

    if !seen {
        return DEFAULT_DOMAIN;
    }

    let mut margin = (max - min) * MARGIN_RATIO;
    if margin == 0.0 {
        margin = 1.0;
    }
    (min - margin, max + margin)
}

/// Axis domain for a single chart series
pub fn chart_domain(points: &[ChartPoint]) -> (f64, f64) {
    estimate_domain(points.iter().map(|p| Some(p.value)))
}

/// Axis domain covering both lines of a comparison series
pub fn comparison_domain(points: &[ComparisonPoint]) -> (f64, f64) {
    estimate_domain(
        points
            .iter()
            .flat_map(|p| [Some(p.actual), Some(p.predicted)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_default_domain() {
        assert_eq!(estimate_domain(std::iter::empty::<Option<f64>>()), (0.0, 1.0));
        assert_eq!(estimate_domain(vec![None, None]), (0.0, 1.0));
    }

    #[test]
    fn test_equal_values_fall_back_to_unit_margin() {
        let domain = estimate_domain(vec![Some(5.0), Some(5.0)]);
        assert_eq!(domain, (4.0, 6.0));
    }

    #[test]
    fn test_margin_is_ten_percent_of_span() {
        let (low, high) = estimate_domain(vec![Some(2.0), Some(8.0)]);
        assert!((low - 1.4).abs() < 1e-9);
        assert!((high - 8.6).abs() < 1e-9);
    }

    #[test]
    fn test_absent_and_non_finite_values_are_discarded() {
        let (low, high) = estimate_domain(vec![Some(2.0), None, Some(f64::NAN), Some(8.0)]);
        assert!((low - 1.4).abs() < 1e-9);
        assert!((high - 8.6).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_domain_covers_both_lines() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let points = vec![
            ComparisonPoint {
                date,
                actual: 2.0,
                predicted: 8.0,
            },
            ComparisonPoint {
                date,
                actual: 5.0,
                predicted: 5.0,
            },
        ];
        let (low, high) = comparison_domain(&points);
        assert!((low - 1.4).abs() < 1e-9);
        assert!((high - 8.6).abs() < 1e-9);
    }

    #[test]
    fn test_domain_is_deterministic() {
        let values = vec![Some(3.0), Some(1.0), Some(7.5)];
        assert_eq!(
            estimate_domain(values.clone()),
            estimate_domain(values),
        );
    }
}
