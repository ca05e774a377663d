// =============================================================================
// Rolling Pearson Correlation
// =============================================================================
//
// For each trailing window of two date-aligned series:
//   r = Σ (x - x̄)(y - ȳ) / sqrt( Σ (x - x̄)^2 · Σ (y - ȳ)^2 )
//
// r lies in [-1, 1].  A window where either side is constant has no defined
// correlation; it is left out rather than reported as 0 or ±1.
// =============================================================================

use tracing::trace;

use crate::error::{require_len, IndicatorError, Result};
use crate::indicators::stddev::is_constant;
use crate::types::{require_same_dates, IndicatorSeries, PriceSeries, Window};

/// Rolling correlation of `a` and `b` over `window`.
///
/// Both series must carry identical dates (align them first).  Fails with
/// `DegenerateInput` when every window has zero variance on one side.
pub fn rolling_correlation(a: &PriceSeries, b: &PriceSeries, window: Window) -> Result<IndicatorSeries> {
    let period = window.get();
    if period < 2 {
        return Err(IndicatorError::InvalidParameter {
            reason: "correlation needs a window of at least two periods".to_string(),
        });
    }
    require_same_dates(a.dates(), b.dates())?;
    require_len(a.len(), period)?;

    let mut dates = Vec::with_capacity(a.len() - period + 1);
    let mut values = Vec::with_capacity(a.len() - period + 1);

    for (i, (wa, wb)) in a
        .values()
        .windows(period)
        .zip(b.values().windows(period))
        .enumerate()
    {
        let date = a.dates()[i + period - 1];
        match pearson(wa, wb) {
            Some(r) => {
                dates.push(date);
                values.push(r);
            }
            None => trace!(%date, "correlation undefined: constant window"),
        }
    }

    if values.is_empty() {
        return Err(IndicatorError::degenerate(
            "every correlation window has zero variance",
        ));
    }

    Ok(IndicatorSeries::from_parts(dates, values))
}

/// Pearson coefficient of two equal-length slices, `None` when either side
/// is constant.
pub(crate) fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if is_constant(x) || is_constant(y) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // Variations too small to square (below ~1e-154) underflow to zero.
    let denom = (var_x * var_y).sqrt();
    if !(denom > 0.0 && denom.is_finite()) {
        return None;
    }

    Some((cov / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{day, series};

    fn w(n: usize) -> Window {
        Window::new(n).unwrap()
    }

    fn noisy(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 1900.0 + 40.0 * (i as f64 * 0.37).sin() + 15.0 * (i as f64 * 1.3).cos())
            .collect()
    }

    #[test]
    fn self_correlation_is_one() {
        let s = series(&noisy(60));
        let c = rolling_correlation(&s, &s, w(20)).unwrap();
        assert_eq!(c.len(), 41);
        for &v in c.values() {
            assert!((v - 1.0).abs() < 1e-10, "got {v}");
        }
    }

    #[test]
    fn negation_correlation_is_minus_one() {
        let closes = noisy(60);
        let negated: Vec<f64> = closes.iter().map(|v| -v).collect();
        let c = rolling_correlation(&series(&closes), &series(&negated), w(20)).unwrap();
        for &v in c.values() {
            assert!((v + 1.0).abs() < 1e-10, "got {v}");
        }
    }

    #[test]
    fn correlation_is_scale_invariant() {
        // Gold vs. a linearly rescaled copy (e.g. a different currency).
        let closes = noisy(40);
        let scaled: Vec<f64> = closes.iter().map(|v| v * 24.5 + 3.0).collect();
        let c = rolling_correlation(&series(&closes), &series(&scaled), w(10)).unwrap();
        assert!(c.values().iter().all(|v| (v - 1.0).abs() < 1e-10));
    }

    #[test]
    fn correlation_values_are_bounded() {
        let a = noisy(80);
        let b: Vec<f64> = (0..80).map(|i| 104.0 + (i as f64 * 0.11).cos()).collect();
        let c = rolling_correlation(&series(&a), &series(&b), w(15)).unwrap();
        assert!(c.values().iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn constant_window_is_left_out() {
        // `b` is flat for its first five points, then moves.
        let a = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let b = series(&[9.0, 9.0, 9.0, 9.0, 9.0, 10.0, 11.0]);
        let c = rolling_correlation(&a, &b, w(3)).unwrap();
        assert_eq!(c.dates(), &[day(5), day(6)]);
    }

    #[test]
    fn small_moves_on_a_large_level_are_defined() {
        // Moves of tens of units on a 1e14 level still correlate.
        let closes: Vec<f64> = noisy(40).iter().map(|v| 1e14 + v).collect();
        let s = series(&closes);
        let c = rolling_correlation(&s, &s, w(10)).unwrap();
        assert_eq!(c.len(), 31);
        assert!(c.values().iter().all(|v| (v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn all_constant_windows_fail_closed() {
        let a = series(&noisy(10));
        let b = series(&[1.0; 10]);
        assert!(matches!(
            rolling_correlation(&a, &b, w(5)),
            Err(IndicatorError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn misaligned_series_rejected() {
        let a = series(&[1.0, 2.0, 3.0]);
        let b = PriceSeries::new(vec![(day(1), 1.0), (day(2), 2.0), (day(3), 4.0)]).unwrap();
        assert_eq!(
            rolling_correlation(&a, &b, w(2)),
            Err(IndicatorError::MisalignedSeries)
        );
    }

    #[test]
    fn window_of_one_rejected() {
        let a = series(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            rolling_correlation(&a, &a, w(1)),
            Err(IndicatorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn insufficient_data() {
        let a = series(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            rolling_correlation(&a, &a, w(5)),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }
}
