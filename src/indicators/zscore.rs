// =============================================================================
// Z-Score
// =============================================================================
//
// Number of standard deviations the close sits from its reference average:
//   Z_t = (close_t - MA_t) / σ_t
//
// `zscore` takes the reference MA and σ explicitly and joins all three by
// date; `rolling_zscore` builds them from the same window.  Dates where σ is
// zero are undefined and left out of the output.
// =============================================================================

use tracing::trace;

use crate::error::{IndicatorError, Result};
use crate::indicators::sma::sma;
use crate::indicators::stddev::{is_degenerate, rolling_std};
use crate::types::{IndicatorSeries, PriceSeries, Window};

/// Z-score of `series` against a reference moving average and rolling σ.
///
/// Only dates present in all three inputs are considered.  Fails with
/// `DegenerateInput` when σ is zero on every one of them.
pub fn zscore(
    series: &PriceSeries,
    ma: &IndicatorSeries,
    std_dev: &IndicatorSeries,
) -> Result<IndicatorSeries> {
    let mut dates = Vec::with_capacity(ma.len());
    let mut values = Vec::with_capacity(ma.len());
    let mut candidates = 0usize;

    for (date, mean) in ma.iter() {
        let (Some(price), Some(sd)) = (series.get(date), std_dev.get(date)) else {
            continue;
        };
        candidates += 1;
        if is_degenerate(sd) {
            trace!(%date, "z-score undefined: zero standard deviation");
            continue;
        }
        dates.push(date);
        values.push((price - mean) / sd);
    }

    if candidates == 0 {
        return Err(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    if values.is_empty() {
        return Err(IndicatorError::degenerate(
            "standard deviation is zero on every date",
        ));
    }

    Ok(IndicatorSeries::from_parts(dates, values))
}

/// Z-score of each close against the SMA and σ of its own trailing window.
pub fn rolling_zscore(series: &PriceSeries, window: Window) -> Result<IndicatorSeries> {
    let ma = sma(series, window)?;
    let sd = rolling_std(series, window)?;
    zscore(series, &ma, &sd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{day, series};

    fn w(n: usize) -> Window {
        Window::new(n).unwrap()
    }

    #[test]
    fn zscore_is_zero_at_the_mean() {
        // Window [1, 2, 3]: last close equals the mean.
        let z = rolling_zscore(&series(&[1.0, 3.0, 2.0]), w(3)).unwrap();
        assert_eq!(z.len(), 1);
        assert_eq!(z.values()[0], 0.0);
    }

    #[test]
    fn zscore_known_value() {
        // Window [2,4,4,4,5,5,7,9]: mean 5, σ 2, last close 9 => z = 2.
        let z = rolling_zscore(&series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), w(8)).unwrap();
        assert!((z.values()[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zscore_skips_flat_windows() {
        // First two windows of 3 are flat, later ones are not.
        let s = series(&[5.0, 5.0, 5.0, 5.0, 6.0, 7.0]);
        let z = rolling_zscore(&s, w(3)).unwrap();
        assert_eq!(z.dates(), &[day(4), day(5)]);
    }

    #[test]
    fn zscore_on_a_large_level_is_defined() {
        let closes: Vec<f64> = (0..12).map(|i| 1e14 + 20.0 * (i % 4) as f64).collect();
        let z = rolling_zscore(&series(&closes), w(4)).unwrap();
        assert_eq!(z.len(), 9);
        assert!(z.values().iter().all(|v| v.is_finite() && v.abs() < 2.0));
    }

    #[test]
    fn zscore_all_flat_is_degenerate() {
        assert!(matches!(
            rolling_zscore(&series(&[3.0; 10]), w(4)),
            Err(IndicatorError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn zscore_with_disjoint_reference_is_insufficient() {
        let s = series(&[1.0, 2.0, 3.0]);
        let ma = IndicatorSeries::from_parts(vec![day(10)], vec![2.0]);
        let sd = IndicatorSeries::from_parts(vec![day(10)], vec![1.0]);
        assert!(matches!(
            zscore(&s, &ma, &sd),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn zscore_accepts_longer_reference() {
        // A 50-day MA and a 20-day σ: only the MA's dates are scored.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        let s = series(&closes);
        let ma = sma(&s, w(50)).unwrap();
        let sd = rolling_std(&s, w(20)).unwrap();
        let z = zscore(&s, &ma, &sd).unwrap();
        assert_eq!(z.dates(), ma.dates());
    }
}
