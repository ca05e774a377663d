// =============================================================================
// Rolling Standard Deviation
// =============================================================================
//
// Population standard deviation (divide by `period`) of each trailing window:
//   mean_t = SMA_t
//   σ_t    = sqrt( Σ (close_i - mean_t)^2 / period )
//
// This is the σ behind Bollinger Bands and the Z-score.  A window of
// identical closes has σ = 0 exactly; consumers that divide by σ treat that
// as undefined, see `is_degenerate`.
// =============================================================================

use crate::error::{require_len, Result};
use crate::types::{IndicatorSeries, PriceSeries, Window};

/// Rolling population standard deviation of `series` over `window`.
///
/// Output length is `series.len() - window + 1`.
pub fn rolling_std(series: &PriceSeries, window: Window) -> Result<IndicatorSeries> {
    let period = window.get();
    require_len(series.len(), period)?;

    let values: Vec<f64> = series
        .values()
        .windows(period)
        .map(|w| population_std(w).0)
        .collect();

    Ok(IndicatorSeries::trailing(series.dates(), values))
}

/// Returns `(σ, mean)` of `window` using the two-pass formula.
///
/// A window of identical values returns exactly `(0.0, value)`: summing and
/// dividing would otherwise leave a rounding residue in σ.
pub(crate) fn population_std(window: &[f64]) -> (f64, f64) {
    if is_constant(window) {
        return (0.0, window.first().copied().unwrap_or(0.0));
    }
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (variance.sqrt(), mean)
}

/// True when every value in `window` is identical.
pub(crate) fn is_constant(window: &[f64]) -> bool {
    window.iter().all(|v| Some(v) == window.first())
}

/// True when `dispersion` cannot be used as a divisor.
pub(crate) fn is_degenerate(dispersion: f64) -> bool {
    !(dispersion > 0.0 && dispersion.is_finite())
}
