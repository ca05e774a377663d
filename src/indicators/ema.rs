// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// Seeding: the first EMA value is the SMA of the first `period` closes and
// sits on the `period`-th observation.  Nothing is emitted before it, so the
// EMA and SMA of the same window share a date domain.
// =============================================================================

use crate::error::{require_len, Result};
use crate::types::{IndicatorSeries, PriceSeries, Window};

/// Compute the EMA series for `series` and look-back `window`.
///
/// Each output element corresponds to a close starting at index `window - 1`;
/// the output length is `series.len() - window + 1`.
pub fn ema(series: &PriceSeries, window: Window) -> Result<IndicatorSeries> {
    let values = ema_values(series.values(), window.get())?;
    Ok(IndicatorSeries::trailing(series.dates(), values))
}

/// EMA over a raw slice.  MACD reuses this for its signal line.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Result<Vec<f64>> {
    require_len(values.len(), period)?;

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        let next = value * multiplier + prev * (1.0 - multiplier);
        result.push(next);
        prev = next;
    }

    Ok(result)
}
