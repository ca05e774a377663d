// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the trailing `period` observations:
//   SMA_t = (close_{t-period+1} + ... + close_t) / period
//
// The window sum is carried forward (add the new close, drop the oldest), so
// the whole series costs O(len) instead of O(len * period).
// =============================================================================

use crate::error::{require_len, Result};
use crate::types::{IndicatorSeries, PriceSeries, Window};

/// SMA of `series` over `window`, defined from index `window - 1` onward.
///
/// Output length is `series.len() - window + 1`.
pub fn sma(series: &PriceSeries, window: Window) -> Result<IndicatorSeries> {
    let values = sma_values(series.values(), window.get())?;
    Ok(IndicatorSeries::trailing(series.dates(), values))
}

/// Rolling mean over a raw slice.  Shared with the other rolling indicators.
pub(crate) fn sma_values(values: &[f64], period: usize) -> Result<Vec<f64>> {
    require_len(values.len(), period)?;

    let period_f = period as f64;
    let mut sum: f64 = values[..period].iter().sum();
    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(sum / period_f);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        result.push(sum / period_f);
    }

    Ok(result)
}
