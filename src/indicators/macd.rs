// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD      = EMA(close, fast) - EMA(close, slow)
//   Signal    = EMA(MACD, signal)
//   Histogram = MACD - Signal
//
// Both EMAs use the SMA seed, so the MACD line starts on index `slow - 1`
// and the signal line `signal - 1` points later.  All three output series
// are trimmed to the signal line's dates so they can be read side by side.
// =============================================================================

use serde::Serialize;

use crate::error::{require_len_plus, IndicatorError, Result};
use crate::indicators::ema::ema_values;
use crate::types::{IndicatorSeries, PriceSeries, Window};

/// The three MACD lines, sharing identical dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

/// Compute MACD with the given fast / slow / signal windows (canonically
/// 12 / 26 / 9).
///
/// Requires `fast < slow` and at least `slow + signal - 1` observations.
pub fn macd(series: &PriceSeries, fast: Window, slow: Window, signal: Window) -> Result<MacdSeries> {
    let (fast, slow, signal) = (fast.get(), slow.get(), signal.get());
    if fast >= slow {
        return Err(IndicatorError::InvalidParameter {
            reason: format!("fast window {fast} must be shorter than slow window {slow}"),
        });
    }
    require_len_plus(series.len(), slow, signal - 1)?;

    let closes = series.values();
    let fast_ema = ema_values(closes, fast)?;
    let slow_ema = ema_values(closes, slow)?;

    // fast_ema starts at index fast-1, slow_ema at slow-1: skip the head of
    // the fast line so both refer to the same closes.
    let offset = slow - fast;
    let macd_line: Vec<f64> = fast_ema[offset..]
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema_values(&macd_line, signal)?;
    let macd_line = macd_line[signal - 1..].to_vec();
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    let dates = series.dates();
    Ok(MacdSeries {
        macd: IndicatorSeries::trailing(dates, macd_line),
        signal: IndicatorSeries::trailing(dates, signal_line),
        histogram: IndicatorSeries::trailing(dates, histogram),
    })
}
