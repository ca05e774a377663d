// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Split each delta into gain = max(delta, 0), loss = max(-delta, 0).
// Step 3 — Average gains and losses over the look-back:
//            Simple: trailing `period` SMA of gains / losses (the default).
//            Wilder: seed with the SMA of the first `period` deltas, then
//              avg = (prev_avg * (period - 1) + current) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Zero-denominator policy (avg_loss == 0):
//   - avg_gain > 0  => RSI = 100 (only gains in the window)
//   - avg_gain == 0 => RSI = 50  (no movement at all)
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{require_len_plus, Result};
use crate::types::{IndicatorSeries, PriceSeries, Window};

/// How average gain and average loss are smoothed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RsiSmoothing {
    /// Trailing simple moving average of gains and losses.
    #[default]
    Simple,
    /// Wilder's recursive smoothing.
    Wilder,
}

/// Compute the RSI series for `series` over `window`.
///
/// The first `window` closes are consumed to build the first average, so the
/// output starts at index `window` and has `series.len() - window` points.
pub fn rsi(series: &PriceSeries, window: Window, smoothing: RsiSmoothing) -> Result<IndicatorSeries> {
    let period = window.get();
    require_len_plus(series.len(), period, 1)?;

    let closes = series.values();
    let gains: Vec<f64> = closes.windows(2).map(|w| (w[1] - w[0]).max(0.0)).collect();
    let losses: Vec<f64> = closes.windows(2).map(|w| (w[0] - w[1]).max(0.0)).collect();

    let values = match smoothing {
        RsiSmoothing::Simple => simple_rsi(&gains, &losses, period),
        RsiSmoothing::Wilder => wilder_rsi(&gains, &losses, period),
    };

    Ok(IndicatorSeries::trailing(series.dates(), values))
}

fn simple_rsi(gains: &[f64], losses: &[f64], period: usize) -> Vec<f64> {
    let period_f = period as f64;
    // Each window is summed afresh: a carried sum leaves rounding residue
    // after a loss leaves the window, which would defeat the zero-loss rule.
    gains
        .windows(period)
        .zip(losses.windows(period))
        .map(|(g, l)| {
            let avg_gain = g.iter().sum::<f64>() / period_f;
            let avg_loss = l.iter().sum::<f64>() / period_f;
            rsi_from_averages(avg_gain, avg_loss)
        })
        .collect()
}

fn wilder_rsi(gains: &[f64], losses: &[f64], period: usize) -> Vec<f64> {
    let period_f = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period_f;

    let mut result = Vec::with_capacity(gains.len() - period + 1);
    result.push(rsi_from_averages(avg_gain, avg_loss));

    for (&gain, &loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        result.push(rsi_from_averages(avg_gain, avg_loss));
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
    }
}
