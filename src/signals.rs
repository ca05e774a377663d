// =============================================================================
// Signal classification
// =============================================================================
//
// Maps the latest indicator values onto discrete, typed states using the
// thresholds in `SignalThresholds`:
//
//   RSI        >= overbought => Overbought,  <= oversold => Oversold
//   MACD       above signal  => Bullish,     below       => Bearish
//   Price      above long MA => Uptrend,     below       => Downtrend
//   Spread     >  wide       => Wide,        <  narrow   => Narrow
//   |Z-score|  >= stretched  => Stretched (with direction)
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::MacdSeries;

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_spread_wide() -> f64 {
    3.5
}

fn default_spread_narrow() -> f64 {
    2.5
}

fn default_zscore_stretched() -> f64 {
    2.0
}

/// Classification thresholds.  Every field has a serde default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    /// Spread (in percentage points) above which the differential is wide.
    #[serde(default = "default_spread_wide")]
    pub spread_wide: f64,

    /// Spread below which the differential is narrow.
    #[serde(default = "default_spread_narrow")]
    pub spread_narrow: f64,

    #[serde(default = "default_zscore_stretched")]
    pub zscore_stretched: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            spread_wide: default_spread_wide(),
            spread_narrow: default_spread_narrow(),
            zscore_stretched: default_zscore_stretched(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdBias {
    Bullish,
    Bearish,
    Flat,
}

/// Whether the MACD line crossed its signal line on the latest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdCrossover {
    CrossedAbove,
    CrossedBelow,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    AtAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadRegime {
    Wide,
    Narrow,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZScoreBand {
    StretchedHigh,
    StretchedLow,
    Normal,
}

impl SignalThresholds {
    pub fn rsi_zone(&self, rsi: f64) -> RsiZone {
        if rsi >= self.rsi_overbought {
            RsiZone::Overbought
        } else if rsi <= self.rsi_oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn spread_regime(&self, spread: f64) -> SpreadRegime {
        if spread > self.spread_wide {
            SpreadRegime::Wide
        } else if spread < self.spread_narrow {
            SpreadRegime::Narrow
        } else {
            SpreadRegime::Balanced
        }
    }

    pub fn zscore_band(&self, z: f64) -> ZScoreBand {
        if z >= self.zscore_stretched {
            ZScoreBand::StretchedHigh
        } else if z <= -self.zscore_stretched {
            ZScoreBand::StretchedLow
        } else {
            ZScoreBand::Normal
        }
    }
}

/// Bias of the latest MACD point, `None` when the series is empty.
pub fn macd_bias(m: &MacdSeries) -> Option<MacdBias> {
    let (_, h) = m.histogram.latest()?;
    Some(if h > 0.0 {
        MacdBias::Bullish
    } else if h < 0.0 {
        MacdBias::Bearish
    } else {
        MacdBias::Flat
    })
}

/// Crossover on the last step, `None` with fewer than two points.
pub fn macd_crossover(m: &MacdSeries) -> Option<MacdCrossover> {
    let h = m.histogram.values();
    if h.len() < 2 {
        return None;
    }
    let (prev, last) = (h[h.len() - 2], h[h.len() - 1]);
    Some(if prev <= 0.0 && last > 0.0 {
        MacdCrossover::CrossedAbove
    } else if prev >= 0.0 && last < 0.0 {
        MacdCrossover::CrossedBelow
    } else {
        MacdCrossover::None
    })
}

pub fn trend(price: f64, long_ma: f64) -> Trend {
    if price > long_ma {
        Trend::Uptrend
    } else if price < long_ma {
        Trend::Downtrend
    } else {
        Trend::AtAverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::macd;
    use crate::types::tests::series;
    use crate::types::Window;

    fn w(n: usize) -> Window {
        Window::new(n).unwrap()
    }

    #[test]
    fn rsi_zones() {
        let t = SignalThresholds::default();
        assert_eq!(t.rsi_zone(100.0), RsiZone::Overbought);
        assert_eq!(t.rsi_zone(70.0), RsiZone::Overbought);
        assert_eq!(t.rsi_zone(50.0), RsiZone::Neutral);
        assert_eq!(t.rsi_zone(30.0), RsiZone::Oversold);
        assert_eq!(t.rsi_zone(0.0), RsiZone::Oversold);
    }

    #[test]
    fn spread_regimes() {
        let t = SignalThresholds::default();
        assert_eq!(t.spread_regime(3.8), SpreadRegime::Wide);
        assert_eq!(t.spread_regime(3.5), SpreadRegime::Balanced);
        assert_eq!(t.spread_regime(2.5), SpreadRegime::Balanced);
        assert_eq!(t.spread_regime(2.0), SpreadRegime::Narrow);
    }

    #[test]
    fn zscore_bands() {
        let t = SignalThresholds::default();
        assert_eq!(t.zscore_band(2.4), ZScoreBand::StretchedHigh);
        assert_eq!(t.zscore_band(-2.0), ZScoreBand::StretchedLow);
        assert_eq!(t.zscore_band(0.3), ZScoreBand::Normal);
    }

    #[test]
    fn trend_against_long_average() {
        assert_eq!(trend(2100.0, 1950.0), Trend::Uptrend);
        assert_eq!(trend(1900.0, 1950.0), Trend::Downtrend);
        assert_eq!(trend(1950.0, 1950.0), Trend::AtAverage);
    }

    #[test]
    fn macd_bias_follows_histogram() {
        // Accelerating rally: MACD climbs faster than its signal line.
        let up: Vec<f64> = (0..40).map(|x| 100.0 + 0.2 * (x * x) as f64).collect();
        let m = macd(&series(&up), w(3), w(6), w(3)).unwrap();
        assert_eq!(macd_bias(&m), Some(MacdBias::Bullish));

        let down: Vec<f64> = (0..40).map(|x| 500.0 - 0.2 * (x * x) as f64).collect();
        let m = macd(&series(&down), w(3), w(6), w(3)).unwrap();
        assert_eq!(macd_bias(&m), Some(MacdBias::Bearish));
    }

    #[test]
    fn macd_crossover_detected() {
        // Accelerating sell-off, then a sharp rebound on the final bar.
        let mut closes: Vec<f64> = (0..30).map(|x| 300.0 - 0.2 * (x * x) as f64).collect();
        closes.push(300.0);
        let m = macd(&series(&closes), w(3), w(6), w(3)).unwrap();
        assert_eq!(macd_crossover(&m), Some(MacdCrossover::CrossedAbove));

        let mut closes: Vec<f64> = (0..30).map(|x| 100.0 + 0.2 * (x * x) as f64).collect();
        closes.push(40.0);
        let m = macd(&series(&closes), w(3), w(6), w(3)).unwrap();
        assert_eq!(macd_crossover(&m), Some(MacdCrossover::CrossedBelow));

        let m = macd(&series(&closes[..30]), w(3), w(6), w(3)).unwrap();
        assert_eq!(macd_crossover(&m), Some(MacdCrossover::None));
    }

    #[test]
    fn thresholds_partial_json() {
        let t: SignalThresholds = serde_json::from_str(r#"{ "rsi_overbought": 80.0 }"#).unwrap();
        assert_eq!(t.rsi_overbought, 80.0);
        assert_eq!(t.rsi_oversold, 30.0);
        assert_eq!(t.spread_wide, 3.5);
    }
}
