// =============================================================================
// Indicator report
// =============================================================================
//
// Runs every configured indicator over a primary series (and, optionally, a
// secondary series for the cross-asset block) and collects the latest value
// of each into one serialisable snapshot.
//
// Each indicator is computed on its own: a degenerate correlation window or
// a too-short history for MA200 shows up as an `error` outcome for that entry
// only, and every other entry is still filled in.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::alignment::align_pair;
use crate::config::EngineConfig;
use crate::error::{IndicatorError, Result};
use crate::indicators::{
    ema, macd, ratio, rolling_correlation, rolling_zscore, rsi, sma, spread, MacdSeries,
};
use crate::signals::{
    macd_bias, macd_crossover, trend, MacdBias, MacdCrossover, RsiZone, SpreadRegime, Trend,
    ZScoreBand,
};
use crate::types::{IndicatorSeries, PriceSeries, Window};

// =============================================================================
// Report types
// =============================================================================

/// Result of one indicator: its payload, or why it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok { value: T },
    Error { kind: String, message: String },
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok { value } => Some(value),
            Self::Error { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::Error { kind, .. } => Some(kind),
        }
    }
}

/// Latest point of an indicator series plus its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub points: usize,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub last_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageReport {
    pub window: usize,
    pub sma: Outcome<LatestPoint>,
    pub ema: Outcome<LatestPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub window: usize,
    pub price: f64,
    pub long_ma: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiReport {
    pub latest: LatestPoint,
    pub zone: RsiZone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdReport {
    pub date: NaiveDate,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub points: usize,
    pub bias: MacdBias,
    pub crossover: Option<MacdCrossover>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZScoreReport {
    pub latest: LatestPoint,
    pub band: ZScoreBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadReport {
    pub latest: LatestPoint,
    /// Change of the spread over the configured number of points.
    pub change: Option<f64>,
    pub regime: SpreadRegime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub secondary: SeriesSummary,
    pub aligned_points: usize,
    pub correlation: Outcome<LatestPoint>,
    pub spread: Outcome<SpreadReport>,
    pub ratio: Outcome<LatestPoint>,
}

/// Full snapshot for one primary series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    pub primary: SeriesSummary,
    pub moving_averages: Vec<MovingAverageReport>,
    pub trend: Outcome<TrendReport>,
    pub rsi: Outcome<RsiReport>,
    pub macd: Outcome<MacdReport>,
    pub zscore: Outcome<ZScoreReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<Outcome<PairReport>>,
}

/// A series together with the label it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct NamedSeries<'a> {
    pub name: &'a str,
    pub series: &'a PriceSeries,
}

// =============================================================================
// Report assembly
// =============================================================================

/// Compute every configured indicator for `primary`, plus the cross-asset
/// block when `secondary` is given.
pub fn build_report(
    primary: NamedSeries<'_>,
    secondary: Option<NamedSeries<'_>>,
    config: &EngineConfig,
) -> IndicatorReport {
    let series = match config.lookback {
        Some(n) => primary.series.tail(n),
        None => primary.series.clone(),
    };
    debug!(name = primary.name, points = series.len(), "building indicator report");

    let moving_averages = config
        .ma_windows
        .iter()
        .map(|&n| MovingAverageReport {
            window: n,
            sma: outcome(
                "sma",
                window(n).and_then(|w| sma(&series, w)).and_then(|s| latest_point(&s)),
            ),
            ema: outcome(
                "ema",
                window(n).and_then(|w| ema(&series, w)).and_then(|s| latest_point(&s)),
            ),
        })
        .collect();

    let th = &config.thresholds;

    let trend_outcome = outcome("trend", trend_report(&series, config.trend_window));

    let rsi_outcome = outcome(
        "rsi",
        window(config.rsi_window)
            .and_then(|w| rsi(&series, w, config.rsi_smoothing))
            .and_then(|s| latest_point(&s))
            .map(|latest| RsiReport {
                zone: th.rsi_zone(latest.value),
                latest,
            }),
    );

    let macd_outcome = outcome("macd", macd_report(&series, config));

    let zscore_outcome = outcome(
        "zscore",
        window(config.zscore_window)
            .and_then(|w| rolling_zscore(&series, w))
            .and_then(|s| latest_point(&s))
            .map(|latest| ZScoreReport {
                band: th.zscore_band(latest.value),
                latest,
            }),
    );

    let pair = secondary.map(|other| outcome("pair", pair_report(primary.series, other, config)));

    IndicatorReport {
        primary: summarize(primary.name, &series),
        moving_averages,
        trend: trend_outcome,
        rsi: rsi_outcome,
        macd: macd_outcome,
        zscore: zscore_outcome,
        pair,
    }
}

fn trend_report(series: &PriceSeries, n: usize) -> Result<TrendReport> {
    let long = sma(series, window(n)?)?;
    let (_, long_ma) = long.latest().ok_or(IndicatorError::InsufficientData {
        required: n,
        available: series.len(),
    })?;
    let (_, price) = series.last().ok_or(IndicatorError::InsufficientData {
        required: n,
        available: 0,
    })?;
    Ok(TrendReport {
        window: n,
        price,
        long_ma,
        trend: trend(price, long_ma),
    })
}

fn macd_report(series: &PriceSeries, config: &EngineConfig) -> Result<MacdReport> {
    let p = &config.macd;
    let m: MacdSeries = macd(series, window(p.fast)?, window(p.slow)?, window(p.signal)?)?;
    let empty = || IndicatorError::InsufficientData {
        required: p.slow.saturating_add(p.signal.saturating_sub(1)),
        available: series.len(),
    };
    let (date, macd_value) = m.macd.latest().ok_or_else(empty)?;
    let (_, signal) = m.signal.latest().ok_or_else(empty)?;
    let (_, histogram) = m.histogram.latest().ok_or_else(empty)?;
    Ok(MacdReport {
        date,
        macd: macd_value,
        signal,
        histogram,
        points: m.macd.len(),
        bias: macd_bias(&m).ok_or_else(empty)?,
        crossover: macd_crossover(&m),
    })
}

fn pair_report(
    primary: &PriceSeries,
    other: NamedSeries<'_>,
    config: &EngineConfig,
) -> Result<PairReport> {
    let (a, b) = align_pair(primary, other.series, config.alignment)?;
    let (a, b) = match config.lookback {
        Some(n) => (a.tail(n), b.tail(n)),
        None => (a, b),
    };

    let correlation = outcome(
        "correlation",
        window(config.correlation_window)
            .and_then(|w| rolling_correlation(&a, &b, w))
            .and_then(|s| latest_point(&s)),
    );

    let spread_report = outcome(
        "spread",
        spread(&a, &b).and_then(|s| {
            let latest = latest_point(&s)?;
            Ok(SpreadReport {
                change: s.change_over(config.spread_change_periods).ok(),
                regime: config.thresholds.spread_regime(latest.value),
                latest,
            })
        }),
    );

    let ratio_report = outcome("ratio", ratio(&a, &b).and_then(|s| latest_point(&s)));

    Ok(PairReport {
        secondary: summarize(other.name, &b),
        aligned_points: a.len(),
        correlation,
        spread: spread_report,
        ratio: ratio_report,
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn window(n: usize) -> Result<Window> {
    Window::new(n)
}

fn latest_point(s: &IndicatorSeries) -> Result<LatestPoint> {
    let (date, value) = s.latest().ok_or(IndicatorError::InsufficientData {
        required: 1,
        available: 0,
    })?;
    Ok(LatestPoint {
        date,
        value,
        points: s.len(),
    })
}

fn summarize(name: &str, series: &PriceSeries) -> SeriesSummary {
    SeriesSummary {
        name: name.to_string(),
        points: series.len(),
        first: series.dates().first().copied(),
        last: series.dates().last().copied(),
        last_value: series.last().map(|(_, v)| v),
    }
}

fn outcome<T>(indicator: &str, result: Result<T>) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::Ok { value },
        Err(e) => {
            warn!(indicator, kind = e.kind(), error = %e, "indicator unavailable");
            Outcome::Error {
                kind: e.kind().to_string(),
                message: e.to_string(),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{day, series};

    fn gold(len: usize) -> PriceSeries {
        series(
            &(0..len)
                .map(|i| 1800.0 + i as f64 * 0.8 + 25.0 * (i as f64 * 0.21).sin())
                .collect::<Vec<_>>(),
        )
    }

    fn dxy(len: usize) -> PriceSeries {
        series(
            &(0..len)
                .map(|i| 104.0 - i as f64 * 0.01 + 1.5 * (i as f64 * 0.17).cos())
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn full_history_fills_every_entry() {
        let g = gold(300);
        let d = dxy(300);
        let report = build_report(
            NamedSeries { name: "Gold", series: &g },
            Some(NamedSeries { name: "DXY", series: &d }),
            &EngineConfig::default(),
        );

        assert_eq!(report.primary.points, 300);
        assert_eq!(report.moving_averages.len(), 2);
        assert!(report.moving_averages.iter().all(|m| m.sma.is_ok() && m.ema.is_ok()));
        assert!(report.trend.is_ok());
        assert!(report.rsi.is_ok());
        assert!(report.macd.is_ok());
        assert!(report.zscore.is_ok());

        let pair = report.pair.as_ref().and_then(Outcome::value).unwrap();
        assert_eq!(pair.aligned_points, 300);
        assert!(pair.correlation.is_ok());
        assert!(pair.spread.is_ok());
        assert!(pair.ratio.is_ok());
        assert!(pair.spread.value().unwrap().change.is_some());
    }

    #[test]
    fn short_history_fails_only_long_windows() {
        let g = gold(60);
        let report = build_report(NamedSeries { name: "Gold", series: &g }, None, &EngineConfig::default());

        // MA50 fits, MA200 does not.
        assert!(report.moving_averages[0].sma.is_ok());
        assert_eq!(
            report.moving_averages[1].sma.error_kind(),
            Some("InsufficientData")
        );
        assert_eq!(report.trend.error_kind(), Some("InsufficientData"));
        // Everything with a shorter window still succeeds.
        assert!(report.rsi.is_ok());
        assert!(report.macd.is_ok());
        assert!(report.zscore.is_ok());
        assert!(report.pair.is_none());
    }

    #[test]
    fn degenerate_pair_does_not_spoil_the_rest() {
        let g = gold(250);
        let flat = series(&[100.0; 250]);
        let report = build_report(
            NamedSeries { name: "Gold", series: &g },
            Some(NamedSeries { name: "Peg", series: &flat }),
            &EngineConfig::default(),
        );

        let pair = report.pair.as_ref().and_then(Outcome::value).unwrap();
        assert_eq!(pair.correlation.error_kind(), Some("DegenerateInput"));
        assert!(pair.spread.is_ok());
        assert!(pair.ratio.is_ok());
        assert!(report.trend.is_ok());
        assert!(report.rsi.is_ok());
    }

    #[test]
    fn disjoint_secondary_reports_pair_error() {
        let g = gold(40);
        let later = PriceSeries::new((0..40).map(|i| (day(1000 + i), 1.0 + i as f64)).collect()).unwrap();
        let mut config = EngineConfig::default();
        config.alignment = crate::alignment::AlignmentPolicy::InnerJoin;
        let report = build_report(
            NamedSeries { name: "Gold", series: &g },
            Some(NamedSeries { name: "Later", series: &later }),
            &config,
        );
        assert_eq!(
            report.pair.as_ref().and_then(|p| p.error_kind()),
            Some("InsufficientData")
        );
        assert!(report.rsi.is_ok());
    }

    #[test]
    fn zero_window_is_invalid_parameter() {
        let g = gold(100);
        let mut config = EngineConfig::default();
        config.rsi_window = 0;
        config.ma_windows = vec![0, 10];
        let report = build_report(NamedSeries { name: "Gold", series: &g }, None, &config);
        assert_eq!(report.rsi.error_kind(), Some("InvalidParameter"));
        assert_eq!(report.moving_averages[0].sma.error_kind(), Some("InvalidParameter"));
        assert!(report.moving_averages[1].sma.is_ok());
    }

    #[test]
    fn lookback_trims_inputs() {
        let g = gold(400);
        let mut config = EngineConfig::default();
        config.lookback = Some(250);
        let report = build_report(NamedSeries { name: "Gold", series: &g }, None, &config);
        assert_eq!(report.primary.points, 250);
        assert_eq!(report.primary.first, Some(day(150)));
        let ma200 = report.moving_averages[1].sma.value().unwrap();
        assert_eq!(ma200.points, 51);
    }

    #[test]
    fn lookback_applies_to_both_summaries() {
        let g = gold(400);
        let d = dxy(400);
        let mut config = EngineConfig::default();
        config.lookback = Some(250);
        let report = build_report(
            NamedSeries { name: "Gold", series: &g },
            Some(NamedSeries { name: "DXY", series: &d }),
            &config,
        );
        let pair = report.pair.as_ref().and_then(Outcome::value).unwrap();
        assert_eq!(pair.secondary.points, 250);
        assert_eq!(pair.secondary.first, report.primary.first);
        assert_eq!(pair.secondary.last, report.primary.last);
        assert_eq!(pair.aligned_points, 250);
    }

    #[test]
    fn huge_windows_fail_only_their_own_entry() {
        let g = gold(300);
        let d = dxy(300);
        let mut config = EngineConfig::default();
        config.rsi_window = usize::MAX;
        config.macd.signal = usize::MAX;
        config.trend_window = usize::MAX;
        config.spread_change_periods = usize::MAX;
        let report = build_report(
            NamedSeries { name: "Gold", series: &g },
            Some(NamedSeries { name: "DXY", series: &d }),
            &config,
        );
        assert_eq!(report.rsi.error_kind(), Some("InsufficientData"));
        assert_eq!(report.macd.error_kind(), Some("InsufficientData"));
        assert_eq!(report.trend.error_kind(), Some("InsufficientData"));
        assert!(report.zscore.is_ok());
        assert!(report.moving_averages.iter().all(|m| m.sma.is_ok()));

        let pair = report.pair.as_ref().and_then(Outcome::value).unwrap();
        let spread = pair.spread.value().unwrap();
        assert_eq!(spread.change, None);
        assert!(pair.correlation.is_ok());
    }

    #[test]
    fn report_serialises_with_status_tags() {
        let g = gold(30);
        let report = build_report(NamedSeries { name: "Gold", series: &g }, None, &EngineConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rsi"]["status"], "ok");
        assert_eq!(json["trend"]["status"], "error");
        assert_eq!(json["trend"]["kind"], "InsufficientData");
        assert!(json.get("pair").is_none());
        assert_eq!(json["primary"]["name"], "Gold");
    }
}
