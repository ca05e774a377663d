// =============================================================================
// Engine Configuration — window parameters, alignment policy, thresholds
// =============================================================================
//
// Every tunable of the indicator report lives here.  The file is plain JSON;
// all fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file, and `{}` is a valid configuration.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alignment::AlignmentPolicy;
use crate::indicators::RsiSmoothing;
use crate::signals::SignalThresholds;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_ma_windows() -> Vec<usize> {
    vec![50, 200]
}

fn default_trend_window() -> usize {
    200
}

fn default_rsi_window() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_correlation_window() -> usize {
    30
}

fn default_zscore_window() -> usize {
    20
}

fn default_spread_change_periods() -> usize {
    10
}

// =============================================================================
// MacdParams
// =============================================================================

/// Fast / slow / signal windows for MACD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdParams {
    #[serde(default = "default_macd_fast")]
    pub fast: usize,

    #[serde(default = "default_macd_slow")]
    pub slow: usize,

    #[serde(default = "default_macd_signal")]
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: default_macd_fast(),
            slow: default_macd_slow(),
            signal: default_macd_signal(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the indicator report.
///
/// Window sizes are plain integers here; a zero window is not rejected at
/// load time but surfaces as an `InvalidParameter` outcome for the one
/// indicator that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Single-series indicators -------------------------------------------

    /// Windows for which both an SMA and an EMA are reported.
    #[serde(default = "default_ma_windows")]
    pub ma_windows: Vec<usize>,

    /// Long moving average the latest price is compared against.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    #[serde(default = "default_rsi_window")]
    pub rsi_window: usize,

    #[serde(default)]
    pub rsi_smoothing: RsiSmoothing,

    #[serde(default)]
    pub macd: MacdParams,

    /// Window of the rolling σ and the reference SMA behind the Z-score.
    #[serde(default = "default_zscore_window")]
    pub zscore_window: usize,

    // --- Cross-series indicators --------------------------------------------

    #[serde(default)]
    pub alignment: AlignmentPolicy,

    #[serde(default = "default_correlation_window")]
    pub correlation_window: usize,

    /// Look-back, in points, for the reported change of the spread.
    #[serde(default = "default_spread_change_periods")]
    pub spread_change_periods: usize,

    // --- Scope --------------------------------------------------------------

    /// Restrict inputs to their last N observations before computing.
    #[serde(default)]
    pub lookback: Option<usize>,

    #[serde(default)]
    pub thresholds: SignalThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ma_windows: default_ma_windows(),
            trend_window: default_trend_window(),
            rsi_window: default_rsi_window(),
            rsi_smoothing: RsiSmoothing::default(),
            macd: MacdParams::default(),
            zscore_window: default_zscore_window(),
            alignment: AlignmentPolicy::default(),
            correlation_window: default_correlation_window(),
            spread_change_periods: default_spread_change_periods(),
            lookback: None,
            thresholds: SignalThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_window = config.rsi_window,
            alignment = %config.alignment,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
