// =============================================================================
// Macro Indicators — technical and cross-asset indicators over daily series
// =============================================================================
//
// Gold, the dollar index, FX rates and government bond yields go in as
// `PriceSeries`; moving averages, RSI, MACD, rolling correlation, Z-scores,
// spreads and ratios come out as `IndicatorSeries` or a typed
// `IndicatorError`.  Everything in `indicators`, `alignment` and `signals` is
// a pure function of its inputs.

pub mod alignment;
pub mod config;
pub mod error;
pub mod indicators;
pub mod loader;
pub mod report;
pub mod signals;
pub mod types;

pub use alignment::{align, align_pair, AlignmentPolicy};
pub use config::EngineConfig;
pub use error::IndicatorError;
pub use report::{build_report, IndicatorReport, NamedSeries};
pub use types::{IndicatorSeries, PriceSeries, Window};
