// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the macro
// dashboards.  Every public function returns `Result<_, IndicatorError>` so
// callers are forced to handle insufficient-data and degenerate-input cases.

pub mod correlation;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod spread;
pub mod stddev;
pub mod zscore;

pub use correlation::rolling_correlation;
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::{rsi, RsiSmoothing};
pub use sma::sma;
pub use spread::{ratio, spread};
pub use stddev::rolling_std;
pub use zscore::{rolling_zscore, zscore};
