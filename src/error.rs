// =============================================================================
// Indicator errors
// =============================================================================
//
// Every engine function returns `Result<_, IndicatorError>`.  A failure is
// local to the one computation that produced it; callers decide whether to
// surface it or wait for more data.

use thiserror::Error;

/// Typed failure of a single indicator computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("series do not share the same dates")]
    MisalignedSeries,

    #[error("invalid series: {reason}")]
    InvalidSeries { reason: String },
}

impl IndicatorError {
    /// Short machine-readable name of the variant, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "InsufficientData",
            Self::DegenerateInput { .. } => "DegenerateInput",
            Self::InvalidParameter { .. } => "InvalidParameter",
            Self::MisalignedSeries => "MisalignedSeries",
            Self::InvalidSeries { .. } => "InvalidSeries",
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}

/// Guard shared by every rolling computation.
pub(crate) fn require_len(available: usize, required: usize) -> Result<()> {
    if available < required {
        Err(IndicatorError::InsufficientData {
            required,
            available,
        })
    } else {
        Ok(())
    }
}

/// `require_len` for a requirement of `base + extra` points.  A sum that does
/// not fit in `usize` can never be met.
pub(crate) fn require_len_plus(available: usize, base: usize, extra: usize) -> Result<()> {
    require_len(available, base.checked_add(extra).unwrap_or(usize::MAX))
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
