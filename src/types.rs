// =============================================================================
// Series types shared across the indicator engine
// =============================================================================
//
// `PriceSeries` is the validated input (one observation per trading day,
// strictly increasing dates).  `IndicatorSeries` is every derived output: it
// covers a subset of the source dates, with warm-up and undefined points left
// out rather than zero-filled.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{IndicatorError, Result};

// =============================================================================
// Window
// =============================================================================

/// Look-back length of a rolling computation, in periods.  Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Window(NonZeroUsize);

impl Window {
    pub fn new(periods: usize) -> Result<Self> {
        NonZeroUsize::new(periods)
            .map(Self)
            .ok_or_else(|| IndicatorError::InvalidParameter {
                reason: "window must be at least one period".to_string(),
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for Window {
    type Error = IndicatorError;

    fn try_from(periods: usize) -> Result<Self> {
        Self::new(periods)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PriceSeries
// =============================================================================

/// Immutable daily price (or yield, or index level) series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from `(date, value)` observations.
    ///
    /// Dates must be strictly increasing and every value finite.
    pub fn new(points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        let (dates, values) = points.into_iter().unzip();
        Self::from_parts(dates, values)
    }

    /// Build a series from parallel date and value vectors.
    pub fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(IndicatorError::InvalidSeries {
                reason: format!("{} dates but {} values", dates.len(), values.len()),
            });
        }
        if let Some(w) = dates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(IndicatorError::InvalidSeries {
                reason: format!("date {} does not follow {}", w[1], w[0]),
            });
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(IndicatorError::InvalidSeries {
                reason: format!("non-finite value on {}", dates[i]),
            });
        }
        Ok(Self { dates, values })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    /// The last `count` observations (the whole series when shorter).
    pub fn tail(&self, count: usize) -> Self {
        let start = self.len().saturating_sub(count);
        Self {
            dates: self.dates[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Observations on or after `date`.
    pub fn since(&self, date: NaiveDate) -> Self {
        let start = self.dates.partition_point(|d| *d < date);
        Self {
            dates: self.dates[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }
}

// =============================================================================
// IndicatorSeries
// =============================================================================

/// Derived series aligned to a subset of its source's dates.
///
/// A date that is absent means the indicator is undefined there: either
/// still warming up, or mathematically degenerate (zero variance, zero
/// denominator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl IndicatorSeries {
    /// Callers guarantee parallel vectors with increasing dates; every
    /// constructor in the engine derives `dates` from a validated source.
    pub(crate) fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Pair `values` with the trailing dates of `source`; used by rolling
    /// computations whose output starts after a warm-up span.
    pub(crate) fn trailing(source: &[NaiveDate], values: Vec<f64>) -> Self {
        let start = source.len() - values.len();
        Self::from_parts(source[start..].to_vec(), values)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    /// Latest value minus the value `periods` points earlier.
    pub fn change_over(&self, periods: usize) -> Result<f64> {
        crate::error::require_len_plus(self.len(), periods, 1)?;
        let last = self.values[self.len() - 1];
        let earlier = self.values[self.len() - 1 - periods];
        Ok(last - earlier)
    }

    /// Keep only the last `count` points.
    pub fn tail(&self, count: usize) -> Self {
        let start = self.len().saturating_sub(count);
        Self::from_parts(self.dates[start..].to_vec(), self.values[start..].to_vec())
    }
}

/// Reject two-series inputs that do not share an identical calendar.
pub(crate) fn require_same_dates(a: &[NaiveDate], b: &[NaiveDate]) -> Result<()> {
    if a == b {
        Ok(())
    } else {
        Err(IndicatorError::MisalignedSeries)
    }
}
