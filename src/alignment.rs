// =============================================================================
// Cross-series alignment
// =============================================================================
//
// Market series come from different calendars: FX and bond yields skip
// different holidays, and monthly OECD yields sit next to daily Treasury
// yields.  Before any two-series indicator runs, the inputs are put on one
// calendar with a fixed policy:
//
//   InnerJoin   — keep only dates every series observed.
//   ForwardFill — keep the union of dates; a series with no observation on
//                 a date carries its previous value forward.  Dates before
//                 every series has started are dropped.
// =============================================================================

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndicatorError, Result};
use crate::types::PriceSeries;

/// Policy for putting several series on one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignmentPolicy {
    InnerJoin,
    #[default]
    ForwardFill,
}

impl std::fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InnerJoin => write!(f, "InnerJoin"),
            Self::ForwardFill => write!(f, "ForwardFill"),
        }
    }
}

/// Align `series` under `policy`, returning them in input order with
/// identical dates.
///
/// Fails with `InsufficientData` when no date survives.
pub fn align(series: &[&PriceSeries], policy: AlignmentPolicy) -> Result<Vec<PriceSeries>> {
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let aligned = match policy {
        AlignmentPolicy::InnerJoin => inner_join(series)?,
        AlignmentPolicy::ForwardFill => forward_fill(series)?,
    };

    let kept = aligned.first().map_or(0, PriceSeries::len);
    debug!(
        %policy,
        inputs = series.len(),
        kept,
        "series aligned"
    );

    if kept == 0 {
        return Err(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    Ok(aligned)
}

/// Convenience wrapper for the common two-series case.
pub fn align_pair(
    a: &PriceSeries,
    b: &PriceSeries,
    policy: AlignmentPolicy,
) -> Result<(PriceSeries, PriceSeries)> {
    let mut aligned = align(&[a, b], policy)?.into_iter();
    match (aligned.next(), aligned.next()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(IndicatorError::MisalignedSeries),
    }
}

fn inner_join(series: &[&PriceSeries]) -> Result<Vec<PriceSeries>> {
    let shared: Vec<NaiveDate> = series[0]
        .dates()
        .iter()
        .copied()
        .filter(|d| series[1..].iter().all(|s| s.get(*d).is_some()))
        .collect();

    series
        .iter()
        .map(|s| {
            let values = shared.iter().filter_map(|d| s.get(*d)).collect();
            PriceSeries::from_parts(shared.clone(), values)
        })
        .collect()
}

fn forward_fill(series: &[&PriceSeries]) -> Result<Vec<PriceSeries>> {
    // Nothing is defined before the latest first observation.
    let firsts: Option<Vec<NaiveDate>> =
        series.iter().map(|s| s.dates().first().copied()).collect();
    let Some(start) = firsts.and_then(|f| f.into_iter().max()) else {
        return Ok(series.iter().map(|_| PriceSeries::default()).collect());
    };

    let calendar: Vec<NaiveDate> = series
        .iter()
        .flat_map(|s| s.dates().iter().copied())
        .filter(|d| *d >= start)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    series
        .iter()
        .map(|s| {
            let values = calendar.iter().map(|d| value_as_of(s, *d)).collect::<Option<Vec<_>>>();
            match values {
                Some(values) => PriceSeries::from_parts(calendar.clone(), values),
                None => Err(IndicatorError::InvalidSeries {
                    reason: format!("no observation on or before {start}"),
                }),
            }
        })
        .collect()
}

/// Last observation of `s` on or before `date`.
fn value_as_of(s: &PriceSeries, date: NaiveDate) -> Option<f64> {
    let idx = s.dates().partition_point(|d| *d <= date);
    idx.checked_sub(1).map(|i| s.values()[i])
}
