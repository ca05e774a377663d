// =============================================================================
// Spread & Ratio
// =============================================================================
//
// Point-wise combinations of two date-aligned series:
//   spread = a - b   (yield differentials, e.g. US10Y - JP10Y)
//   ratio  = a / b   (relative value, e.g. gold / silver)
//
// A ratio is undefined where the denominator is zero; those dates are left
// out of the output.

use tracing::trace;

use crate::error::{require_len, IndicatorError, Result};
use crate::types::{require_same_dates, IndicatorSeries, PriceSeries};

/// `a - b` on every shared date.
pub fn spread(a: &PriceSeries, b: &PriceSeries) -> Result<IndicatorSeries> {
    require_same_dates(a.dates(), b.dates())?;
    require_len(a.len(), 1)?;

    let values = a.values().iter().zip(b.values()).map(|(x, y)| x - y).collect();
    Ok(IndicatorSeries::from_parts(a.dates().to_vec(), values))
}

/// `a / b` on every shared date where `b` is non-zero.
pub fn ratio(a: &PriceSeries, b: &PriceSeries) -> Result<IndicatorSeries> {
    require_same_dates(a.dates(), b.dates())?;
    require_len(a.len(), 1)?;

    let mut dates = Vec::with_capacity(a.len());
    let mut values = Vec::with_capacity(a.len());
    for ((date, num), den) in a.iter().zip(b.values()) {
        if *den == 0.0 {
            trace!(%date, "ratio undefined: zero denominator");
            continue;
        }
        dates.push(date);
        values.push(num / den);
    }

    if values.is_empty() {
        return Err(IndicatorError::degenerate("denominator is zero on every date"));
    }
    Ok(IndicatorSeries::from_parts(dates, values))
}
