// =============================================================================
// CSV series loader
// =============================================================================
//
// Reads a `date,value` export into a `PriceSeries`.  Two shapes are common:
//
//   FRED:   DATE,DGS10            (missing observations written as ".")
//   Yahoo:  Date,Open,High,Low,Close,Volume
//
// The first column is always the date.  The value column is picked by header
// name, or defaults to the second column.  Rows with an empty, "." or "null"
// value are skipped; anything else that fails to parse is an error.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::types::PriceSeries;

/// Load a series from the CSV file at `path`.
pub fn load_csv(path: impl AsRef<Path>, column: Option<&str>) -> Result<PriceSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open series file {}", path.display()))?;
    let series = read_csv(file, column)
        .with_context(|| format!("failed to load series from {}", path.display()))?;

    info!(
        path = %path.display(),
        points = series.len(),
        first = ?series.dates().first(),
        last = ?series.dates().last(),
        "series loaded"
    );
    Ok(series)
}

/// Parse CSV content from any reader.
pub fn read_csv<R: Read>(reader: R, column: Option<&str>) -> Result<PriceSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let value_idx = match column {
        Some(name) => headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .with_context(|| format!("column {name:?} not found in header"))?,
        None => 1,
    };
    if headers.len() <= value_idx {
        bail!("CSV needs a date column and a value column");
    }

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV row {}", row + 2))?;
        let raw_date = record.get(0).unwrap_or_default();
        let raw_value = record.get(value_idx).unwrap_or_default();

        if is_missing(raw_value) {
            skipped += 1;
            continue;
        }

        let date = parse_date(raw_date).with_context(|| format!("bad date on row {}", row + 2))?;
        let value: f64 = raw_value
            .parse()
            .with_context(|| format!("bad value {raw_value:?} on row {}", row + 2))?;
        points.push((date, value));
    }

    if skipped > 0 {
        debug!(skipped, "rows without a value skipped");
    }

    PriceSeries::new(points).context("CSV rows do not form a valid series")
}

/// FRED writes missing observations as ".", Yahoo as "null".
fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw == "." || raw.eq_ignore_ascii_case("null")
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").with_context(|| format!("unparseable date {raw:?}"))
}
