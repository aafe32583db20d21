//! Lightweight CSV splitting for bulk uploads.
//!
//! Uploads are simple comma-separated exports: values are split on `,` without quote-aware
//! parsing, then trimmed and stripped of one pair of surrounding quotes. Header names are
//! canonicalized to `snake_case` keys so `"Price Range Min"` and `price_range_min` match.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::TrendStatus;

use crate::server::error::ingest::IngestError;

/// A parsed upload: canonical header keys and one map per data row.
#[derive(Debug)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RowMap>,
}

/// One data row keyed by canonical header name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RowMap(HashMap<String, String>);

impl RowMap {
    /// Value under `key`, `None` when the column is absent or the cell is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// First non-empty value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }
}

/// Trim a cell and strip one pair of matching surrounding quotes.
pub fn clean_value(raw: &str) -> &str {
    let value = raw.trim();

    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].trim();
        }
    }

    value
}

/// Canonical key for a header cell: cleaned, lower-cased, whitespace runs joined with `_`.
pub fn canonical_header(raw: &str) -> String {
    clean_value(raw)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Split raw upload text into a header row and data rows.
///
/// Blank lines are dropped before counting, so a file needs a header and at least one
/// non-blank data line. Missing trailing cells map to `""`, extra trailing cells are ignored.
pub fn parse_csv(raw: &str) -> Result<CsvTable, IngestError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Err(IngestError::EmptyFile);
    };
    let headers: Vec<String> = header_line.split(',').map(canonical_header).collect();

    let rows: Vec<RowMap> = lines
        .map(|line| {
            let mut cells = line.split(',').map(clean_value);

            RowMap(
                headers
                    .iter()
                    .map(|key| (key.clone(), cells.next().unwrap_or("").to_string()))
                    .collect(),
            )
        })
        .collect();

    if rows.is_empty() {
        return Err(IngestError::EmptyFile);
    }

    Ok(CsvTable { headers, rows })
}

/// Trend status from a cell, `stable` for anything unrecognised.
pub fn parse_trend_status(raw: Option<&str>) -> TrendStatus {
    match raw.map(|value| value.trim().to_lowercase()).as_deref() {
        Some("growing") => TrendStatus::Growing,
        Some("declining") => TrendStatus::Declining,
        _ => TrendStatus::Stable,
    }
}

/// Observation timestamp from a `YYYY-MM-DD` date or an RFC 3339 timestamp, as naive UTC.
pub fn parse_recorded_at(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.naive_utc())
}
