//! Display formatting for authored dates.
//!
//! The content store keeps ISO 8601 dates (`2025-10-24`) and instants
//! (`2025-10-24T14:30:00Z`). Pages show them in a fixed US English style.
//! Instants are converted to UTC before the calendar date is taken.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `"2025-10-24T14:30:00Z"` → `"October 24, 2025"`.
///
/// Unparseable input is returned unchanged.
pub fn format_long_date(iso: &str) -> String {
    match parse_date(iso) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => iso.to_string(),
    }
}

/// `"2025-10-01"` → `"October 2025"`.
///
/// Unparseable input is returned unchanged.
pub fn format_month_year(iso: &str) -> String {
    match parse_date(iso) {
        Some(date) => date.format("%B %Y").to_string(),
        None => iso.to_string(),
    }
}

fn parse_date(iso: &str) -> Option<NaiveDate> {
    let s = iso.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.naive_utc().date());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
