//! Date formatting for résumé entries.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Token shown in place of a missing end date.
pub const PRESENT: &str = "PRESENT";

/// Formats a date as `"<MONTH> <year>"`, e.g. `"MARCH 2021"`.
pub fn format_month_year(date: Option<NaiveDate>) -> Option<String> {
    let date = date?;
    Some(format!("{} {}", MONTHS[date.month0() as usize], date.year()))
}

/// Formats a start/end pair as `"<start> – <end>"`.
///
/// A missing end renders as [`PRESENT`]. A missing start leaves only the right-hand side,
/// with the dangling separator trimmed. Returns `None` only when both dates are absent.
pub fn format_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    if start.is_none() && end.is_none() {
        return None;
    }
    let left = format_month_year(start).unwrap_or_default();
    let right = format_month_year(end).unwrap_or_else(|| PRESENT.to_string());
    let joined = format!("{left} – {right}");
    Some(joined.trim_matches(|c| c == ' ' || c == '–').to_string())
}
