//! Utility functions for date windows and log formatting.
//!
//! This module provides helper functions used throughout the job:
//! - Trailing date window computation for the per-day search loop
//! - Date formatting in the `YYYY-MM-DD` form the search API expects
//! - String truncation for logging upstream payloads

use chrono::{Days, NaiveDate};

/// Number of calendar days searched per run, today included.
pub const WINDOW_DAYS: u64 = 5;

/// Compute the trailing window of dates ending on `today`.
///
/// Dates are returned in descending recency order: `today`, `today - 1`, ...
/// down to `today - (days - 1)`.
///
/// # Examples
///
/// ```ignore
/// let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let window = trailing_window(today, 3);
/// // [2026-03-02, 2026-03-01, 2026-02-28]
/// ```
pub fn trailing_window(today: NaiveDate, days: u64) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes, backing off to the
/// nearest character boundary, with an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
