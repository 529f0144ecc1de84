//! Short English date labels for Open-Meteo timestamps

use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// `2024-03-05` or `2024-03-05T10:00` -> `Mar 5, 2024`.
///
/// The date is shown as written; no timezone conversion happens. Input that
/// is not an ISO date comes back unchanged.
pub fn format_day(iso: &str) -> String {
    match parse_date(iso) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => {
            tracing::debug!(input = iso, "unparseable date");
            iso.to_string()
        }
    }
}

fn parse_date(iso: &str) -> Option<NaiveDate> {
    let iso = iso.trim();
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return Some(date);
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
        .map(|dt| dt.date())
}
