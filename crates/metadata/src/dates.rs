//! Calendar dates as written in `last_synced:` fields.

use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Current UTC calendar date. Computed once per run by the caller.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` date, rejecting impossible calendar days.
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}
