//! The server's fixed timestamp format, e.g. `20230615T120000+0000`.

use chrono::{DateTime, FixedOffset, ParseError};

/// `yyyyMMdd'T'HHmmssZ` in chrono notation.
pub const SERVER_DATE_FORMAT: &str = "%Y%m%dT%H%M%S%z";

/// Parses a server timestamp, keeping its UTC offset.
pub fn parse_date(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_str(value, SERVER_DATE_FORMAT)
}

/// Formats a timestamp the way the server writes it.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(SERVER_DATE_FORMAT).to_string()
}
