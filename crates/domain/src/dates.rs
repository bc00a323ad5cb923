// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date parsing and rendering.
//!
//! All dates in the system travel as ISO 8601 `YYYY-MM-DD` strings, the
//! same shape an HTML date input produces. Lexicographic order on the
//! rendered form equals calendar order, which the persistence layer relies
//! on for range queries.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The wire format for calendar dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a calendar date from a `YYYY-MM-DD` string.
///
/// Malformed input is reported as a validation error, never a panic.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// calendar date.
pub fn parse_event_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_owned(),
        error: e.to_string(),
    })
}

/// Renders a calendar date as a `YYYY-MM-DD` string.
#[must_use]
pub fn format_event_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
