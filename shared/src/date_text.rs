//! Local date text codec (DD/MM/YYYY)
//!
//! Form fields are read while the user is still typing, so parsing separates
//! three outcomes: a complete date, input that is valid so far but not yet
//! complete, and input that can never become a date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateError;

/// Outcome of reading a date field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "date", rename_all = "snake_case")]
pub enum DateInput {
    Complete(NaiveDate),
    /// Valid so far; computation should wait for the rest of the date
    Incomplete,
}

impl DateInput {
    pub fn complete(self) -> Option<NaiveDate> {
        match self {
            DateInput::Complete(date) => Some(date),
            DateInput::Incomplete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DateInput::Complete(_))
    }
}

/// Parse `DD/MM/YYYY` or `DD/MM/YY` (two-digit years are read as 20YY)
pub fn parse_local_date(text: &str) -> Result<DateInput, DateError> {
    let trimmed = text.trim();
    let malformed = || DateError::Malformed(trimmed.to_string());
    let parts: Vec<&str> = trimmed.split('/').collect();

    if parts.len() > 3 {
        return Err(malformed());
    }
    if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
        return Err(malformed());
    }
    // Day and month never have more than two digits
    if parts.iter().take(2).any(|p| p.len() > 2) {
        return Err(malformed());
    }
    if parts.len() < 3 {
        return Ok(DateInput::Incomplete);
    }

    let (day, month, year) = (parts[0], parts[1], parts[2]);
    if day.is_empty() || month.is_empty() {
        return Err(malformed());
    }

    let year: i32 = match year.len() {
        // Year still being typed
        0 | 1 | 3 => return Ok(DateInput::Incomplete),
        2 => 2000 + year.parse::<i32>().map_err(|_| malformed())?,
        4 => year.parse().map_err(|_| malformed())?,
        _ => return Err(malformed()),
    };
    let day: u32 = day.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(DateInput::Complete)
        .ok_or_else(|| DateError::Invalid(trimmed.to_string()))
}

/// Years the four-digit `DD/MM/YYYY` form can carry
pub const LOCAL_YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Format as `DD/MM/YYYY` with zero padding
pub fn format_local_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Parse either an ISO `YYYY-MM-DD` date (as stored by the record API) or
/// the local `DD/MM/YYYY` form
pub fn parse_iso_or_local(text: &str) -> Result<DateInput, DateError> {
    let trimmed = text.trim();
    if !trimmed.contains('-') {
        return parse_local_date(trimmed);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(DateInput::Complete)
        .map_err(|e| match e.kind() {
            chrono::format::ParseErrorKind::OutOfRange
            | chrono::format::ParseErrorKind::Impossible => {
                DateError::Invalid(trimmed.to_string())
            }
            _ => DateError::Malformed(trimmed.to_string()),
        })
}
