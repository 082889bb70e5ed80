//! Certificate expiration engine
//!
//! Turns an issue date into a due date, a due date into a remaining-day count
//! and a day count into a [`Status`]. Every function takes "today" as an
//! argument; nothing here reads a clock.
//!
//! Month arithmetic clamps to the last day of the target month, so
//! 31/10/2023 + 4 months is 29/02/2024 and 29/02/2024 + 1 year is 28/02/2025.
//! A due date must stay inside [`LOCAL_YEAR_RANGE`] so it can be written back
//! into a date field.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::date_text::LOCAL_YEAR_RANGE;
use crate::error::DateError;
use crate::models::{
    CertificateEvaluation, CertificateRecord, Status, ValidityCategory, RENEWAL_WINDOW_DAYS,
};

/// Due date of a certificate issued on `issued_on`
pub fn compute_due_date(
    issued_on: NaiveDate,
    category: ValidityCategory,
) -> Result<NaiveDate, DateError> {
    let months = category.validity_period().in_months();
    issued_on
        .checked_add_months(Months::new(months))
        .filter(|due_on| LOCAL_YEAR_RANGE.contains(&due_on.year()))
        .ok_or(DateError::OutOfRange)
}

/// Signed whole days from `today` until `due_on`; negative once the date has passed
pub fn compute_remaining_days(due_on: NaiveDate, today: NaiveDate) -> i64 {
    (due_on - today).num_days()
}

/// Whole days since issuance; a future issue date counts as zero
pub fn compute_elapsed_days(issued_on: NaiveDate, today: NaiveDate) -> i64 {
    (today - issued_on).num_days().max(0)
}

pub fn derive_status(remaining_days: i64) -> Status {
    if remaining_days < 0 {
        Status::Expired
    } else if remaining_days <= RENEWAL_WINDOW_DAYS {
        Status::RenewSoon
    } else {
        Status::Ok
    }
}

/// Calendar day of an injected timestamp, dropping the time of day
pub fn today_from(now: NaiveDateTime) -> NaiveDate {
    now.date()
}

/// Due date of a record: the explicit one when present, otherwise derived
pub fn resolve_due_date(record: &CertificateRecord) -> Result<NaiveDate, DateError> {
    match record.due_on {
        Some(due_on) => Ok(due_on),
        None => compute_due_date(record.issued_on, record.category),
    }
}

/// Evaluate a record against `today`.
///
/// Status is always derived from the remaining days computed here, so the two
/// can never disagree.
pub fn evaluate(
    record: &CertificateRecord,
    today: NaiveDate,
) -> Result<CertificateEvaluation, DateError> {
    let due_on = resolve_due_date(record)?;
    let remaining_days = compute_remaining_days(due_on, today);

    Ok(CertificateEvaluation {
        due_on,
        remaining_days,
        elapsed_days: compute_elapsed_days(record.issued_on, today),
        status: derive_status(remaining_days),
    })
}
