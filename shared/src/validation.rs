//! Validation utilities for certificate records

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::models::CertificateRecord;

/// A supplied due date must fall strictly after the issue date
pub fn validate_due_after_issue(
    issued_on: NaiveDate,
    due_on: NaiveDate,
) -> Result<(), ValidationError> {
    if due_on <= issued_on {
        return Err(ValidationError {
            field: "due_on",
            message: "Due date must be after issue date",
        });
    }
    Ok(())
}

/// Validate a record before it is sent to the record store
pub fn validate_record(record: &CertificateRecord) -> Result<(), ValidationError> {
    if let Some(due_on) = record.due_on {
        validate_due_after_issue(record.issued_on, due_on)?;
    }
    Ok(())
}
