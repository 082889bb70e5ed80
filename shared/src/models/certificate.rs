//! Certificate records and their evaluation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Status, ValidityCategory};

/// A certificate as entered in the panel form or returned by the record store.
///
/// Remaining days and status are not stored here; they are produced by
/// evaluating the record against a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateRecord {
    pub category: ValidityCategory,
    pub issued_on: NaiveDate,
    /// Explicit due date; derived from the category when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
}

impl CertificateRecord {
    pub fn new(category: ValidityCategory, issued_on: NaiveDate) -> Self {
        Self {
            category,
            issued_on,
            due_on: None,
        }
    }

    pub fn with_due_on(mut self, due_on: NaiveDate) -> Self {
        self.due_on = Some(due_on);
        self
    }
}

/// Result of evaluating a certificate against a given day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateEvaluation {
    pub due_on: NaiveDate,
    pub remaining_days: i64,
    pub elapsed_days: i64,
    pub status: Status,
}
