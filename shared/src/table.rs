//! Per-row view for the certificate table and status tallies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_text::format_local_date;
use crate::error::DateError;
use crate::expiration::evaluate;
use crate::models::{CertificateEvaluation, CertificateRecord, Status, ValidityCategory};

/// Everything the table renderer prints for one certificate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowView {
    pub category: ValidityCategory,
    pub issued_on: String,
    pub due_on: String,
    pub remaining_days: i64,
    pub elapsed_days: i64,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RowView {
    pub fn build(record: &CertificateRecord, today: NaiveDate) -> Result<Self, DateError> {
        let evaluation = evaluate(record, today)?;
        Ok(Self::from_evaluation(record, &evaluation))
    }

    pub fn from_evaluation(record: &CertificateRecord, evaluation: &CertificateEvaluation) -> Self {
        Self {
            category: record.category,
            issued_on: format_local_date(record.issued_on),
            due_on: format_local_date(evaluation.due_on),
            remaining_days: evaluation.remaining_days,
            elapsed_days: evaluation.elapsed_days,
            status: evaluation.status,
            color: evaluation.status.color().map(str::to_string),
        }
    }
}

/// Count of certificates per status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceSummary {
    pub expired: u64,
    pub renew_soon: u64,
    pub ok: u64,
    pub total: u64,
}

impl ComplianceSummary {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Expired => self.expired += 1,
            Status::RenewSoon => self.renew_soon += 1,
            Status::Ok => self.ok += 1,
        }
        self.total += 1;
    }

    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Status>,
    {
        let mut summary = Self::default();
        for status in statuses {
            summary.record(status);
        }
        summary
    }

    pub fn from_evaluations<'a, I>(evaluations: I) -> Self
    where
        I: IntoIterator<Item = &'a CertificateEvaluation>,
    {
        Self::from_statuses(evaluations.into_iter().map(|e| e.status))
    }

    /// Certificates that need attention (expired or inside the renewal window)
    pub fn attention_needed(&self) -> u64 {
        self.expired + self.renew_soon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_row_view_formats_dates() {
        let record = CertificateRecord::new(ValidityCategory::Aso, ymd(2024, 3, 15));
        let row = RowView::build(&record, ymd(2025, 3, 1)).unwrap();

        assert_eq!(row.issued_on, "15/03/2024");
        assert_eq!(row.due_on, "15/03/2025");
        assert_eq!(row.remaining_days, 14);
        assert_eq!(row.status, Status::RenewSoon);
        assert_eq!(row.color.as_deref(), Some("orange"));
    }

    #[test]
    fn test_row_view_ok_has_no_color() {
        let record = CertificateRecord::new(ValidityCategory::Nr35, ymd(2025, 1, 1));
        let row = RowView::build(&record, ymd(2025, 3, 1)).unwrap();

        assert_eq!(row.status, Status::Ok);
        assert!(row.color.is_none());
    }

    #[test]
    fn test_summary_from_evaluations() {
        let today = ymd(2025, 3, 1);
        let evaluations: Vec<CertificateEvaluation> = [
            CertificateRecord::new(ValidityCategory::Epi, ymd(2023, 1, 10)),
            CertificateRecord::new(ValidityCategory::Aso, ymd(2024, 3, 15)),
            CertificateRecord::new(ValidityCategory::Nr12, ymd(2024, 3, 15)),
        ]
        .iter()
        .map(|record| evaluate(record, today).unwrap())
        .collect();

        let summary = ComplianceSummary::from_evaluations(&evaluations);
        assert_eq!(summary.expired, 1);
        assert_eq!(summary.renew_soon, 1);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_summary_counts() {
        let summary = ComplianceSummary::from_statuses([
            Status::Expired,
            Status::Ok,
            Status::RenewSoon,
            Status::Expired,
        ]);

        assert_eq!(summary.expired, 2);
        assert_eq!(summary.renew_soon, 1);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.attention_needed(), 3);
    }
}
