//! Expiration service: evaluates certificate records for the panel

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    evaluate, format_local_date, parse_iso_or_local, validate_record, CertificateRecord,
    ComplianceSummary, DateInput, PaginatedResponse, Pagination, PaginationMeta, RowView,
    ValidityCategory,
};

use crate::config::ClockConfig;
use crate::error::{AppError, AppResult};

/// Expiration service for evaluating certificates against the current day
#[derive(Clone)]
pub struct ExpirationService {
    clock: ClockConfig,
}

/// A certificate as sent by the form or the record store
#[derive(Debug, Clone, Deserialize)]
pub struct RecordInput {
    pub category: String,
    pub issued_on: String,
    #[serde(default)]
    pub due_on: Option<String>,
}

/// Input for evaluating one certificate
#[derive(Debug, Deserialize)]
pub struct EvaluateInput {
    #[serde(flatten)]
    pub record: RecordInput,
    /// Overrides the server's current day
    #[serde(default)]
    pub today: Option<String>,
}

/// Input for evaluating a set of certificates
#[derive(Debug, Deserialize)]
pub struct BatchInput {
    pub records: Vec<RecordInput>,
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Evaluation of one certificate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub today: String,
    pub row: RowView,
}

/// One page of evaluated rows plus the tally over every record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub today: String,
    pub rows: PaginatedResponse<RowView>,
    pub summary: ComplianceSummary,
    /// Expired plus renew-soon certificates across every record
    pub attention_needed: u64,
}

/// Result of reading a date field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedDate {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

fn required_date(field: &str, text: &str) -> AppResult<NaiveDate> {
    match parse_iso_or_local(text).map_err(|e| AppError::for_date_field(field, e))? {
        DateInput::Complete(date) => Ok(date),
        DateInput::Incomplete => Err(AppError::IncompleteDate {
            field: field.to_string(),
        }),
    }
}

impl ExpirationService {
    /// Create a new ExpirationService instance
    pub fn new(clock: ClockConfig) -> Self {
        Self { clock }
    }

    /// Day to evaluate against: the requested one, or today in the configured offset
    pub fn today(&self, requested: Option<&str>) -> AppResult<NaiveDate> {
        match requested.filter(|text| !text.trim().is_empty()) {
            Some(text) => required_date("today", text),
            None => Ok(self.clock.today()?),
        }
    }

    /// Turn request input into a validated record
    pub fn record_from(&self, input: &RecordInput) -> AppResult<CertificateRecord> {
        let category: ValidityCategory = input.category.parse()?;
        let mut record = CertificateRecord::new(category, required_date("issued_on", &input.issued_on)?);

        if let Some(due_on) = input.due_on.as_deref().filter(|t| !t.trim().is_empty()) {
            record = record.with_due_on(required_date("due_on", due_on)?);
        }

        validate_record(&record)?;
        Ok(record)
    }

    /// Evaluate one certificate
    pub fn evaluate(&self, input: &EvaluateInput) -> AppResult<EvaluateResponse> {
        let today = self.today(input.today.as_deref())?;
        let record = self.record_from(&input.record)?;
        let row = RowView::build(&record, today)?;

        tracing::debug!(
            category = %record.category,
            remaining_days = row.remaining_days,
            status = row.status.as_str(),
            "Evaluated certificate"
        );

        Ok(EvaluateResponse {
            today: format_local_date(today),
            row,
        })
    }

    /// Evaluate every record, returning the requested page and a summary of all of them
    pub fn evaluate_batch(&self, input: &BatchInput) -> AppResult<BatchResponse> {
        let today = self.today(input.today.as_deref())?;

        let mut summary = ComplianceSummary::default();
        let mut rows = Vec::with_capacity(input.records.len());
        for record_input in &input.records {
            let record = self.record_from(record_input)?;
            let evaluation = evaluate(&record, today)?;
            summary.record(evaluation.status);
            rows.push(RowView::from_evaluation(&record, &evaluation));
        }

        let meta = PaginationMeta::new(
            input.pagination.unwrap_or_default(),
            rows.len() as u64,
        );
        let start = (meta.page as usize - 1) * meta.per_page as usize;
        let data: Vec<RowView> = rows
            .into_iter()
            .skip(start)
            .take(meta.per_page as usize)
            .collect();

        tracing::info!(
            total = summary.total,
            expired = summary.expired,
            renew_soon = summary.renew_soon,
            attention_needed = summary.attention_needed(),
            "Evaluated certificate batch"
        );

        Ok(BatchResponse {
            today: format_local_date(today),
            rows: PaginatedResponse {
                data,
                pagination: meta,
            },
            summary,
            attention_needed: summary.attention_needed(),
        })
    }

    /// Read a date field, reporting incomplete input without failing
    pub fn parse_date(&self, text: &str) -> AppResult<ParsedDate> {
        let input = parse_iso_or_local(text).map_err(|e| AppError::for_date_field("text", e))?;
        let date = input.complete();
        let parsed = ParsedDate {
            state: if input.is_complete() { "complete" } else { "incomplete" }.to_string(),
            date,
            formatted: date.map(format_local_date),
        };
        Ok(parsed)
    }
}
