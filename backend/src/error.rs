//! Error handling for the Compliance Tracker service
//!
//! Provides consistent error responses in Portuguese and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{DateError, UnknownCategory, ValidationError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_pt: String,
    },

    #[error("Malformed date in {field}: {text:?}")]
    MalformedDate { field: String, text: String },

    #[error("Invalid calendar date in {field}: {text:?}")]
    InvalidDate { field: String, text: String },

    #[error("Incomplete date in {field}")]
    IncompleteDate { field: String },

    #[error("Date out of supported range")]
    DateOutOfRange,

    #[error("Unknown certificate category: {0}")]
    UnknownCategory(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl AppError {
    /// Attach the offending request field to a date error
    pub fn for_date_field(field: &str, err: DateError) -> Self {
        match err {
            DateError::Malformed(text) => AppError::MalformedDate {
                field: field.to_string(),
                text,
            },
            DateError::Invalid(text) => AppError::InvalidDate {
                field: field.to_string(),
                text,
            },
            DateError::OutOfRange => AppError::DateOutOfRange,
        }
    }
}

impl From<DateError> for AppError {
    fn from(err: DateError) -> Self {
        AppError::for_date_field("date", err)
    }
}

impl From<UnknownCategory> for AppError {
    fn from(err: UnknownCategory) -> Self {
        AppError::UnknownCategory(err.0)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let message_pt = match err.field {
            "due_on" => "A data de vencimento deve ser posterior à data de emissão".to_string(),
            field => format!("Campo inválido: {}", field),
        };
        AppError::Validation {
            field: err.field.to_string(),
            message: err.message.to_string(),
            message_pt,
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_pt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_pt,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_pt: message_pt.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::MalformedDate { field, text } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MALFORMED_DATE".to_string(),
                    message_en: format!("{:?} is not a DD/MM/YYYY date", text),
                    message_pt: format!("{:?} não está no formato DD/MM/AAAA", text),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidDate { field, text } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_DATE".to_string(),
                    message_en: format!("{:?} is not a calendar date", text),
                    message_pt: format!("{:?} não é uma data válida", text),
                    field: Some(field.clone()),
                },
            ),
            AppError::IncompleteDate { field } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INCOMPLETE_DATE".to_string(),
                    message_en: "Date is incomplete".to_string(),
                    message_pt: "Data incompleta".to_string(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DateOutOfRange => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "DATE_OUT_OF_RANGE".to_string(),
                    message_en: "Date is outside the supported range".to_string(),
                    message_pt: "Data fora do intervalo suportado".to_string(),
                    field: None,
                },
            ),
            AppError::UnknownCategory(code) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNKNOWN_CATEGORY".to_string(),
                    message_en: format!("Unknown certificate category: {}", code),
                    message_pt: format!("Categoria de certificado desconhecida: {}", code),
                    field: Some("category".to_string()),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_pt: format!("Erro de configuração: {}", msg),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_errors_keep_field() {
        let err = AppError::for_date_field("issued_on", DateError::Invalid("31/02/2024".into()));
        assert!(matches!(err, AppError::InvalidDate { ref field, .. } if field == "issued_on"));
    }

    #[test]
    fn test_status_codes() {
        let malformed = AppError::for_date_field("today", DateError::Malformed("x".into()));
        assert_eq!(malformed.into_response().status(), StatusCode::BAD_REQUEST);

        let invalid = AppError::from(DateError::Invalid("31/02/2024".into()));
        assert_eq!(invalid.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let unknown = AppError::from(UnknownCategory("nr99".into()));
        assert_eq!(unknown.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
