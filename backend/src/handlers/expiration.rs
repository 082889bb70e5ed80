//! HTTP handlers for certificate expiration endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{ValidityCategory, ValidityPeriod};

use crate::error::AppResult;
use crate::services::expiration::{
    BatchInput, BatchResponse, EvaluateInput, EvaluateResponse, ExpirationService, ParsedDate,
};
use crate::AppState;

/// Category table entry
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub code: String,
    pub name: String,
    pub name_pt: String,
    pub validity: ValidityPeriod,
}

/// List certificate categories and their validity periods
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    let categories = ValidityCategory::ALL
        .iter()
        .map(|category| CategoryInfo {
            code: category.as_str().to_string(),
            name: category.display_name().to_string(),
            name_pt: category.display_name_pt().to_string(),
            validity: category.validity_period(),
        })
        .collect();
    Json(categories)
}

/// Body for the date parsing endpoint
#[derive(Debug, Deserialize)]
pub struct ParseDateInput {
    pub text: String,
}

/// Read a date field as typed in the form
pub async fn parse_date(
    State(state): State<AppState>,
    Json(input): Json<ParseDateInput>,
) -> AppResult<Json<ParsedDate>> {
    let service = ExpirationService::new(state.config.clock.clone());
    let parsed = service.parse_date(&input.text)?;
    Ok(Json(parsed))
}

/// Evaluate one certificate
pub async fn evaluate_certificate(
    State(state): State<AppState>,
    Json(input): Json<EvaluateInput>,
) -> AppResult<Json<EvaluateResponse>> {
    let service = ExpirationService::new(state.config.clock.clone());
    let response = service.evaluate(&input)?;
    Ok(Json(response))
}

/// Evaluate a set of certificates for the records table
pub async fn evaluate_batch(
    State(state): State<AppState>,
    Json(input): Json<BatchInput>,
) -> AppResult<Json<BatchResponse>> {
    let service = ExpirationService::new(state.config.clock.clone());
    let response = service.evaluate_batch(&input)?;
    Ok(Json(response))
}
