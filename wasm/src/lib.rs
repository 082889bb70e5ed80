//! WebAssembly module for the Compliance Tracker panel
//!
//! Provides client-side computation for:
//! - Due dates from issue dates per certificate category
//! - Remaining and elapsed day counts
//! - Status and highlight colour for table rows
//! - Date field normalisation
//! - Admin panel state transitions (page, selection, form, category tab)
//!
//! Functions take the field text as typed. Input that is valid but not yet a
//! full date yields `undefined` so the form can wait for the rest.

use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::date_text::*;
pub use shared::models::*;
pub use shared::panel::*;
pub use shared::table::*;

use shared::expiration::{
    compute_due_date, compute_elapsed_days, compute_remaining_days, derive_status,
};
use shared::{validate_record, DateError, Language};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("compliance tracker engine loaded"));
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn read_date(text: &str) -> Result<Option<NaiveDate>, DateError> {
    parse_local_date(text).map(DateInput::complete)
}

fn to_js_days(days: i64) -> Result<i32, JsValue> {
    i32::try_from(days).map_err(to_js_error)
}

fn due_date_for(issued_text: &str, category: &str) -> Result<Option<String>, String> {
    let category: ValidityCategory = category.parse().map_err(|e| format!("{}", e))?;
    let Some(issued_on) = read_date(issued_text).map_err(|e| e.to_string())? else {
        return Ok(None);
    };
    let due_on = compute_due_date(issued_on, category).map_err(|e| e.to_string())?;
    Ok(Some(format_local_date(due_on)))
}

/// Due date (`DD/MM/YYYY`) for a certificate issued on `issued_text`
#[wasm_bindgen]
pub fn compute_due_date_text(issued_text: &str, category: &str) -> Result<Option<String>, JsValue> {
    due_date_for(issued_text, category).map_err(to_js_error)
}

/// Signed days from `today_text` until `due_text`
#[wasm_bindgen]
pub fn remaining_days_text(due_text: &str, today_text: &str) -> Result<Option<i32>, JsValue> {
    let due_on = read_date(due_text).map_err(to_js_error)?;
    let today = read_date(today_text).map_err(to_js_error)?;
    match (due_on, today) {
        (Some(due_on), Some(today)) => to_js_days(compute_remaining_days(due_on, today)).map(Some),
        _ => Ok(None),
    }
}

/// Days since issuance, never negative
#[wasm_bindgen]
pub fn elapsed_days_text(issued_text: &str, today_text: &str) -> Result<Option<i32>, JsValue> {
    let issued_on = read_date(issued_text).map_err(to_js_error)?;
    let today = read_date(today_text).map_err(to_js_error)?;
    match (issued_on, today) {
        (Some(issued_on), Some(today)) => {
            to_js_days(compute_elapsed_days(issued_on, today)).map(Some)
        }
        _ => Ok(None),
    }
}

/// Status code (`expired`, `renew_soon`, `ok`) for a remaining-day count
#[wasm_bindgen]
pub fn status_for_days(remaining_days: i32) -> String {
    derive_status(i64::from(remaining_days)).as_str().to_string()
}

/// Table highlight colour for a remaining-day count, empty for the default style
#[wasm_bindgen]
pub fn status_color(remaining_days: i32) -> String {
    derive_status(i64::from(remaining_days))
        .color()
        .unwrap_or_default()
        .to_string()
}

/// Human-readable status label; `language` is `pt` or `en`
#[wasm_bindgen]
pub fn status_label(remaining_days: i32, language: &str) -> String {
    let language = [Language::Portuguese, Language::English]
        .into_iter()
        .find(|l| l.code() == language)
        .unwrap_or_default();
    derive_status(i64::from(remaining_days))
        .label(&language)
        .to_string()
}

/// Reformat a date field as `DD/MM/YYYY`
#[wasm_bindgen]
pub fn normalize_date_text(text: &str) -> Result<Option<String>, JsValue> {
    let date = read_date(text).map_err(to_js_error)?;
    Ok(date.map(format_local_date))
}

fn form_row(
    category: &str,
    issued_text: &str,
    due_text: &str,
    today_text: &str,
) -> Result<Option<RowView>, String> {
    let category: ValidityCategory = category.parse().map_err(|e| format!("{}", e))?;
    let issued_on = read_date(issued_text).map_err(|e| e.to_string())?;
    let today = read_date(today_text).map_err(|e| e.to_string())?;
    let (Some(issued_on), Some(today)) = (issued_on, today) else {
        return Ok(None);
    };

    let mut record = CertificateRecord::new(category, issued_on);
    if !due_text.trim().is_empty() {
        match read_date(due_text).map_err(|e| e.to_string())? {
            Some(due_on) => record = record.with_due_on(due_on),
            None => return Ok(None),
        }
    }
    validate_record(&record).map_err(|e| e.to_string())?;

    RowView::build(&record, today)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Evaluate the create/edit form fields.
///
/// An empty `due_text` means the due date is derived from the category.
/// Returns the row as JSON, or `undefined` while a date is incomplete.
#[wasm_bindgen]
pub fn evaluate_form(
    category: &str,
    issued_text: &str,
    due_text: &str,
    today_text: &str,
) -> Result<Option<String>, JsValue> {
    let row = form_row(category, issued_text, due_text, today_text).map_err(to_js_error)?;
    row.map(|row| serde_json::to_string(&row).map_err(to_js_error))
        .transpose()
}

#[derive(Deserialize)]
struct StoredRecord {
    category: ValidityCategory,
    issued_on: String,
    #[serde(default)]
    due_on: Option<String>,
}

fn stored_date(text: &str) -> Result<NaiveDate, String> {
    match parse_iso_or_local(text).map_err(|e| e.to_string())? {
        DateInput::Complete(date) => Ok(date),
        DateInput::Incomplete => Err(format!("Incomplete date: {:?}", text)),
    }
}

fn rows_for(records_json: &str, today_text: &str) -> Result<Vec<RowView>, String> {
    let records: Vec<StoredRecord> =
        serde_json::from_str(records_json).map_err(|e| format!("Invalid records JSON: {}", e))?;
    let today = stored_date(today_text)?;

    records
        .iter()
        .map(|stored| {
            let mut record = CertificateRecord::new(stored.category, stored_date(&stored.issued_on)?);
            if let Some(due_on) = stored.due_on.as_deref().filter(|t| !t.trim().is_empty()) {
                record = record.with_due_on(stored_date(due_on)?);
            }
            RowView::build(&record, today).map_err(|e| e.to_string())
        })
        .collect()
}

/// Build table rows for a page of records fetched from the API.
///
/// `records_json` is an array of `{category, issued_on, due_on?}` with ISO or
/// `DD/MM/YYYY` dates.
#[wasm_bindgen]
pub fn evaluate_rows_json(records_json: &str, today_text: &str) -> Result<String, JsValue> {
    let rows = rows_for(records_json, today_text).map_err(to_js_error)?;
    serde_json::to_string(&rows).map_err(to_js_error)
}

/// Category table as JSON: code, names and validity period
#[wasm_bindgen]
pub fn validity_categories_json() -> String {
    let categories: Vec<serde_json::Value> = ValidityCategory::ALL
        .iter()
        .map(|category| {
            serde_json::json!({
                "code": category.as_str(),
                "name": category.display_name(),
                "name_pt": category.display_name_pt(),
                "validity": category.validity_period(),
            })
        })
        .collect();
    serde_json::Value::Array(categories).to_string()
}

// ============================================================================
// Panel state
// ============================================================================
//
// The controller keeps the panel state as a JSON string and passes it back
// into every transition.

fn read_panel(state_json: &str) -> Result<PanelState, String> {
    serde_json::from_str(state_json).map_err(|e| format!("Invalid panel state JSON: {}", e))
}

fn write_panel(state: &PanelState) -> Result<String, String> {
    serde_json::to_string(state).map_err(|e| e.to_string())
}

fn apply_panel(
    state_json: &str,
    transition: impl FnOnce(PanelState) -> PanelState,
) -> Result<String, String> {
    write_panel(&transition(read_panel(state_json)?))
}

fn select_ids(state_json: &str, ids_json: &str) -> Result<String, String> {
    let ids: Vec<RecordId> =
        serde_json::from_str(ids_json).map_err(|e| format!("Invalid id list JSON: {}", e))?;
    apply_panel(state_json, |state| state.select_all(ids))
}

fn switch_tab_to(state_json: &str, category: &str) -> Result<String, String> {
    let tab: ValidityCategory = category.parse().map_err(|e| format!("{}", e))?;
    apply_panel(state_json, |state| state.switch_tab(tab))
}

/// Fresh panel state: first tab, page 1, nothing selected, form closed
#[wasm_bindgen]
pub fn panel_state_json(per_page: u32) -> Result<String, JsValue> {
    write_panel(&PanelState::new(per_page)).map_err(to_js_error)
}

/// Apply the item count reported by the records API
#[wasm_bindgen]
pub fn panel_with_total_items(state_json: &str, total_items: f64) -> Result<String, JsValue> {
    let total_items = total_items.max(0.0) as u64;
    apply_panel(state_json, |state| state.with_total_items(total_items)).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_go_to_page(state_json: &str, page: u32) -> Result<String, JsValue> {
    apply_panel(state_json, |state| state.go_to_page(page)).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_next_page(state_json: &str) -> Result<String, JsValue> {
    apply_panel(state_json, PanelState::next_page).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_previous_page(state_json: &str) -> Result<String, JsValue> {
    apply_panel(state_json, PanelState::previous_page).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_toggle_selection(state_json: &str, id: u32) -> Result<String, JsValue> {
    apply_panel(state_json, |state| state.toggle_selection(RecordId::from(id))).map_err(to_js_error)
}

/// Add every id in `ids_json` (a JSON array) to the selection
#[wasm_bindgen]
pub fn panel_select_all(state_json: &str, ids_json: &str) -> Result<String, JsValue> {
    select_ids(state_json, ids_json).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_clear_selection(state_json: &str) -> Result<String, JsValue> {
    apply_panel(state_json, PanelState::clear_selection).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_is_selected(state_json: &str, id: u32) -> Result<bool, JsValue> {
    let state = read_panel(state_json).map_err(to_js_error)?;
    Ok(state.is_selected(RecordId::from(id)))
}

#[wasm_bindgen]
pub fn panel_begin_create(state_json: &str) -> Result<String, JsValue> {
    apply_panel(state_json, PanelState::begin_create).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_begin_edit(state_json: &str, id: u32) -> Result<String, JsValue> {
    apply_panel(state_json, |state| state.begin_edit(RecordId::from(id))).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn panel_finish_edit(state_json: &str) -> Result<String, JsValue> {
    apply_panel(state_json, PanelState::finish_edit).map_err(to_js_error)
}

/// Id of the record loaded in the form, or `undefined`
#[wasm_bindgen]
pub fn panel_editing_id(state_json: &str) -> Result<Option<f64>, JsValue> {
    let state = read_panel(state_json).map_err(to_js_error)?;
    Ok(state.editing_id().map(|id| id as f64))
}

/// Switch to the tab for `category`; page, selection and form start over
#[wasm_bindgen]
pub fn panel_switch_tab(state_json: &str, category: &str) -> Result<String, JsValue> {
    switch_tab_to(state_json, category).map_err(to_js_error)
}

/// Page request (`{page, per_page}`) for the records API
#[wasm_bindgen]
pub fn panel_query_json(state_json: &str) -> Result<String, JsValue> {
    let state = read_panel(state_json).map_err(to_js_error)?;
    serde_json::to_string(&state.query()).map_err(to_js_error)
}

/// Today's date in the browser's local time zone, as `DD/MM/YYYY`
#[wasm_bindgen]
pub fn browser_today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:02}/{:02}/{:04}",
        now.get_date(),
        now.get_month() + 1,
        now.get_full_year()
    )
}
