//! HTTP handlers for onboarding wizard sessions

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{
    first_incomplete_step, parse_optional_date, BatchField, InventoryField, PricingField,
    ProductSelection, ReadinessReport, SettingsState, WizardSnapshot, WizardStep,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::wizard::today;
use crate::AppState;

/// A session id with the wizard's render state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub wizard: WizardSnapshot,
}

impl SessionResponse {
    fn new(session_id: Uuid, wizard: WizardSnapshot) -> Json<Self> {
        Json(Self { session_id, wizard })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreatedResponse {
    pub batch_id: Uuid,
    #[serde(flatten)]
    pub session: SessionResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub ready: bool,
    pub first_incomplete_step: Option<WizardStep>,
    #[serde(flatten)]
    pub report: ReadinessReport,
}

/// Raw form input for one field, coerced by the wizard
#[derive(Debug, Deserialize, Validate)]
pub struct FieldUpdate {
    #[validate(length(min = 1, max = 64, message = "Field name is required"))]
    pub field: String,
    #[validate(length(max = 256, message = "Value is too long"))]
    #[serde(default)]
    pub value: String,
}

impl FieldUpdate {
    fn parse_field<F>(&self) -> AppResult<F>
    where
        F: std::str::FromStr<Err = String>,
    {
        self.validate()?;
        self.field.parse().map_err(|message| AppError::Validation {
            field: "field".to_string(),
            message,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackingToggleRequest {
    pub enabled: bool,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedExpiryRequest {
    #[serde(default)]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub step: WizardStep,
}

/// Start an onboarding session
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (id, snapshot) = state.wizards.create().await;
    (StatusCode::CREATED, SessionResponse::new(id, snapshot))
}

/// Get a session's render state
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state.wizards.snapshot(id).await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Discard a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.wizards.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Select the product to onboard
pub async fn select_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(product): Json<ProductSelection>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.select_product(product)?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Clear the product selection and return to the first step
pub async fn clear_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.clear_product()?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Update one pricing field
pub async fn update_pricing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<FieldUpdate>,
) -> AppResult<Json<SessionResponse>> {
    let field: PricingField = input.parse_field()?;
    let snapshot = state
        .wizards
        .update(id, |wizard| {
            wizard.update_pricing(field, &input.value)?;
            Ok(())
        })
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Update one stock field
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<FieldUpdate>,
) -> AppResult<Json<SessionResponse>> {
    let field: InventoryField = input.parse_field()?;
    let snapshot = state
        .wizards
        .update(id, |wizard| {
            wizard.update_inventory(field, &input.value)?;
            Ok(())
        })
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Enable or disable per-batch expiry tracking
pub async fn toggle_batch_tracking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<TrackingToggleRequest>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .toggle_batch_tracking(id, input.enabled, input.confirm)
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Set or clear the expiry date of untracked stock
pub async fn set_shared_expiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SharedExpiryRequest>,
) -> AppResult<Json<SessionResponse>> {
    let raw = input.expiry_date.unwrap_or_default();
    let expiry_date = parse_optional_date(&raw);
    if expiry_date.is_none() && !raw.trim().is_empty() {
        return Err(AppError::Validation {
            field: "expiryDate".to_string(),
            message: format!("Invalid date '{}', expected YYYY-MM-DD", raw),
        });
    }

    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.set_shared_expiry(expiry_date, today())?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Append an empty batch
pub async fn add_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<BatchCreatedResponse>)> {
    let (batch_id, snapshot) = state
        .wizards
        .with_session(id, |wizard| {
            let batch_id = wizard.add_batch(today())?;
            Ok((batch_id, wizard.snapshot(today())))
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BatchCreatedResponse {
            batch_id,
            session: SessionResponse {
                session_id: id,
                wizard: snapshot,
            },
        }),
    ))
}

/// Update one field of a batch
pub async fn update_batch(
    State(state): State<AppState>,
    Path((id, batch_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<FieldUpdate>,
) -> AppResult<Json<SessionResponse>> {
    let field: BatchField = input.parse_field()?;
    let snapshot = state
        .wizards
        .update(id, |wizard| {
            wizard.update_batch(batch_id, field, &input.value)?;
            Ok(())
        })
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Remove a batch
pub async fn remove_batch(
    State(state): State<AppState>,
    Path((id, batch_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.remove_batch(batch_id)?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Replace the listing settings
pub async fn update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<SettingsState>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.update_settings(settings)?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Advance to the next step
pub async fn next_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.next()?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Go back one step
pub async fn previous_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.previous()?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Jump back to an already reached step
pub async fn jump_to_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<StepRequest>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.jump_to(input.step)?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Edit a section from the review step
pub async fn edit_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<StepRequest>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .update(id, |wizard| Ok(wizard.edit_section(input.step)?))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}

/// Readiness of the whole onboarding for submission
pub async fn get_readiness(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReadinessResponse>> {
    let response = state
        .wizards
        .with_session(id, |wizard| {
            let report = wizard.readiness();
            Ok(ReadinessResponse {
                ready: report.is_ready(),
                first_incomplete_step: first_incomplete_step(wizard.form()),
                report,
            })
        })
        .await?;
    Ok(Json(response))
}

/// Submit the onboarding to the inventory service
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let snapshot = state
        .wizards
        .submit(id, Arc::clone(&state.inventory_api))
        .await?;
    Ok(SessionResponse::new(id, snapshot))
}
