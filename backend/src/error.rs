//! Error handling for the Vendor Inventory Console backend
//!
//! Every failure is rendered as `{ "error": { "code", "message", "field"? } }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{LookupError, SubmissionError, WizardError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    // Wizard transitions the engine refused
    #[error(transparent)]
    Wizard(#[from] WizardError),

    // External service errors
    #[error("Product lookup failed: {0}")]
    ProductLookup(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by_key(|(field, _)| **field);

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                AppError::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(error: LookupError) -> Self {
        AppError::ProductLookup(error.0)
    }
}

fn wizard_error_detail(error: &WizardError) -> (StatusCode, ErrorDetail) {
    let message = error.to_string();
    match error {
        WizardError::SubmissionInProgress => (
            StatusCode::CONFLICT,
            ErrorDetail::new("SUBMISSION_IN_PROGRESS", message),
        ),
        WizardError::AlreadyCompleted => (
            StatusCode::CONFLICT,
            ErrorDetail::new("ALREADY_COMPLETED", message),
        ),
        WizardError::StepIncomplete(step) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorDetail {
                field: Some(step.to_string()),
                ..ErrorDetail::new("STEP_INCOMPLETE", message)
            },
        ),
        WizardError::BatchNotFound(_) => (
            StatusCode::NOT_FOUND,
            ErrorDetail::new("BATCH_NOT_FOUND", message),
        ),
        WizardError::InvalidStepIndex(_) => (
            StatusCode::BAD_REQUEST,
            ErrorDetail::new("INVALID_STEP", message),
        ),
        WizardError::Submission(SubmissionError::Rejected { code, message, field }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorDetail {
                code: code.clone(),
                message: message.clone(),
                field: field.clone(),
            },
        ),
        WizardError::Submission(SubmissionError::Unavailable { .. }) => (
            StatusCode::BAD_GATEWAY,
            ErrorDetail::new("INVENTORY_SERVICE_UNAVAILABLE", message),
        ),
        WizardError::StepNotReached { .. }
        | WizardError::NoPreviousStep
        | WizardError::NoNextStep
        | WizardError::NotOnReviewStep
        | WizardError::NoProductSelected
        | WizardError::BatchTrackingDisabled
        | WizardError::BatchTrackingEnabled
        | WizardError::NotSubmitting => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorDetail::new("INVALID_STATE_TRANSITION", message),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::ConfirmationRequired(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail::new("CONFIRMATION_REQUIRED", msg.clone()),
            ),
            AppError::Wizard(error) => wizard_error_detail(error),
            AppError::ProductLookup(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new("PRODUCT_LOOKUP_FAILED", format!("Product lookup failed: {}", msg)),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
