//! Error types for the onboarding engine
//!
//! Local validation failures are not errors: they surface as step issues and
//! the readiness report. These types cover rejected operations and the
//! outcome of the external submission.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::wizard::WizardStep;

/// An operation the wizard refused to perform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("The onboarding has already been submitted")]
    AlreadyCompleted,

    #[error("Step '{0}' is incomplete")]
    StepIncomplete(WizardStep),

    #[error("Step '{target}' has not been reached yet (current step: '{current}')")]
    StepNotReached {
        target: WizardStep,
        current: WizardStep,
    },

    #[error("Already at the first step")]
    NoPreviousStep,

    #[error("Already at the last step")]
    NoNextStep,

    #[error("Section shortcuts are only available from the review step")]
    NotOnReviewStep,

    #[error("No product selected")]
    NoProductSelected,

    #[error("Invalid step index: {0}")]
    InvalidStepIndex(usize),

    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    #[error("Batch tracking is disabled")]
    BatchTrackingDisabled,

    #[error("Batch tracking is enabled; set expiry dates per batch")]
    BatchTrackingEnabled,

    #[error("No submission is in progress")]
    NotSubmitting,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Rejection or transport failure reported by the inventory-creation service
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionError {
    /// The service refused the payload
    #[error("Inventory creation rejected: {message}")]
    Rejected {
        code: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    /// The service could not be reached or answered unexpectedly
    #[error("Inventory service unavailable: {message}")]
    Unavailable { message: String },
}

/// Failure reported by the product lookup service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Product lookup failed: {0}")]
pub struct LookupError(pub String);

impl SubmissionError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        SubmissionError::Unavailable {
            message: message.into(),
        }
    }
}
