//! Onboarding wizard controller
//!
//! Owns the form (one state object shared by every step), the current step
//! position and the submission flag. Every mutation goes through the
//! controller so derived values are recomputed on write and nothing changes
//! while a submission is in flight.
//!
//! Step order: product -> pricing -> inventory -> expiry -> review.
//! Forward moves require the current step to validate; backward moves never
//! do. Submission happens from the review step and ends the workflow.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collaborators::InventoryCreator;
use crate::error::{SubmissionError, WizardError};
use crate::types::display_money;
use crate::models::{
    build_submission_payload, days_until_expiry, Batch, BatchField, BatchReconciliation,
    CreatedInventory, ExpiryState, ExpiryStatus, InventoryField, InventoryState, PricingField,
    PricingState, ProductSelection, SettingsState, SubmissionPayload,
};
use crate::validation::{first_incomplete_step, is_step_valid, readiness_report, step_issues, ReadinessReport};

/// A wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Product,
    Pricing,
    Inventory,
    Expiry,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Product,
        WizardStep::Pricing,
        WizardStep::Inventory,
        WizardStep::Expiry,
        WizardStep::Review,
    ];

    pub const FIRST: WizardStep = WizardStep::Product;
    pub const LAST: WizardStep = WizardStep::Review;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Product => 0,
            WizardStep::Pricing => 1,
            WizardStep::Inventory => 2,
            WizardStep::Expiry => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Product => "Select Product",
            WizardStep::Pricing => "Pricing",
            WizardStep::Inventory => "Stock",
            WizardStep::Expiry => "Expiry & Batches",
            WizardStep::Review => "Review",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WizardStep::Product => "product",
            WizardStep::Pricing => "pricing",
            WizardStep::Inventory => "inventory",
            WizardStep::Expiry => "expiry",
            WizardStep::Review => "review",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.to_string() == s)
            .ok_or_else(|| format!("Unknown wizard step: {}", s))
    }
}

/// Accumulated data of all steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingForm {
    pub product: Option<ProductSelection>,
    pub pricing: PricingState,
    pub inventory: InventoryState,
    pub expiry: ExpiryState,
    pub settings: SettingsState,
}

/// Step position and submission flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: WizardStep,
    pub is_submitting: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::FIRST,
            is_submitting: false,
        }
    }
}

/// Navigation view of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub step: WizardStep,
    pub index: usize,
    pub title: &'static str,
    pub valid: bool,
    /// Can be jumped to directly
    pub reachable: bool,
    pub current: bool,
}

/// Expiry urgency of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExpiryView {
    pub batch_id: Uuid,
    pub status: Option<ExpiryStatus>,
    pub days_until_expiry: Option<i64>,
}

/// Rounded and derived figures the console shows beside the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayHints {
    pub final_price: Decimal,
    pub margin: Decimal,
    pub margin_percentage: Decimal,
    pub is_profitable: bool,
    pub is_low_stock: bool,
    pub exceeds_max_stock: bool,
    /// Expiry of untracked stock
    pub shared_expiry: Option<NaiveDate>,
    pub earliest_expiry: Option<NaiveDate>,
}

impl DisplayHints {
    fn from_form(form: &OnboardingForm) -> Self {
        let pricing = &form.pricing;
        Self {
            final_price: display_money(pricing.final_price()),
            margin: display_money(pricing.margin()),
            margin_percentage: pricing.margin_percentage().round_dp(2),
            is_profitable: pricing.is_profitable(),
            is_low_stock: form.inventory.is_low_stock(),
            exceeds_max_stock: form.inventory.exceeds_max_stock(),
            shared_expiry: form.expiry.shared_expiry(),
            earliest_expiry: form.expiry.earliest_expiry(),
        }
    }
}

/// Everything a console needs to render the wizard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step: WizardStep,
    pub current_step_index: usize,
    pub is_submitting: bool,
    pub is_completed: bool,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub steps: Vec<StepProgress>,
    /// Issues blocking the current step
    pub issues: Vec<&'static str>,
    pub form: OnboardingForm,
    pub new_total_stock: u64,
    pub batch_reconciliation: BatchReconciliation,
    pub batch_expiry: Vec<BatchExpiryView>,
    pub hints: DisplayHints,
    pub readiness: ReadinessReport,
    pub last_error: Option<SubmissionError>,
    pub completion: Option<CreatedInventory>,
}

/// The onboarding state machine
#[derive(Debug, Clone, Default)]
pub struct WizardController {
    form: OnboardingForm,
    state: WizardState,
    last_error: Option<SubmissionError>,
    completion: Option<CreatedInventory>,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    /// Error of the most recent failed submission
    pub fn last_error(&self) -> Option<&SubmissionError> {
        self.last_error.as_ref()
    }

    pub fn completion(&self) -> Option<&CreatedInventory> {
        self.completion.as_ref()
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.state.is_submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if self.completion.is_some() {
            return Err(WizardError::AlreadyCompleted);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Product step
    // ------------------------------------------------------------------------

    /// Select the product to onboard; its stock on hand becomes the baseline
    pub fn select_product(&mut self, product: ProductSelection) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.form.inventory.current_stock = product.current_stock;
        self.form.product = Some(product);
        Ok(())
    }

    /// Clear the selected product.
    ///
    /// Sends the wizard back to the product step; pricing, stock and batch
    /// data are kept.
    pub fn clear_product(&mut self) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.form.product = None;
        self.state.current_step = WizardStep::Product;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Pricing step
    // ------------------------------------------------------------------------

    pub fn update_pricing(&mut self, field: PricingField, input: &str) -> Result<&PricingState, WizardError> {
        self.ensure_idle()?;
        self.form.pricing.apply_input(field, input);
        Ok(&self.form.pricing)
    }

    pub fn set_pricing(&mut self, pricing: PricingState) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.form.pricing = pricing;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Inventory step
    // ------------------------------------------------------------------------

    pub fn update_inventory(&mut self, field: InventoryField, input: &str) -> Result<&InventoryState, WizardError> {
        self.ensure_idle()?;
        self.form.inventory.apply_input(field, input);
        if field == InventoryField::AddStock {
            self.form.expiry.sync_untracked_quantity(self.form.inventory.add_stock);
        }
        Ok(&self.form.inventory)
    }

    // ------------------------------------------------------------------------
    // Expiry step
    // ------------------------------------------------------------------------

    /// Turn batch tracking on or off. Disabling discards all batches.
    pub fn toggle_batch_tracking(&mut self, enabled: bool, today: NaiveDate) -> Result<&ExpiryState, WizardError> {
        self.ensure_idle()?;
        self.form
            .expiry
            .toggle_tracking(enabled, self.form.inventory.add_stock, today);
        Ok(&self.form.expiry)
    }

    pub fn add_batch(&mut self, today: NaiveDate) -> Result<Uuid, WizardError> {
        self.ensure_idle()?;
        self.form.expiry.add_batch(today)
    }

    pub fn update_batch(&mut self, id: Uuid, field: BatchField, input: &str) -> Result<&Batch, WizardError> {
        self.ensure_idle()?;
        self.form.expiry.update_batch(id, field, input)?;
        self.form.expiry.batch(id).ok_or(WizardError::BatchNotFound(id))
    }

    pub fn remove_batch(&mut self, id: Uuid) -> Result<Batch, WizardError> {
        self.ensure_idle()?;
        self.form.expiry.remove_batch(id)
    }

    /// Shared expiry date when batch tracking is off
    pub fn set_shared_expiry(&mut self, expiry_date: Option<NaiveDate>, today: NaiveDate) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.form
            .expiry
            .set_shared_expiry(expiry_date, self.form.inventory.add_stock, today)
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn update_settings(&mut self, settings: SettingsState) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.form.settings = settings;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        is_step_valid(step, &self.form)
    }

    pub fn can_go_next(&self) -> bool {
        !self.state.is_submitting
            && self.completion.is_none()
            && self.state.current_step.next().is_some()
            && self.is_step_valid(self.state.current_step)
    }

    pub fn can_go_previous(&self) -> bool {
        !self.state.is_submitting
            && self.completion.is_none()
            && self.state.current_step.previous().is_some()
    }

    /// Advance one step if the current step validates
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        let current = self.state.current_step;
        if !self.is_step_valid(current) {
            return Err(WizardError::StepIncomplete(current));
        }
        let next = current.next().ok_or(WizardError::NoNextStep)?;
        self.state.current_step = next;
        Ok(next)
    }

    /// Go back one step; no validation needed
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        let previous = self
            .state
            .current_step
            .previous()
            .ok_or(WizardError::NoPreviousStep)?;
        self.state.current_step = previous;
        Ok(previous)
    }

    /// Jump to a step already reached
    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        let current = self.state.current_step;
        if target > current {
            return Err(WizardError::StepNotReached { target, current });
        }
        self.state.current_step = target;
        Ok(target)
    }

    pub fn jump_to_index(&mut self, index: usize) -> Result<WizardStep, WizardError> {
        let target = WizardStep::from_index(index).ok_or(WizardError::InvalidStepIndex(index))?;
        self.jump_to(target)
    }

    /// "Edit this section" shortcut from the review step
    pub fn edit_section(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        if self.state.current_step != WizardStep::Review {
            return Err(WizardError::NotOnReviewStep);
        }
        self.state.current_step = target;
        Ok(target)
    }

    pub fn progress(&self) -> Vec<StepProgress> {
        let current = self.state.current_step;
        WizardStep::ALL
            .into_iter()
            .map(|step| StepProgress {
                step,
                index: step.index(),
                title: step.title(),
                valid: self.is_step_valid(step),
                reachable: step <= current,
                current: step == current,
            })
            .collect()
    }

    pub fn readiness(&self) -> ReadinessReport {
        readiness_report(&self.form)
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Claim the submission and build the payload.
    ///
    /// Sets the submitting flag; until [`complete_submission`] is called every
    /// edit, navigation and further `begin_submission` is rejected.
    ///
    /// [`complete_submission`]: WizardController::complete_submission
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, WizardError> {
        self.ensure_idle()?;
        let current = self.state.current_step;
        if current != WizardStep::Review {
            return Err(WizardError::StepNotReached {
                target: WizardStep::Review,
                current,
            });
        }
        if let Some(step) = first_incomplete_step(&self.form) {
            return Err(WizardError::StepIncomplete(step));
        }
        let product = self.form.product.as_ref().ok_or(WizardError::NoProductSelected)?;

        let payload = build_submission_payload(
            product,
            &self.form.pricing,
            &self.form.inventory,
            &self.form.expiry,
            &self.form.settings,
        );
        self.state.is_submitting = true;
        self.last_error = None;
        Ok(payload)
    }

    /// Settle the in-flight submission.
    ///
    /// On success the wizard is completed; on failure it stays on review with
    /// the error retained and may be submitted again.
    pub fn complete_submission(
        &mut self,
        outcome: Result<CreatedInventory, SubmissionError>,
    ) -> Result<(), WizardError> {
        if !self.state.is_submitting {
            return Err(WizardError::NotSubmitting);
        }
        self.state.is_submitting = false;
        match outcome {
            Ok(created) => {
                self.completion = Some(created);
                self.last_error = None;
            }
            Err(error) => {
                self.last_error = Some(error);
            }
        }
        Ok(())
    }

    /// Submit through `creator`, holding the wizard for the whole call
    pub async fn submit<C: InventoryCreator>(&mut self, creator: &C) -> Result<CreatedInventory, WizardError> {
        let payload = self.begin_submission()?;
        let outcome = creator.create_inventory(&payload).await;
        self.complete_submission(outcome.clone())?;
        outcome.map_err(WizardError::from)
    }

    pub fn snapshot(&self, today: NaiveDate) -> WizardSnapshot {
        let current = self.state.current_step;
        let batch_expiry = self
            .form
            .expiry
            .batches()
            .iter()
            .map(|batch| BatchExpiryView {
                batch_id: batch.id,
                status: batch.expiry_status(today),
                days_until_expiry: batch.expiry_date.map(|date| days_until_expiry(date, today)),
            })
            .collect();

        WizardSnapshot {
            current_step: current,
            current_step_index: current.index(),
            is_submitting: self.state.is_submitting,
            is_completed: self.is_completed(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
            steps: self.progress(),
            issues: step_issues(current, &self.form),
            form: self.form.clone(),
            new_total_stock: self.form.inventory.new_total_stock(),
            batch_reconciliation: self.form.expiry.reconcile(self.form.inventory.add_stock),
            batch_expiry,
            hints: DisplayHints::from_form(&self.form),
            readiness: self.readiness(),
            last_error: self.last_error.clone(),
            completion: self.completion.clone(),
        }
    }
}
