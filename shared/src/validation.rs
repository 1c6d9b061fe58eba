//! Step validators for the onboarding wizard
//!
//! Each step maps to a predicate over the accumulated form. A step is valid
//! exactly when it reports no issues; issues are human-readable and meant for
//! display next to the disabled "next" control.

use serde::{Deserialize, Serialize};

use crate::models::{Batch, ReconciliationStatus};
use crate::wizard::{OnboardingForm, WizardStep};

// ============================================================================
// Step Validations
// ============================================================================

pub const ISSUE_NO_PRODUCT: &str = "Select a product to onboard";
pub const ISSUE_NO_COST_PRICE: &str = "Cost price must be greater than zero";
pub const ISSUE_NO_SELLING_PRICE: &str = "Selling price must be greater than zero";
pub const ISSUE_NO_ADD_STOCK: &str = "Stock to add must be greater than zero";
pub const ISSUE_BATCH_NUMBER: &str = "Every batch needs a batch number";
pub const ISSUE_BATCH_QUANTITY: &str = "Every batch needs a quantity greater than zero";
pub const ISSUE_BATCH_EXPIRY: &str = "Every batch needs an expiry date";
pub const ISSUE_BATCH_TOTAL: &str = "Batch quantities must add up to the stock being added";

/// Problems with a single tracked batch
pub fn batch_issues(batch: &Batch) -> Vec<&'static str> {
    let mut issues = Vec::new();
    if batch.batch_number.trim().is_empty() {
        issues.push(ISSUE_BATCH_NUMBER);
    }
    if batch.quantity == 0 {
        issues.push(ISSUE_BATCH_QUANTITY);
    }
    if batch.expiry_date.is_none() {
        issues.push(ISSUE_BATCH_EXPIRY);
    }
    issues
}

/// Everything preventing `step` from being valid
pub fn step_issues(step: WizardStep, form: &OnboardingForm) -> Vec<&'static str> {
    let mut issues = Vec::new();

    match step {
        WizardStep::Product => {
            if form.product.is_none() {
                issues.push(ISSUE_NO_PRODUCT);
            }
        }
        WizardStep::Pricing => {
            if form.pricing.cost_price().is_zero() {
                issues.push(ISSUE_NO_COST_PRICE);
            }
            if form.pricing.selling_price().is_zero() {
                issues.push(ISSUE_NO_SELLING_PRICE);
            }
        }
        WizardStep::Inventory => {
            if form.inventory.add_stock == 0 {
                issues.push(ISSUE_NO_ADD_STOCK);
            }
        }
        WizardStep::Expiry => {
            if !form.expiry.is_tracking_enabled() {
                return issues;
            }
            for batch in form.expiry.batches() {
                for issue in batch_issues(batch) {
                    if !issues.contains(&issue) {
                        issues.push(issue);
                    }
                }
            }
            if form.expiry.total_quantity() != u64::from(form.inventory.add_stock) {
                issues.push(ISSUE_BATCH_TOTAL);
            }
        }
        WizardStep::Review => {}
    }

    issues
}

/// Step predicate used to gate forward navigation
pub fn is_step_valid(step: WizardStep, form: &OnboardingForm) -> bool {
    step_issues(step, form).is_empty()
}

/// First step before review whose validator fails
pub fn first_incomplete_step(form: &OnboardingForm) -> Option<WizardStep> {
    WizardStep::ALL
        .into_iter()
        .filter(|step| *step != WizardStep::Review)
        .find(|step| !is_step_valid(*step, form))
}

// ============================================================================
// Review Readiness
// ============================================================================

/// Itemized submit-readiness feedback shown on the review step.
///
/// Purely informational: submission is gated by the step validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub product_selected: bool,
    pub pricing_configured: bool,
    pub stock_present: bool,
    pub batches_reconciled: bool,
    /// Advisory only; selling at a loss is allowed
    pub profitable: bool,
}

impl ReadinessReport {
    /// All required checks pass (profitability is advisory)
    pub fn is_ready(&self) -> bool {
        self.product_selected && self.pricing_configured && self.stock_present && self.batches_reconciled
    }
}

pub fn readiness_report(form: &OnboardingForm) -> ReadinessReport {
    let batches_reconciled = !form.expiry.is_tracking_enabled()
        || form.expiry.reconcile(form.inventory.add_stock).status == ReconciliationStatus::Reconciled;

    ReadinessReport {
        product_selected: form.product.is_some(),
        pricing_configured: form.pricing.is_configured(),
        stock_present: form.inventory.add_stock > 0,
        batches_reconciled,
        profitable: form.pricing.is_profitable(),
    }
}
