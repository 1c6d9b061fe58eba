//! WebAssembly module for the Vendor Inventory Console
//!
//! Runs the onboarding wizard in the browser:
//! - Wizard state machine with JSON snapshots for rendering
//! - Live price/margin derivation
//! - Batch expiry classification
//!
//! The console performs the HTTP submission itself between
//! `begin_submission` and `complete_submission`/`fail_submission`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{SubmissionError, WizardController, WizardStep};

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn parse_uuid(id: &str) -> Result<Uuid, JsValue> {
    Uuid::parse_str(id).map_err(|e| JsValue::from_str(&format!("Invalid batch id: {}", e)))
}

fn parse_step(index: usize) -> Result<WizardStep, JsValue> {
    WizardStep::from_index(index).ok_or_else(|| JsValue::from_str(&format!("Invalid step index: {}", index)))
}

/// Today's date in the browser's local time zone
fn today() -> NaiveDate {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Local::now().date_naive()
    }
}

fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Onboarding wizard handle owned by the console
#[wasm_bindgen]
pub struct OnboardingWizard {
    controller: WizardController,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl OnboardingWizard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> OnboardingWizard {
        OnboardingWizard {
            controller: WizardController::new(),
        }
    }

    /// Full render state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.controller.snapshot(today()))
    }

    #[wasm_bindgen(js_name = currentStep)]
    pub fn current_step(&self) -> usize {
        self.controller.current_step().index()
    }

    #[wasm_bindgen(js_name = isSubmitting)]
    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    #[wasm_bindgen(js_name = selectProduct)]
    pub fn select_product(&mut self, product_json: &str) -> Result<(), JsValue> {
        let product: ProductSelection = serde_json::from_str(product_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid product JSON: {}", e)))?;
        self.controller.select_product(product).map_err(js_error)
    }

    #[wasm_bindgen(js_name = clearProduct)]
    pub fn clear_product(&mut self) -> Result<(), JsValue> {
        self.controller.clear_product().map_err(js_error)
    }

    #[wasm_bindgen(js_name = updatePricing)]
    pub fn update_pricing(&mut self, field: &str, value: &str) -> Result<(), JsValue> {
        let field: PricingField = field.parse().map_err(js_error)?;
        self.controller.update_pricing(field, value).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = updateInventory)]
    pub fn update_inventory(&mut self, field: &str, value: &str) -> Result<(), JsValue> {
        let field: InventoryField = field.parse().map_err(js_error)?;
        self.controller.update_inventory(field, value).map_err(js_error)?;
        Ok(())
    }

    /// Disabling discards all batches; the console confirms beforehand
    #[wasm_bindgen(js_name = toggleBatchTracking)]
    pub fn toggle_batch_tracking(&mut self, enabled: bool) -> Result<(), JsValue> {
        self.controller
            .toggle_batch_tracking(enabled, today())
            .map_err(js_error)?;
        Ok(())
    }

    /// Returns the new batch id
    #[wasm_bindgen(js_name = addBatch)]
    pub fn add_batch(&mut self) -> Result<String, JsValue> {
        let id = self.controller.add_batch(today()).map_err(js_error)?;
        Ok(id.to_string())
    }

    #[wasm_bindgen(js_name = updateBatch)]
    pub fn update_batch(&mut self, id: &str, field: &str, value: &str) -> Result<(), JsValue> {
        let id = parse_uuid(id)?;
        let field: BatchField = field.parse().map_err(js_error)?;
        self.controller.update_batch(id, field, value).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = removeBatch)]
    pub fn remove_batch(&mut self, id: &str) -> Result<(), JsValue> {
        let id = parse_uuid(id)?;
        self.controller.remove_batch(id).map_err(js_error)?;
        Ok(())
    }

    /// Shared expiry date (YYYY-MM-DD) when batch tracking is off; empty clears it
    #[wasm_bindgen(js_name = setSharedExpiry)]
    pub fn set_shared_expiry(&mut self, date: &str) -> Result<(), JsValue> {
        self.controller
            .set_shared_expiry(parse_optional_date(date), today())
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = updateSettings)]
    pub fn update_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings: SettingsState = serde_json::from_str(settings_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings JSON: {}", e)))?;
        self.controller.update_settings(settings).map_err(js_error)
    }

    /// Returns the new step index
    pub fn next(&mut self) -> Result<usize, JsValue> {
        self.controller.next().map(WizardStep::index).map_err(js_error)
    }

    pub fn previous(&mut self) -> Result<usize, JsValue> {
        self.controller.previous().map(WizardStep::index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, index: usize) -> Result<usize, JsValue> {
        self.controller.jump_to_index(index).map(WizardStep::index).map_err(js_error)
    }

    /// "Edit this section" from the review step
    #[wasm_bindgen(js_name = editSection)]
    pub fn edit_section(&mut self, index: usize) -> Result<usize, JsValue> {
        let step = parse_step(index)?;
        self.controller.edit_section(step).map(WizardStep::index).map_err(js_error)
    }

    pub fn readiness(&self) -> Result<String, JsValue> {
        to_json(&self.controller.readiness())
    }

    /// Lock the wizard and return the payload JSON to POST
    #[wasm_bindgen(js_name = beginSubmission)]
    pub fn begin_submission(&mut self) -> Result<String, JsValue> {
        let payload = self.controller.begin_submission().map_err(js_error)?;
        to_json(&payload)
    }

    /// Settle a successful submission with the service's response body
    #[wasm_bindgen(js_name = completeSubmission)]
    pub fn complete_submission(&mut self, response_json: &str) -> Result<(), JsValue> {
        let outcome = serde_json::from_str::<CreatedInventory>(response_json).map_err(|e| {
            SubmissionError::unavailable(format!("Unexpected inventory response: {}", e))
        });
        if let Err(error) = &outcome {
            warn(&error.to_string());
        }
        self.controller.complete_submission(outcome).map_err(js_error)
    }

    /// Settle a failed submission, keeping the message for display
    #[wasm_bindgen(js_name = failSubmission)]
    pub fn fail_submission(&mut self, code: &str, message: &str) -> Result<(), JsValue> {
        warn(message);
        let error = if code.is_empty() {
            SubmissionError::unavailable(message)
        } else {
            SubmissionError::Rejected {
                code: code.to_string(),
                message: message.to_string(),
                field: None,
            }
        };
        self.controller.complete_submission(Err(error)).map_err(js_error)
    }
}

/// Pricing state for raw numbers from the console, clamped like the wizard's
/// own pricing step. Non-finite numbers count as zero.
fn pricing_from(cost_price: f64, selling_price: f64, discount_percentage: f64) -> PricingState {
    let decimal = |value: f64| Decimal::try_from(value).unwrap_or(Decimal::ZERO);
    PricingState::new(
        decimal(cost_price),
        decimal(selling_price),
        decimal(discount_percentage),
    )
}

/// Final price after discount, never negative
#[wasm_bindgen(js_name = calculateFinalPrice)]
pub fn calculate_final_price(selling_price: f64, discount_percentage: f64) -> f64 {
    to_f64(pricing_from(0.0, selling_price, discount_percentage).final_price())
}

/// Margin after discount; negative means selling at a loss
#[wasm_bindgen(js_name = calculateMargin)]
pub fn calculate_margin(cost_price: f64, selling_price: f64, discount_percentage: f64) -> f64 {
    to_f64(pricing_from(cost_price, selling_price, discount_percentage).margin())
}

/// Expiry urgency of a YYYY-MM-DD date relative to `today` (also YYYY-MM-DD).
/// Returns an empty string for unparsable input.
#[wasm_bindgen(js_name = classifyExpiryOn)]
pub fn classify_expiry_on(expiry_date: &str, today: &str) -> String {
    match (parse_optional_date(expiry_date), parse_optional_date(today)) {
        (Some(expiry), Some(today)) => classify_expiry(expiry, today).as_str().to_string(),
        _ => String::new(),
    }
}

/// Expiry urgency of a YYYY-MM-DD date relative to the browser's today
#[wasm_bindgen(js_name = classifyExpiryDate)]
pub fn classify_expiry_date(expiry_date: &str) -> String {
    parse_optional_date(expiry_date)
        .map(|expiry| classify_expiry(expiry, today()).as_str().to_string())
        .unwrap_or_default()
}
