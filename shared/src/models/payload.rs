//! Inventory-creation payload and its builder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExpiryState, InventoryState, PricingState, ProductSelection, SettingsState};

/// Body sent to the inventory-creation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub product_id: Uuid,
    pub pricing: PricingPayload,
    pub inventory: InventoryPayload,
    pub expiry_tracking: ExpiryTrackingPayload,
    pub settings: SettingsState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPayload {
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub discount_percentage: Decimal,
    pub final_price: Decimal,
    pub margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPayload {
    /// Opening stock of the new inventory record
    pub current_stock: u32,
    pub min_stock_level: u32,
    pub max_stock_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryTrackingPayload {
    pub has_expiry: bool,
    pub batches: Vec<BatchPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPayload {
    pub batch_number: String,
    pub quantity: u32,
    pub expiry_date: Option<NaiveDate>,
    pub manufacturing_date: Option<NaiveDate>,
}

/// Successful response of the inventory-creation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInventory {
    pub inventory_id: Uuid,
}

/// Assemble the submission payload from the step states.
///
/// The added stock becomes the record's opening `current_stock`; there is
/// no accumulation with a pre-existing record. No validation happens here;
/// the inventory-creation service has final authority.
pub fn build_submission_payload(
    product: &ProductSelection,
    pricing: &PricingState,
    inventory: &InventoryState,
    expiry: &ExpiryState,
    settings: &SettingsState,
) -> SubmissionPayload {
    let batches: Vec<BatchPayload> = expiry
        .batches()
        .iter()
        .map(|batch| BatchPayload {
            batch_number: batch.batch_number.trim().to_string(),
            quantity: batch.quantity,
            expiry_date: batch.expiry_date,
            manufacturing_date: batch.manufacturing_date,
        })
        .collect();

    let has_expiry = expiry.is_tracking_enabled()
        || batches
            .iter()
            .any(|b| b.expiry_date.is_some() || b.manufacturing_date.is_some());

    SubmissionPayload {
        product_id: product.id,
        pricing: PricingPayload {
            cost_price: pricing.cost_price(),
            selling_price: pricing.selling_price(),
            discount_percentage: pricing.discount_percentage(),
            final_price: pricing.final_price(),
            margin: pricing.margin(),
        },
        inventory: InventoryPayload {
            current_stock: inventory.add_stock,
            min_stock_level: inventory.min_stock_level,
            max_stock_level: inventory.max_stock_level,
        },
        expiry_tracking: ExpiryTrackingPayload {
            has_expiry,
            batches,
        },
        settings: settings.clone(),
    }
}
