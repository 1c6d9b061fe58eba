//! Catalog product models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::SpecificationAttribute;

/// The catalog product chosen for onboarding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSelection {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    /// Selling unit (e.g., "piece", "box", "kg")
    pub unit: String,
    /// Catalog list price, used as a pricing hint
    pub base_price: Decimal,
    #[serde(default)]
    pub specifications: Vec<SpecificationAttribute>,
    /// Units already on hand for this vendor, if the product was stocked before
    #[serde(default)]
    pub current_stock: u32,
}

impl ProductSelection {
    /// Display label combining brand and name
    pub fn display_name(&self) -> String {
        match &self.brand {
            Some(brand) if !brand.trim().is_empty() => format!("{} {}", brand, self.name),
            _ => self.name.clone(),
        }
    }
}
