//! Inventory step models

use serde::{Deserialize, Serialize};

use crate::types::coerce_quantity;

/// Stock quantities collected by the inventory step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryState {
    /// Units already on hand (baseline, read-only in the wizard)
    pub current_stock: u32,
    /// Units being added by this onboarding
    pub add_stock: u32,
    /// Reorder threshold
    pub min_stock_level: u32,
    /// Optional storage ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stock_level: Option<u32>,
}

/// Editable inventory fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryField {
    AddStock,
    MinStockLevel,
    MaxStockLevel,
}

impl std::str::FromStr for InventoryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_stock" | "addStock" => Ok(InventoryField::AddStock),
            "min_stock_level" | "minStockLevel" => Ok(InventoryField::MinStockLevel),
            "max_stock_level" | "maxStockLevel" => Ok(InventoryField::MaxStockLevel),
            other => Err(format!("Unknown inventory field: {}", other)),
        }
    }
}

impl InventoryState {
    /// Stock level after this onboarding is applied
    pub fn new_total_stock(&self) -> u64 {
        u64::from(self.current_stock) + u64::from(self.add_stock)
    }

    /// Apply raw text input to one field. An empty max level clears it.
    pub fn apply_input(&mut self, field: InventoryField, input: &str) {
        match field {
            InventoryField::AddStock => self.add_stock = coerce_quantity(input),
            InventoryField::MinStockLevel => self.min_stock_level = coerce_quantity(input),
            InventoryField::MaxStockLevel => {
                self.max_stock_level = if input.trim().is_empty() {
                    None
                } else {
                    Some(coerce_quantity(input))
                };
            }
        }
    }

    /// Whether the new total sits at or below the reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.new_total_stock() <= u64::from(self.min_stock_level)
    }

    /// Whether the new total exceeds the configured ceiling
    pub fn exceeds_max_stock(&self) -> bool {
        self.max_stock_level
            .map(|max| self.new_total_stock() > u64::from(max))
            .unwrap_or(false)
    }
}
