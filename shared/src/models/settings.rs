//! Vendor display and delivery preferences

use serde::{Deserialize, Serialize};

/// Listing preferences carried through to the inventory record untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsState {
    /// Listed in the storefront
    pub is_active: bool,
    pub is_featured: bool,
    /// Accept orders when out of stock
    pub allow_backorder: bool,
    pub estimated_delivery_days: Option<u32>,
    pub display_order: Option<i32>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            is_active: true,
            is_featured: false,
            allow_backorder: false,
            estimated_delivery_days: None,
            display_order: None,
        }
    }
}
