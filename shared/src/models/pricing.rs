//! Pricing models and the price/margin calculator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::coerce_decimal;

/// Result of a pricing calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub final_price: Decimal,
    pub margin: Decimal,
}

/// Largest price the pricing step stores (one trillion). Larger input is
/// capped so derived values stay well inside `Decimal`'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Calculate final price and margin.
///
/// `final_price = max(0, selling * (1 - discount / 100))` and
/// `margin = final_price - cost`. Margin is not clamped; a negative margin
/// means the product sells at a loss. The discount is clamped into 0..=100
/// and the arithmetic saturates, so any input yields a result.
pub fn calculate_pricing(
    cost_price: Decimal,
    selling_price: Decimal,
    discount_percentage: Decimal,
) -> PriceBreakdown {
    let remaining = Decimal::ONE - clamp_discount(discount_percentage) / Decimal::ONE_HUNDRED;
    let final_price = selling_price.saturating_mul(remaining).max(Decimal::ZERO);

    PriceBreakdown {
        final_price,
        margin: final_price.saturating_sub(cost_price),
    }
}

/// Editable pricing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingField {
    CostPrice,
    SellingPrice,
    DiscountPercentage,
}

impl std::str::FromStr for PricingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost_price" | "costPrice" => Ok(PricingField::CostPrice),
            "selling_price" | "sellingPrice" => Ok(PricingField::SellingPrice),
            "discount_percentage" | "discountPercentage" => Ok(PricingField::DiscountPercentage),
            other => Err(format!("Unknown pricing field: {}", other)),
        }
    }
}

/// Raw pricing inputs; the only part of [`PricingState`] that deserializes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub selling_price: Decimal,
    #[serde(default)]
    pub discount_percentage: Decimal,
}

/// Pricing step state.
///
/// Inputs are private so the derived `final_price` and `margin` can only
/// change together with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PricingInput")]
pub struct PricingState {
    cost_price: Decimal,
    selling_price: Decimal,
    discount_percentage: Decimal,
    final_price: Decimal,
    margin: Decimal,
}

impl Default for PricingState {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }
}

impl From<PricingInput> for PricingState {
    fn from(input: PricingInput) -> Self {
        Self::new(input.cost_price, input.selling_price, input.discount_percentage)
    }
}

impl PricingState {
    /// Build pricing state; prices clamp into 0..=[`MAX_PRICE`] and the
    /// discount clamps into 0..=100.
    pub fn new(cost_price: Decimal, selling_price: Decimal, discount_percentage: Decimal) -> Self {
        let cost_price = clamp_price(cost_price);
        let selling_price = clamp_price(selling_price);
        let discount_percentage = clamp_discount(discount_percentage);
        let breakdown = calculate_pricing(cost_price, selling_price, discount_percentage);

        Self {
            cost_price,
            selling_price,
            discount_percentage,
            final_price: breakdown.final_price,
            margin: breakdown.margin,
        }
    }

    pub fn cost_price(&self) -> Decimal {
        self.cost_price
    }

    pub fn selling_price(&self) -> Decimal {
        self.selling_price
    }

    pub fn discount_percentage(&self) -> Decimal {
        self.discount_percentage
    }

    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    pub fn margin(&self) -> Decimal {
        self.margin
    }

    pub fn set_cost_price(&mut self, value: Decimal) {
        *self = Self::new(value, self.selling_price, self.discount_percentage);
    }

    pub fn set_selling_price(&mut self, value: Decimal) {
        *self = Self::new(self.cost_price, value, self.discount_percentage);
    }

    pub fn set_discount_percentage(&mut self, value: Decimal) {
        *self = Self::new(self.cost_price, self.selling_price, value);
    }

    /// Apply raw text input to one field
    pub fn apply_input(&mut self, field: PricingField, input: &str) {
        let value = coerce_decimal(input);
        match field {
            PricingField::CostPrice => self.set_cost_price(value),
            PricingField::SellingPrice => self.set_selling_price(value),
            PricingField::DiscountPercentage => self.set_discount_percentage(value),
        }
    }

    /// Both prices entered
    pub fn is_configured(&self) -> bool {
        self.cost_price > Decimal::ZERO && self.selling_price > Decimal::ZERO
    }

    pub fn is_profitable(&self) -> bool {
        self.margin > Decimal::ZERO
    }

    /// Margin as a percentage of the final price (zero when nothing is
    /// charged). Saturates when a tiny final price meets a large cost.
    pub fn margin_percentage(&self) -> Decimal {
        if self.final_price.is_zero() {
            return Decimal::ZERO;
        }
        self.margin
            .checked_div(self.final_price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if self.margin.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}

fn clamp_price(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(MAX_PRICE)
}

fn clamp_discount(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED)
}
