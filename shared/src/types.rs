//! Common types used across the onboarding engine
//!
//! Form inputs arrive as raw text from the console. Coercion is permissive:
//! anything that does not parse as a number becomes zero rather than being
//! rejected.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date format used by console date inputs
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Coerce text input into a non-negative decimal.
///
/// Accepts plain decimals and scientific notation. Empty, non-numeric and
/// negative input all coerce to zero.
pub fn coerce_decimal(input: &str) -> Decimal {
    let trimmed = input.trim();
    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO);

    parsed.max(Decimal::ZERO)
}

/// Coerce text input into a whole-unit quantity.
///
/// Fractional input is truncated (`"12.7"` becomes 12). Values beyond
/// `u32::MAX` saturate.
pub fn coerce_quantity(input: &str) -> u32 {
    let value = coerce_decimal(input).trunc();
    if value > Decimal::from(u32::MAX) {
        return u32::MAX;
    }
    value.to_u32().unwrap_or(0)
}

/// Parse an optional date input. Empty or malformed input means "no date".
pub fn parse_optional_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT).ok()
}

/// Round a stored money value for display (two decimal places)
pub fn display_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// A name/value attribute such as "Weight: 500 g"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationAttribute {
    pub name: String,
    pub value: String,
}

impl SpecificationAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
