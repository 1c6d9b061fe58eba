//! Expiry batch models and batch reconciliation
//!
//! With batch tracking enabled the vendor splits the added stock into lots,
//! each with its own expiry date, and the lot quantities must add up to the
//! added stock. With tracking disabled a single synthetic batch (if any)
//! carries one shared expiry date for the whole quantity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WizardError;
use crate::types::{coerce_quantity, parse_optional_date};

/// A discrete lot of stock sharing one expiry date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: Uuid,
    pub batch_number: String,
    pub quantity: u32,
    pub expiry_date: Option<NaiveDate>,
    pub purchase_date: NaiveDate,
    pub manufacturing_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl Batch {
    /// Empty batch with a fresh id, purchased today
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch_number: String::new(),
            quantity: 0,
            expiry_date: None,
            purchase_date: today,
            manufacturing_date: None,
            notes: String::new(),
        }
    }

    pub fn expiry_status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        self.expiry_date.map(|date| classify_expiry(date, today))
    }

    /// Apply raw text input to one field.
    ///
    /// Quantity coerces to zero on garbage. Optional dates clear on empty or
    /// malformed input; the purchase date keeps its value instead.
    pub fn apply_input(&mut self, field: BatchField, input: &str) {
        match field {
            BatchField::BatchNumber => self.batch_number = input.to_string(),
            BatchField::Quantity => self.quantity = coerce_quantity(input),
            BatchField::ExpiryDate => self.expiry_date = parse_optional_date(input),
            BatchField::PurchaseDate => {
                if let Some(date) = parse_optional_date(input) {
                    self.purchase_date = date;
                }
            }
            BatchField::ManufacturingDate => self.manufacturing_date = parse_optional_date(input),
            BatchField::Notes => self.notes = input.to_string(),
        }
    }
}

/// Editable batch fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchField {
    BatchNumber,
    Quantity,
    ExpiryDate,
    PurchaseDate,
    ManufacturingDate,
    Notes,
}

impl std::str::FromStr for BatchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batch_number" | "batchNumber" => Ok(BatchField::BatchNumber),
            "quantity" => Ok(BatchField::Quantity),
            "expiry_date" | "expiryDate" => Ok(BatchField::ExpiryDate),
            "purchase_date" | "purchaseDate" => Ok(BatchField::PurchaseDate),
            "manufacturing_date" | "manufacturingDate" => Ok(BatchField::ManufacturingDate),
            "notes" => Ok(BatchField::Notes),
            other => Err(format!("Unknown batch field: {}", other)),
        }
    }
}

/// Expiry urgency of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Past its expiry date
    Expired,
    /// 0-7 days left
    Critical,
    /// 8-30 days left
    Warning,
    /// 31-90 days left
    Caution,
    /// More than 90 days left
    Good,
}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::Critical => "critical",
            ExpiryStatus::Warning => "warning",
            ExpiryStatus::Caution => "caution",
            ExpiryStatus::Good => "good",
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::Expired => write!(f, "Expired"),
            ExpiryStatus::Critical => write!(f, "Critical"),
            ExpiryStatus::Warning => write!(f, "Warning"),
            ExpiryStatus::Caution => write!(f, "Caution"),
            ExpiryStatus::Good => write!(f, "Good"),
        }
    }
}

/// Whole days from `today` until `expiry_date` (negative once expired)
pub fn days_until_expiry(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
    (expiry_date - today).num_days()
}

/// Classify expiry urgency
pub fn classify_expiry(expiry_date: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    match days_until_expiry(expiry_date, today) {
        days if days < 0 => ExpiryStatus::Expired,
        0..=7 => ExpiryStatus::Critical,
        8..=30 => ExpiryStatus::Warning,
        31..=90 => ExpiryStatus::Caution,
        _ => ExpiryStatus::Good,
    }
}

/// How the batch total compares with the requested stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    Reconciled,
    /// Batches account for fewer units than requested
    Under,
    /// Batches account for more units than requested
    Over,
}

/// Batch total against requested stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReconciliation {
    pub total_quantity: u64,
    pub requested: u32,
    /// `total_quantity - requested`
    pub difference: i64,
    pub status: ReconciliationStatus,
}

/// Expiry step state: tracking flag plus the batch collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryState {
    enable_batch_tracking: bool,
    batches: Vec<Batch>,
}

/// Batch number given to the synthetic batch of an untracked onboarding
pub fn shared_batch_number(today: NaiveDate) -> String {
    format!("LOT-{}", today.format("%Y%m%d"))
}

impl ExpiryState {
    pub fn is_tracking_enabled(&self) -> bool {
        self.enable_batch_tracking
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch(&self, id: Uuid) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    /// Sum of all batch quantities
    pub fn total_quantity(&self) -> u64 {
        self.batches.iter().map(|b| u64::from(b.quantity)).sum()
    }

    /// Turn batch tracking on or off.
    ///
    /// Enabling on an empty collection seeds one batch holding the whole
    /// `add_stock`. Disabling discards every batch, including a shared
    /// expiry batch.
    pub fn toggle_tracking(&mut self, enabled: bool, add_stock: u32, today: NaiveDate) {
        self.enable_batch_tracking = enabled;
        if enabled {
            if self.batches.is_empty() {
                let mut seed = Batch::new(today);
                seed.quantity = add_stock;
                self.batches.push(seed);
            }
        } else {
            self.batches.clear();
        }
    }

    /// Append an empty batch and return its id
    pub fn add_batch(&mut self, today: NaiveDate) -> Result<Uuid, WizardError> {
        if !self.enable_batch_tracking {
            return Err(WizardError::BatchTrackingDisabled);
        }
        let batch = Batch::new(today);
        let id = batch.id;
        self.batches.push(batch);
        Ok(id)
    }

    /// Replace one field of a batch
    pub fn update_batch(&mut self, id: Uuid, field: BatchField, input: &str) -> Result<(), WizardError> {
        let batch = self
            .batches
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(WizardError::BatchNotFound(id))?;
        batch.apply_input(field, input);
        Ok(())
    }

    /// Remove a batch; the collection may become empty
    pub fn remove_batch(&mut self, id: Uuid) -> Result<Batch, WizardError> {
        let position = self
            .batches
            .iter()
            .position(|b| b.id == id)
            .ok_or(WizardError::BatchNotFound(id))?;
        Ok(self.batches.remove(position))
    }

    /// Set the shared expiry date of an untracked onboarding.
    ///
    /// `None` removes the synthetic batch.
    pub fn set_shared_expiry(
        &mut self,
        expiry_date: Option<NaiveDate>,
        add_stock: u32,
        today: NaiveDate,
    ) -> Result<(), WizardError> {
        if self.enable_batch_tracking {
            return Err(WizardError::BatchTrackingEnabled);
        }

        match expiry_date {
            None => self.batches.clear(),
            Some(date) => {
                if self.batches.is_empty() {
                    let mut batch = Batch::new(today);
                    batch.batch_number = shared_batch_number(today);
                    self.batches.push(batch);
                }
                self.batches.truncate(1);
                if let Some(batch) = self.batches.first_mut() {
                    batch.expiry_date = Some(date);
                    batch.quantity = add_stock;
                }
            }
        }
        Ok(())
    }

    /// Shared expiry date of an untracked onboarding
    pub fn shared_expiry(&self) -> Option<NaiveDate> {
        if self.enable_batch_tracking {
            return None;
        }
        self.batches.first().and_then(|b| b.expiry_date)
    }

    /// Keep the synthetic batch covering the whole added stock
    pub fn sync_untracked_quantity(&mut self, add_stock: u32) {
        if self.enable_batch_tracking {
            return;
        }
        if let Some(batch) = self.batches.first_mut() {
            batch.quantity = add_stock;
        }
    }

    /// Compare the batch total with the requested stock
    pub fn reconcile(&self, add_stock: u32) -> BatchReconciliation {
        let total_quantity = self.total_quantity();
        let difference = total_quantity as i64 - i64::from(add_stock);
        let status = match difference {
            0 => ReconciliationStatus::Reconciled,
            d if d < 0 => ReconciliationStatus::Under,
            _ => ReconciliationStatus::Over,
        };

        BatchReconciliation {
            total_quantity,
            requested: add_stock,
            difference,
            status,
        }
    }

    /// Earliest expiry date across all batches
    pub fn earliest_expiry(&self) -> Option<NaiveDate> {
        self.batches.iter().filter_map(|b| b.expiry_date).min()
    }
}
