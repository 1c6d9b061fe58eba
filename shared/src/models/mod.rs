//! Domain models for the inventory onboarding wizard

mod batch;
mod inventory;
mod payload;
mod pricing;
mod product;
mod settings;

pub use batch::*;
pub use inventory::*;
pub use payload::*;
pub use pricing::*;
pub use product::*;
pub use settings::*;
