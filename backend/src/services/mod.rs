//! Business logic services for the Vendor Inventory Console backend

pub mod wizard;

pub use wizard::WizardService;
