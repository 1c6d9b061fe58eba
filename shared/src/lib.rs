//! Inventory onboarding engine for the Vendor Inventory Console
//!
//! This crate holds the multi-step onboarding wizard shared by the backend
//! (server-side wizard sessions) and the browser console (via WASM):
//! pricing derivation, batch reconciliation, step validation, the wizard
//! state machine and the submission payload builder.

pub mod collaborators;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;
pub mod wizard;

pub use collaborators::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
pub use wizard::*;
