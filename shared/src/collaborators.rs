//! Boundaries to the services the wizard depends on
//!
//! The catalog search and the inventory-creation API live outside this
//! crate; hosts provide implementations (an HTTP client on the server, a
//! fetch wrapper in the browser, in-memory fakes in tests).

use std::future::Future;

use crate::error::{LookupError, SubmissionError};
use crate::models::{CreatedInventory, ProductSelection, SubmissionPayload};

/// Supplies candidate products for the selection step
pub trait ProductLookup {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ProductSelection>, LookupError>> + Send;
}

/// Creates the inventory record from a completed wizard.
///
/// Treated as atomic: a call either creates the record or fails as a whole.
pub trait InventoryCreator {
    fn create_inventory(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<CreatedInventory, SubmissionError>> + Send;
}
