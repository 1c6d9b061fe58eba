//! HTTP handlers for product catalog search

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{ProductLookup, ProductSelection};
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for product search
#[derive(Debug, Deserialize, Validate)]
pub struct ProductSearchQuery {
    #[validate(length(min = 1, max = 100, message = "Search query must be 1 to 100 characters"))]
    pub q: String,
}

/// Search the upstream catalog for products to onboard
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductSearchQuery>,
) -> AppResult<Json<Vec<ProductSelection>>> {
    query.validate()?;

    let products = state.inventory_api.search(query.q.trim()).await?;
    tracing::debug!(query = %query.q, results = products.len(), "Product search");
    Ok(Json(products))
}
