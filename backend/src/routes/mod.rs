//! Route definitions for the Vendor Inventory Console backend

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog search (proxied to the inventory API)
        .nest("/products", product_routes())
        // Onboarding wizard sessions
        .nest("/onboarding", onboarding_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new().route("/search", get(handlers::search_products))
}

/// Onboarding wizard routes
fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_session))
        .route(
            "/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route(
            "/:id/product",
            put(handlers::select_product).delete(handlers::clear_product),
        )
        .route("/:id/pricing", put(handlers::update_pricing))
        .route("/:id/inventory", put(handlers::update_inventory))
        .route("/:id/expiry/tracking", put(handlers::toggle_batch_tracking))
        .route("/:id/expiry/shared", put(handlers::set_shared_expiry))
        .route("/:id/batches", post(handlers::add_batch))
        .route(
            "/:id/batches/:batch_id",
            put(handlers::update_batch).delete(handlers::remove_batch),
        )
        .route("/:id/settings", put(handlers::update_settings))
        .route("/:id/next", post(handlers::next_step))
        .route("/:id/previous", post(handlers::previous_step))
        .route("/:id/jump", post(handlers::jump_to_step))
        .route("/:id/edit", post(handlers::edit_section))
        .route("/:id/readiness", get(handlers::get_readiness))
        .route("/:id/submit", post(handlers::submit))
}
