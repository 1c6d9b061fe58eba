//! Vendor Inventory Console backend library.
//!
//! Hosts server-side onboarding wizard sessions and proxies product search
//! and inventory creation to the upstream inventory API.

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
use external::InventoryApiClient;
use services::WizardService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub wizards: WizardService,
    pub inventory_api: Arc<InventoryApiClient>,
}

impl AppState {
    pub fn new(config: Config, inventory_api: InventoryApiClient) -> Self {
        Self {
            wizards: WizardService::new(&config.wizard),
            config: Arc::new(config),
            inventory_api: Arc::new(inventory_api),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Vendor Inventory Console API v1.0"
}
