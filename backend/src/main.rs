//! Vendor Inventory Console - Backend Server
//!
//! Serves the inventory onboarding wizard to the vendor console.

use std::{net::SocketAddr, time::Duration};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vendor_inventory::{create_app, external::InventoryApiClient, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendor_inventory=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Vendor Inventory Console Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Inventory API: {}", config.inventory_api.base_url);

    let inventory_api = InventoryApiClient::new(&config.inventory_api)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config, inventory_api);

    // Purge idle onboarding sessions once a minute
    let wizards = state.wizards.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            wizards.purge_idle().await;
        }
    });

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
