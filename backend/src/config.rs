//! Configuration management for the Vendor Inventory Console backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with VIC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream inventory API configuration
    pub inventory_api: InventoryApiConfig,

    /// Onboarding wizard session configuration
    pub wizard: WizardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryApiConfig {
    /// Base URL of the catalog and inventory API
    pub base_url: String,

    /// API key sent as `x-api-key`
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WizardConfig {
    /// Idle sessions are discarded after this many minutes
    pub session_ttl_minutes: u64,

    /// Require `confirm: true` before disabling batch tracking with batches present
    pub confirm_destructive_tracking_toggle: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("VIC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("inventory_api.base_url", "http://localhost:4000/api")?
            .set_default("inventory_api.api_key", "")?
            .set_default("inventory_api.timeout_secs", 30)?
            .set_default("wizard.session_ttl_minutes", 60)?
            .set_default("wizard.confirm_destructive_tracking_toggle", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (VIC_ prefix)
            .add_source(
                Environment::with_prefix("VIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for InventoryApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: 60,
            confirm_destructive_tracking_toggle: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            inventory_api: InventoryApiConfig::default(),
            wizard: WizardConfig::default(),
        }
    }
}
