//! Upstream catalog and inventory API client
//!
//! Implements the wizard's product lookup and inventory creation
//! collaborators over HTTP.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{
    CreatedInventory, InventoryCreator, LookupError, ProductLookup, ProductSelection,
    SubmissionError, SubmissionPayload,
};

use crate::config::InventoryApiConfig;

/// Inventory API client
#[derive(Clone)]
pub struct InventoryApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Error body returned by the inventory API on rejection
#[derive(Debug, Deserialize)]
struct UpstreamErrorResponse {
    error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    code: String,
    message: String,
    #[serde(default)]
    field: Option<String>,
}

impl InventoryApiClient {
    /// Create a client from configuration
    pub fn new(config: &InventoryApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a non-success response onto a submission error.
    ///
    /// 4xx answers are rejections of the payload; anything else means the
    /// service could not process the request.
    async fn rejection(response: reqwest::Response) -> SubmissionError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_client_error() {
            return SubmissionError::unavailable(format!("API returned {}: {}", status, body));
        }

        match serde_json::from_str::<UpstreamErrorResponse>(&body) {
            Ok(parsed) => SubmissionError::Rejected {
                code: parsed.error.code,
                message: parsed.error.message,
                field: parsed.error.field,
            },
            Err(_) => SubmissionError::Rejected {
                code: rejection_code(status),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
                field: None,
            },
        }
    }
}

fn rejection_code(status: StatusCode) -> String {
    match status {
        StatusCode::CONFLICT => "CONFLICT".to_string(),
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => "VALIDATION_ERROR".to_string(),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "UNAUTHORIZED".to_string(),
        other => format!("HTTP_{}", other.as_u16()),
    }
}

impl ProductLookup for InventoryApiClient {
    async fn search(&self, query: &str) -> Result<Vec<ProductSelection>, LookupError> {
        let url = format!("{}/products/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| LookupError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError(format!("API returned {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError(format!("Failed to parse response: {}", e)))
    }
}

impl InventoryCreator for InventoryApiClient {
    async fn create_inventory(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<CreatedInventory, SubmissionError> {
        let url = format!("{}/inventory", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmissionError::unavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| SubmissionError::unavailable(format!("Failed to parse response: {}", e)))
    }
}
