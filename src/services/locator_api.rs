use crate::models::{ChatbotReply, Store};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the locator API
#[derive(Debug, Error)]
pub enum LocatorApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct StoresEnvelope {
    stores: Option<Vec<Store>>,
}

/// Locator API client
///
/// Handles the two upstream calls:
/// - Fetching the store list
/// - Relaying chat queries to the chatbot endpoint
#[derive(Debug, Clone)]
pub struct LocatorApiClient {
    base_url: String,
    client: Client,
}

impl LocatorApiClient {
    /// Create a new client with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LocatorApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch every store
    pub async fn fetch_stores(&self) -> Result<Vec<Store>, LocatorApiError> {
        let url = self.endpoint("stores");

        tracing::debug!("Fetching stores from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LocatorApiError::ApiError(format!(
                "Failed to fetch stores: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let envelope: StoresEnvelope = serde_json::from_str(&body).map_err(|e| {
            LocatorApiError::InvalidResponse(format!("Failed to parse stores: {}", e))
        })?;

        let stores = envelope
            .stores
            .ok_or_else(|| LocatorApiError::InvalidResponse("Missing stores array".into()))?;

        tracing::debug!("Fetched {} stores", stores.len());

        Ok(stores)
    }

    /// Send a free-text query to the chatbot endpoint
    pub async fn ask_chatbot(&self, query: &str) -> Result<ChatbotReply, LocatorApiError> {
        let url = format!(
            "{}?query={}",
            self.endpoint("chatbot/"),
            urlencoding::encode(query)
        );

        tracing::debug!("Relaying chat query to: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Chatbot request failed: {} - {}", status, body);
            return Err(LocatorApiError::ApiError(format!(
                "HTTP error! status: {}",
                status
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            LocatorApiError::InvalidResponse(format!("Failed to parse chatbot reply: {}", e))
        })
    }
}
