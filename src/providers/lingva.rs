use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Default endpoint of a locally running Lingva instance
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// Fallback text when a successful response carries no translation
pub const TRANSLATION_NOT_FOUND: &str = "Translation not found";

/// Fallback message when an error response carries no message
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Client for the Lingva Translate REST API
#[derive(Debug, Clone)]
pub struct Lingva {
    /// Base URL of the Lingva instance
    base_url: Url,
    /// HTTP client for making requests
    client: Client,
}

/// Success body: `{"translation": "..."}`
#[derive(Debug, Deserialize)]
pub struct LingvaTranslation {
    pub translation: Option<String>,
}

/// Failure body: `{"error": "..."}`
#[derive(Debug, Deserialize)]
pub struct LingvaError {
    pub error: Option<String>,
}

impl Lingva {
    /// Create a new client for the endpoint with a request timeout
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ProviderError::ConnectionError(format!("Endpoint cannot be used as a base URL: {}", endpoint)));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Build `{base}/api/v1/{source}/{target}/{text}` with each segment percent-encoded
    pub fn translation_url(&self, source_language: &str, target_language: &str, text: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", source_language, target_language, text]);
        }
        url
    }

    /// Turn a response status and body into translated text or an error
    pub fn interpret_response(status_code: u16, body: &str) -> Result<String, ProviderError> {
        if (200..300).contains(&status_code) {
            let parsed: LingvaTranslation = serde_json::from_str(body)
                .map_err(|e| ProviderError::ParseError(format!("{}: {}", e, body)))?;
            return Ok(parsed.translation.unwrap_or_else(|| TRANSLATION_NOT_FOUND.to_string()));
        }

        let message = serde_json::from_str::<LingvaError>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

        Err(ProviderError::ApiError { status_code, message })
    }
}

#[async_trait]
impl Translator for Lingva {
    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let url = self.translation_url(source_language, target_language, text);
        debug!("Requesting translation {} -> {} ({} chars)", source_language, target_language, text.chars().count());

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to send request to Lingva: {}", e)))?;

        let status = response.status();
        let body = response.text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Lingva response: {}", e)))?;

        let result = Self::interpret_response(status.as_u16(), &body);
        if let Err(e) = &result {
            error!("Lingva API error ({}): {}", status, e);
        }
        result
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("api");
        }

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Lingva is not reachable: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("Lingva health check failed at {}", self.base_url),
            })
        }
    }
}
