//! [`LookupService`] trait and its reqwest implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::types::{IdentityResponse, UniversalLookup};

/// Upstream lookups used by the session layer. Tests substitute a recording implementation.
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Identity lookup by numeric account id. Non-digit input fails with [`LookupError::InvalidInput`]
    /// without a network call. A 200 response with a JSON body is returned as-is; its `success` flag
    /// tells found from not-found.
    async fn lookup_identity(&self, id_text: &str) -> Result<IdentityResponse, LookupError>;

    /// Universal lookup by an arbitrary query (trimmed before sending). Errors and unexpected shapes
    /// are logged and collapse to [`UniversalLookup::Empty`].
    async fn lookup_universal(&self, query: &str) -> UniversalLookup;
}

/// True when `text` is non-empty and consists only of ASCII digits.
pub fn is_identity_input(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// reqwest-backed [`LookupService`]: single GET per call, fixed timeout, static user agent.
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: Client,
    config: LookupConfig,
}

impl LookupClient {
    /// Builds the HTTP client with the configured timeout and user agent.
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// GET `url?param=value`; returns the body as JSON when the status is exactly 200.
    async fn get_json(&self, url: &str, param: &str, value: &str) -> Result<Value, LookupError> {
        let response = self
            .client
            .get(url)
            .query(&[(param, value)])
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LookupService for LookupClient {
    #[instrument(skip(self))]
    async fn lookup_identity(&self, id_text: &str) -> Result<IdentityResponse, LookupError> {
        if !is_identity_input(id_text) {
            return Err(LookupError::InvalidInput);
        }
        info!(id_len = id_text.len(), "step: identity lookup request");
        let value = self
            .get_json(&self.config.identity_url, &self.config.identity_param, id_text)
            .await
            .map_err(|e| {
                warn!(error = %e, "identity lookup failed");
                e
            })?;
        let response: IdentityResponse =
            serde_json::from_value(value).map_err(|e| LookupError::Decode(e.to_string()))?;
        info!(success = response.is_success(), "step: identity lookup done");
        Ok(response)
    }

    #[instrument(skip(self, query))]
    async fn lookup_universal(&self, query: &str) -> UniversalLookup {
        let query = query.trim();
        info!(
            query_len = query.len(),
            query_preview = %query.chars().take(4).collect::<String>(),
            "step: universal lookup request"
        );
        match self
            .get_json(&self.config.universal_url, &self.config.universal_param, query)
            .await
        {
            Ok(value) => {
                let result = UniversalLookup::from_json(value);
                info!(record_count = result.records().len(), "step: universal lookup done");
                result
            }
            Err(e) => {
                warn!(error = %e, "universal lookup failed, treating as no results");
                UniversalLookup::Empty
            }
        }
    }
}
