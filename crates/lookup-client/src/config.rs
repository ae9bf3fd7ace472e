//! Upstream endpoint configuration, loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Endpoints, query parameter names, timeout and user agent for [`LookupClient`](crate::LookupClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// IDENTITY_LOOKUP_URL
    pub identity_url: String,
    /// IDENTITY_LOOKUP_PARAM (default `value`)
    pub identity_param: String,
    /// UNIVERSAL_LOOKUP_URL
    pub universal_url: String,
    /// UNIVERSAL_LOOKUP_PARAM (default `type`)
    pub universal_param: String,
    /// LOOKUP_TIMEOUT_SECS (default 15)
    pub timeout: Duration,
    /// LOOKUP_USER_AGENT (default `Mozilla/5.0`)
    pub user_agent: String,
}

impl LookupConfig {
    /// Config with default parameter names, timeout and user agent.
    pub fn new(identity_url: impl Into<String>, universal_url: impl Into<String>) -> Self {
        Self {
            identity_url: identity_url.into(),
            identity_param: "value".to_string(),
            universal_url: universal_url.into(),
            universal_param: "type".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Load from environment variables. Both endpoint URLs are required.
    pub fn from_env() -> Result<Self> {
        let identity_url =
            env::var("IDENTITY_LOOKUP_URL").context("IDENTITY_LOOKUP_URL not set")?;
        let universal_url =
            env::var("UNIVERSAL_LOOKUP_URL").context("UNIVERSAL_LOOKUP_URL not set")?;
        let identity_param =
            env::var("IDENTITY_LOOKUP_PARAM").unwrap_or_else(|_| "value".to_string());
        let universal_param =
            env::var("UNIVERSAL_LOOKUP_PARAM").unwrap_or_else(|_| "type".to_string());
        let timeout_secs = match env::var("LOOKUP_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse::<u64>()
                .with_context(|| format!("LOOKUP_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        let user_agent =
            env::var("LOOKUP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            identity_url,
            identity_param,
            universal_url,
            universal_param,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        })
    }

    /// Both URLs must parse and the timeout must be non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("IDENTITY_LOOKUP_URL", &self.identity_url),
            ("UNIVERSAL_LOOKUP_URL", &self.universal_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        if self.timeout.is_zero() {
            anyhow::bail!("LOOKUP_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}
