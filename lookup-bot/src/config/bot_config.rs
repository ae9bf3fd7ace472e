//! [`BotConfig`]: token, allow-list, server bind, upstream lookup settings, contact handle, logging.

use anyhow::{Context, Result};
use lookup_client::LookupConfig;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_LOG_FILE: &str = "logs/lookup-bot.log";

/// Everything the binary needs at start. Loaded once; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// ADMIN_USER_IDS
    pub admin_user_ids: Vec<i64>,
    /// BIND_ADDR
    pub bind_addr: String,
    /// PORT
    pub port: u16,
    /// IDENTITY_LOOKUP_URL, UNIVERSAL_LOOKUP_URL and friends
    pub lookup: LookupConfig,
    /// CONTACT_USERNAME, without the leading `@`
    pub contact_username: Option<String>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// WEBHOOK_URL (public base; `/webhook` is appended)
    pub webhook_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let admin_user_ids = parse_admin_ids(&env::var("ADMIN_USER_IDS").unwrap_or_default())?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port = match env::var("PORT") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", s))?,
            Err(_) => DEFAULT_PORT,
        };
        let lookup = LookupConfig::from_env()?;
        let contact_username = env::var("CONTACT_USERNAME")
            .ok()
            .map(|s| s.trim().trim_start_matches('@').to_string())
            .filter(|s| !s.is_empty());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|s| !s.trim().is_empty());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            bot_token,
            admin_user_ids,
            bind_addr,
            port,
            lookup,
            contact_username,
            telegram_api_url,
            webhook_url,
            log_file,
        })
    }

    /// Validate config: token present, URLs parse, lookup settings sane.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.webhook_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("WEBHOOK_URL is set but not a valid URL: {}", url_str);
            }
        }
        self.lookup.validate()?;
        self.socket_addr()?;
        Ok(())
    }

    /// `BIND_ADDR:PORT` as a socket address for the health server.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind_addr, self.port))
    }

    /// Full webhook endpoint registered with Telegram, if webhook mode is configured.
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_ref()
            .map(|base| format!("{}/webhook", base.trim_end_matches('/')))
    }
}

/// Parses a comma and/or whitespace separated list of integer ids. Empty input gives an empty list.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("ADMIN_USER_IDS contains a non-integer entry: {}", s))
        })
        .collect()
}
