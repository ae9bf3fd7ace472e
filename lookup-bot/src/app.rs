//! Wiring: handler chain construction and the polling / webhook entry points.

use anyhow::Result;
use dbot_core::{init_tracing, mask_token, Bot};
use handler_chain::HandlerChain;
use lookup_client::{LookupClient, LookupService};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::access::AccessGuard;
use crate::admin::AdminCommands;
use crate::config::BotConfig;
use crate::handlers::{AuthHandler, ConversationHandler, LoggingHandler};
use crate::screens::Screens;
use crate::server::{self, ServerState};
use crate::session::SessionEngine;
use crate::status::BotStatus;
use crate::telegram::{build_teloxide_bot, register_webhook, run_polling, TelegramBotAdapter};

/// Shared pieces built once at start. Tests build these around a mock bot and lookup service.
#[derive(Clone)]
pub struct BotComponents {
    pub guard: Arc<AccessGuard>,
    pub status: BotStatus,
    pub bot: Arc<dyn Bot>,
    pub lookup: Arc<dyn LookupService>,
}

impl BotComponents {
    pub fn new(
        config: &BotConfig,
        bot: Arc<dyn Bot>,
        lookup: Arc<dyn LookupService>,
        status: BotStatus,
    ) -> Self {
        Self {
            guard: Arc::new(AccessGuard::new(config.admin_user_ids.iter().copied())),
            status,
            bot,
            lookup,
        }
    }
}

/// logging → auth → per-caller conversation queue.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let screens = Screens::new(config.contact_username.clone());
    let admin = AdminCommands::new(
        components.guard.clone(),
        mask_token(&config.bot_token),
        components.status.clone(),
    );
    let engine = Arc::new(SessionEngine::new(
        components.bot.clone(),
        components.lookup.clone(),
        screens.clone(),
        admin,
    ));

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(
            components.guard.clone(),
            components.bot.clone(),
            screens,
        )))
        .add_handler(Arc::new(ConversationHandler::new(engine)))
}

/// Validates config, installs tracing and builds the real Telegram and upstream clients.
fn prepare(config: &BotConfig) -> Result<(teloxide::Bot, BotComponents)> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        token = %mask_token(&config.bot_token),
        admin_count = config.admin_user_ids.len(),
        lookup_timeout_secs = config.lookup.timeout.as_secs(),
        "Initializing bot"
    );
    if config.admin_user_ids.is_empty() {
        warn!("ADMIN_USER_IDS is empty; every caller will be refused");
    }

    let teloxide_bot = build_teloxide_bot(&config.bot_token, config.telegram_api_url.as_deref())?;
    let lookup = LookupClient::new(config.lookup.clone())?;
    let components = BotComponents::new(
        config,
        Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
        Arc::new(lookup),
        BotStatus::new(),
    );
    Ok((teloxide_bot, components))
}

/// Long polling plus the health server, concurrently.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let (teloxide_bot, components) = prepare(&config)?;
    let chain = build_handler_chain(&config, &components);
    let router = server::router(ServerState::new(
        components.guard.clone(),
        components.status.clone(),
        None,
    ));

    let addr = config.socket_addr()?;

    info!("Bot started successfully");
    // Polling returns on Ctrl-C; the server only returns on error. Either ends the process.
    tokio::select! {
        res = server::serve(addr, router) => res,
        res = run_polling(teloxide_bot, chain, components.status.clone()) => res,
    }
}

/// Registers the webhook and serves `POST /webhook` alongside the health routes.
#[instrument(skip(config))]
pub async fn run_webhook(config: BotConfig) -> Result<()> {
    let endpoint = config
        .webhook_endpoint()
        .ok_or_else(|| anyhow::anyhow!("WEBHOOK_URL must be set for webhook mode"))?;
    let (teloxide_bot, components) = prepare(&config)?;
    let chain = build_handler_chain(&config, &components);
    let router = server::router(ServerState::new(
        components.guard.clone(),
        components.status.clone(),
        Some(chain),
    ));

    register_webhook(&teloxide_bot, &endpoint).await?;
    components.status.mark_active();
    info!("Bot started successfully (webhook)");
    server::serve(config.socket_addr()?, router).await
}
