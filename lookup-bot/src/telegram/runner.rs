//! Polling runner and webhook registration. Both paths convert updates to core events and await
//! `HandlerChain::handle`, which only enqueues onto the caller's session queue, so a caller's
//! events reach that queue in the order the transport delivered them.

use anyhow::{Context, Result};
use dbot_core::{Message as CoreMessage, ToCoreMessage};
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{error, info, instrument};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::status::BotStatus;

/// Builds the teloxide Bot, pointing it at `api_url` when set (e.g. a local Bot API server or a test mock).
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("invalid Telegram API URL: {}", url_str))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Runs the chain for one converted event. Lookups run on the session queue, not here.
pub async fn dispatch_event(chain: &HandlerChain, event: Option<CoreMessage>) {
    let Some(message) = event else {
        return;
    };
    if let Err(e) = chain.handle(&message).await {
        error!(error = %e, user_id = message.user.id, "Handler chain failed");
    }
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    dispatch_event(&chain, TelegramMessageWrapper(&msg).to_core()).await;
    Ok(())
}

async fn on_callback(query: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    dispatch_event(&chain, TelegramCallbackWrapper(&query).to_core()).await;
    Ok(())
}

/// Long-polling dispatcher with one branch for messages and one for callback queries. Marks
/// `status` active before polling starts; returns on Ctrl-C.
#[instrument(skip_all)]
pub async fn run_polling(bot: teloxide::Bot, chain: HandlerChain, status: BotStatus) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    status.mark_active();
    info!("Polling for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Registers `endpoint` as the bot's webhook so Telegram pushes updates to `POST /webhook`.
#[instrument(skip(bot))]
pub async fn register_webhook(bot: &teloxide::Bot, endpoint: &str) -> Result<()> {
    let url = reqwest::Url::parse(endpoint)
        .with_context(|| format!("invalid webhook URL: {}", endpoint))?;
    bot.set_webhook(url)
        .await
        .context("setWebhook request failed")?;
    info!(endpoint = %endpoint, "Webhook registered");
    Ok(())
}
