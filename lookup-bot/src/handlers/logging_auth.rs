//! Handlers for logging and allow-list auth.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Reply, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::access::AccessGuard;
use crate::screens::{Screens, CALLBACK_REFUSAL};

/// Logs each event in before() and the response in after(); always continues. Message text is
/// never logged, only its length.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = message.kind_label(),
            content_len = message.content.len(),
            "Received event"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed event"
        );
        Ok(())
    }
}

/// Stops the chain for callers outside the allow-list after sending the matching refusal.
/// No session is created and no lookup runs for them.
pub struct AuthHandler {
    guard: Arc<AccessGuard>,
    bot: Arc<dyn Bot>,
    screens: Screens,
}

impl AuthHandler {
    pub fn new(guard: Arc<AccessGuard>, bot: Arc<dyn Bot>, screens: Screens) -> Self {
        Self { guard, bot, screens }
    }

    async fn refuse(&self, message: &Message) -> Result<()> {
        match &message.kind {
            MessageKind::Callback { query_id, .. } => {
                self.bot
                    .answer_callback(query_id, Some(CALLBACK_REFUSAL), true)
                    .await
            }
            MessageKind::Command { name, .. } => {
                let reply = if name == "admin" {
                    self.screens.admin_only()
                } else {
                    self.screens.access_denied(message.user.id)
                };
                self.send(message, &reply).await
            }
            MessageKind::Text => {
                self.send(message, &self.screens.access_denied_short())
                    .await
            }
        }
    }

    async fn send(&self, message: &Message, reply: &Reply) -> Result<()> {
        self.bot.send_reply(&message.chat, reply).await.map(|_| ())
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user_id = message.user.id;
        if self.guard.is_authorized(user_id) {
            debug!(user_id = user_id, "User authorized");
            return Ok(true);
        }
        warn!(
            user_id = user_id,
            kind = message.kind_label(),
            "Unauthorized access attempt"
        );
        if let Err(e) = self.refuse(message).await {
            warn!(error = %e, user_id = user_id, "Failed to send refusal");
        }
        Ok(false)
    }
}
