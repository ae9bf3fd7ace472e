//! Drives one caller's events: menu selections arm a pending mode, the next text runs the lookup.

use chrono::Local;
use dbot_core::{Bot, Chat, Document, Message, MessageKind, Reply, Result};
use lookup_client::{is_identity_input, LookupService};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{FlowError, PendingMode, Session};
use crate::admin::AdminCommands;
use crate::format::{
    format_identity, preview, render_universal_report, report_caption, report_file_name,
    split_message, write_report_file, MESSAGE_LIMIT,
};
use crate::screens::{Screens, CB_BACK_TO_MENU, CB_HELP, CB_IDENTITY, CB_UNIVERSAL};

/// Stateless over sessions: the caller's [`Session`] is passed in by its queue task.
pub struct SessionEngine {
    bot: Arc<dyn Bot>,
    lookup: Arc<dyn LookupService>,
    screens: Screens,
    admin: AdminCommands,
}

impl SessionEngine {
    pub fn new(
        bot: Arc<dyn Bot>,
        lookup: Arc<dyn LookupService>,
        screens: Screens,
        admin: AdminCommands,
    ) -> Self {
        Self {
            bot,
            lookup,
            screens,
            admin,
        }
    }

    /// Handles one authorized event. Lookup failures are answered in-chat; only transport errors
    /// while sending a reply are returned.
    #[instrument(skip(self, session, message), fields(user_id = message.user.id, kind = message.kind_label()))]
    pub async fn process(&self, session: &mut Session, message: &Message) -> Result<()> {
        match &message.kind {
            MessageKind::Command { name, args } => {
                session.reset();
                self.on_command(message, name, args).await
            }
            MessageKind::Callback { query_id, data } => {
                self.on_callback(session, message, query_id, data).await
            }
            MessageKind::Text => match session.take() {
                PendingMode::Idle => {
                    debug!(user_id = message.user.id, "Text without pending mode");
                    self.bot
                        .send_reply(&message.chat, &self.screens.use_menu())
                        .await
                        .map(|_| ())
                }
                PendingMode::AwaitingIdentityQuery => self.identity_query(message).await,
                PendingMode::AwaitingUniversalQuery => self.universal_query(message).await,
            },
        }
    }

    async fn on_command(&self, message: &Message, name: &str, args: &[String]) -> Result<()> {
        let reply = match name {
            "start" | "help" => self.screens.main_menu(&message.user),
            "admin" => self.admin.handle(args),
            other => {
                debug!(command = %other, "Ignoring unknown command");
                return Ok(());
            }
        };
        self.bot.send_reply(&message.chat, &reply).await.map(|_| ())
    }

    async fn on_callback(
        &self,
        session: &mut Session,
        message: &Message,
        query_id: &str,
        data: &str,
    ) -> Result<()> {
        if let Err(e) = self.bot.answer_callback(query_id, None, false).await {
            warn!(error = %e, "Failed to answer callback query");
        }

        let reply = match data {
            CB_IDENTITY => {
                session.arm(PendingMode::AwaitingIdentityQuery);
                self.screens.identity_prompt()
            }
            CB_UNIVERSAL => {
                session.arm(PendingMode::AwaitingUniversalQuery);
                self.screens.universal_prompt()
            }
            CB_HELP => {
                session.reset();
                self.screens.help()
            }
            CB_BACK_TO_MENU => {
                session.reset();
                self.screens.main_menu(&message.user)
            }
            other => {
                debug!(data = %other, "Ignoring unknown callback data");
                return Ok(());
            }
        };
        info!(
            user_id = message.user.id,
            mode = session.pending().label(),
            "Menu selection"
        );
        self.edit_or_send(&message.chat, &message.id, &reply).await
    }

    async fn identity_query(&self, message: &Message) -> Result<()> {
        let chat = &message.chat;
        let id_text = message.content.trim();
        if !is_identity_input(id_text) {
            info!(user_id = message.user.id, query_len = id_text.len(), "Rejected identity input");
            return self
                .bot
                .send_reply(chat, &self.screens.invalid_identity_input())
                .await
                .map(|_| ());
        }

        info!(
            user_id = message.user.id,
            mode = "identity",
            query_len = id_text.len(),
            query_preview = %preview(id_text),
            "Running lookup"
        );
        let processing_id = self.bot.send_reply(chat, &self.screens.processing()).await?;
        let outcome = self.run_identity(chat, &processing_id, id_text).await;
        self.finish(chat, &processing_id, outcome, || self.screens.identity_not_found(id_text))
            .await
    }

    async fn run_identity(
        &self,
        chat: &Chat,
        processing_id: &str,
        id_text: &str,
    ) -> std::result::Result<(), FlowError> {
        let response = self.lookup.lookup_identity(id_text).await?;
        if !response.is_success() {
            info!(status = "not_found", "Identity lookup returned no data");
            self.edit_or_send(chat, processing_id, &self.screens.identity_not_found(id_text))
                .await?;
            return Ok(());
        }

        let rendered = format_identity(&response);
        let mut chunks = split_message(&rendered, MESSAGE_LIMIT).into_iter();
        info!(status = "found", reply_len = rendered.len(), "Identity lookup succeeded");
        if let Some(first) = chunks.next() {
            self.edit_or_send(chat, processing_id, &Reply::html(first)).await?;
        }
        for chunk in chunks {
            self.bot.send_reply(chat, &Reply::html(chunk)).await?;
        }
        Ok(())
    }

    async fn universal_query(&self, message: &Message) -> Result<()> {
        let chat = &message.chat;
        let query = message.content.trim();
        if query.is_empty() {
            return self
                .bot
                .send_reply(chat, &self.screens.invalid_universal_input())
                .await
                .map(|_| ());
        }

        info!(
            user_id = message.user.id,
            mode = "universal",
            query_len = query.len(),
            query_preview = %preview(query),
            "Running lookup"
        );
        let processing_id = self.bot.send_reply(chat, &self.screens.processing()).await?;
        let outcome = self.run_universal(chat, &processing_id, query).await;
        self.finish(chat, &processing_id, outcome, || self.screens.universal_not_found(query))
            .await
    }

    async fn run_universal(
        &self,
        chat: &Chat,
        processing_id: &str,
        query: &str,
    ) -> std::result::Result<(), FlowError> {
        let lookup = self.lookup.lookup_universal(query).await;
        let records = lookup.records();
        let Some(content) = render_universal_report(records, query, Local::now().naive_local())
        else {
            info!(status = "not_found", "Universal lookup returned no records");
            self.edit_or_send(chat, processing_id, &self.screens.universal_not_found(query))
                .await?;
            return Ok(());
        };

        // Removed from disk when `file` drops, on every path out of this function.
        let file = write_report_file(&content)?;
        let document = Document {
            path: file.path().to_path_buf(),
            file_name: report_file_name(query),
            caption: Reply::html(report_caption(query, records.len(), content.len())),
        };
        if let Err(e) = self.bot.delete_message(chat, processing_id).await {
            debug!(error = %e, "Could not delete processing message");
        }
        self.bot.send_document(chat, &document).await?;
        info!(
            status = "found",
            record_count = records.len(),
            reply_len = content.len(),
            "Universal report delivered"
        );
        Ok(())
    }

    /// Replaces the processing message with a failure template when needed, then re-offers the menu.
    async fn finish(
        &self,
        chat: &Chat,
        processing_id: &str,
        outcome: std::result::Result<(), FlowError>,
        not_found: impl FnOnce() -> Reply,
    ) -> Result<()> {
        if let Err(err) = outcome {
            warn!(error = %err, "Lookup flow failed");
            let reply = match &err {
                FlowError::Upstream(_) => not_found(),
                FlowError::Report(_) => self.screens.file_error(),
                FlowError::Transport(e) => self.screens.error(&e.to_string()),
            };
            self.edit_or_send(chat, processing_id, &reply).await?;
        }
        self.bot
            .send_reply(chat, &self.screens.query_completed())
            .await
            .map(|_| ())
    }

    /// Edits `message_id` in place; falls back to a new message when there is no id or the edit fails.
    async fn edit_or_send(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        if !message_id.is_empty() {
            match self.bot.edit_reply(chat, message_id, reply).await {
                Ok(()) => return Ok(()),
                Err(e) => debug!(error = %e, message_id = %message_id, "Edit failed, sending new message"),
            }
        }
        self.bot.send_reply(chat, reply).await.map(|_| ())
    }
}
