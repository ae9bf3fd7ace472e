//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests
//! substitute another Bot impl or point the API URL at a mock server.

use async_trait::async_trait;
use dbot_core::{
    parse_message_id, Bot as CoreBot, ButtonAction, Chat, DbotError, Document, InlineButton,
    InlineKeyboard, ParseMode, Reply, Result,
};
use teloxide::payloads::setters::*;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId,
    ParseMode as TgParseMode,
};
use tracing::warn;

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn tg_parse_mode(mode: ParseMode) -> Option<TgParseMode> {
    match mode {
        ParseMode::Plain => None,
        ParseMode::Html => Some(TgParseMode::Html),
    }
}

fn tg_button(button: &InlineButton) -> Option<InlineKeyboardButton> {
    match &button.action {
        ButtonAction::Callback(data) => Some(InlineKeyboardButton::callback(
            button.label.clone(),
            data.clone(),
        )),
        ButtonAction::Url(url) => match reqwest::Url::parse(url) {
            Ok(parsed) => Some(InlineKeyboardButton::url(button.label.clone(), parsed)),
            Err(e) => {
                warn!(error = %e, url = %url, "Dropping button with invalid URL");
                None
            }
        },
    }
}

fn tg_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        keyboard
            .rows
            .iter()
            .map(|row| row.iter().filter_map(tg_button).collect::<Vec<_>>()),
    )
}

fn bot_err(e: teloxide::RequestError) -> DbotError {
    DbotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String> {
        let mut request = self.bot.send_message(ChatId(chat.id), reply.text.clone());
        if let Some(mode) = tg_parse_mode(reply.parse_mode) {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(tg_markup(keyboard));
        }
        let sent = request.await.map_err(bot_err)?;
        Ok(sent.id.to_string())
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request =
            self.bot
                .edit_message_text(ChatId(chat.id), MessageId(id), reply.text.clone());
        if let Some(mode) = tg_parse_mode(reply.parse_mode) {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(tg_markup(keyboard));
        }
        request.await.map_err(bot_err)?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_document(&self, chat: &Chat, document: &Document) -> Result<()> {
        let file = InputFile::file(document.path.clone()).file_name(document.file_name.clone());
        let mut request = self
            .bot
            .send_document(ChatId(chat.id), file)
            .caption(document.caption.text.clone());
        if let Some(mode) = tg_parse_mode(document.caption.parse_mode) {
            request = request.parse_mode(mode);
        }
        request.await.map_err(bot_err)?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(query_id.to_string()));
        if let Some(text) = text {
            request = request.text(text.to_string());
        }
        if show_alert {
            request = request.show_alert(true);
        }
        request.await.map_err(bot_err)?;
        Ok(())
    }
}
