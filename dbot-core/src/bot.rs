//! Bot abstraction for sending, editing and deleting messages, uploading documents and answering callbacks.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation wraps `teloxide::Bot`.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Document, Reply};
use async_trait::async_trait;

/// Abstraction for outbound traffic. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply (text, parse mode, optional inline keyboard) and returns the new message id.
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String>;
    /// Replaces text and keyboard of an already-sent message. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()>;
    /// Deletes a message previously sent by the bot.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Uploads a local file as a document with the given display name and caption.
    async fn send_document(&self, chat: &Chat, document: &Document) -> Result<()>;
    /// Acknowledges a callback query; `text` is shown as a toast, or as an alert when `show_alert` is set.
    async fn answer_callback(&self, query_id: &str, text: Option<&str>, show_alert: bool) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit and delete.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
