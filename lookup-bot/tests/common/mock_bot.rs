//! Mock implementation of [`lookup_bot::Bot`] for integration tests.
//!
//! Every call is recorded as a [`BotCall`] on an mpsc channel so tests can wait for the replies of
//! a caller's queue task without hitting Telegram.

use async_trait::async_trait;
use lookup_bot::{Bot, Chat, DbotError, Document, Reply, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum BotCall {
    Send {
        chat_id: i64,
        message_id: String,
        reply: Reply,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        reply: Reply,
    },
    Delete {
        chat_id: i64,
        message_id: String,
    },
    Document {
        chat_id: i64,
        path: PathBuf,
        file_name: String,
        caption: String,
        /// File content read at upload time.
        content: String,
    },
    AnswerCallback {
        query_id: String,
        text: Option<String>,
        show_alert: bool,
    },
}

impl BotCall {
    /// Text of a sent or edited reply.
    pub fn text(&self) -> Option<&str> {
        match self {
            BotCall::Send { reply, .. } | BotCall::Edit { reply, .. } => Some(reply.text.as_str()),
            _ => None,
        }
    }
}

pub struct MockBot {
    next_id: AtomicI32,
    fail_edits: AtomicBool,
    fail_documents: AtomicBool,
    tx: mpsc::UnboundedSender<BotCall>,
}

impl MockBot {
    /// Creates a MockBot and returns the receiver for recorded calls. Sent message ids start at 100.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bot = Arc::new(Self {
            next_id: AtomicI32::new(100),
            fail_edits: AtomicBool::new(false),
            fail_documents: AtomicBool::new(false),
            tx,
        });
        (bot, rx)
    }

    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    pub fn fail_documents(&self) {
        self.fail_documents.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: BotCall) {
        let _ = self.tx.send(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String> {
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.record(BotCall::Send {
            chat_id: chat.id,
            message_id: message_id.clone(),
            reply: reply.clone(),
        });
        Ok(message_id)
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("message can't be edited".to_string()));
        }
        self.record(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.record(BotCall::Delete {
            chat_id: chat.id,
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn send_document(&self, chat: &Chat, document: &Document) -> Result<()> {
        if self.fail_documents.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("Request Entity Too Large".to_string()));
        }
        let content = std::fs::read_to_string(&document.path).unwrap_or_default();
        self.record(BotCall::Document {
            chat_id: chat.id,
            path: document.path.clone(),
            file_name: document.file_name.clone(),
            caption: document.caption.text.clone(),
            content,
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        self.record(BotCall::AnswerCallback {
            query_id: query_id.to_string(),
            text: text.map(String::from),
            show_alert,
        });
        Ok(())
    }
}

/// Waits up to 2s for the next recorded call.
pub async fn next_call(rx: &mut mpsc::UnboundedReceiver<BotCall>) -> BotCall {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a bot call")
        .expect("bot call channel closed")
}

/// Collects calls up to and including the first one whose text contains `marker`.
pub async fn calls_until(rx: &mut mpsc::UnboundedReceiver<BotCall>, marker: &str) -> Vec<BotCall> {
    let mut calls = Vec::new();
    loop {
        let call = next_call(rx).await;
        let done = call.text().is_some_and(|t| t.contains(marker));
        calls.push(call);
        if done {
            return calls;
        }
    }
}

/// Asserts nothing else arrives within a short grace period.
pub async fn assert_no_more_calls(rx: &mut mpsc::UnboundedReceiver<BotCall>) {
    let extra = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
    assert!(extra.is_err(), "unexpected extra bot call: {:?}", extra);
}
