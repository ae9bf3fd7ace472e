//! # dbot-core
//!
//! Core types and traits for the bot: [`Bot`], [`Handler`], inbound [`Message`] events, outbound [`Reply`] values,
//! errors and tracing initialization. Transport-agnostic; the teloxide binding lives in the application crate.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{DbotError, HandlerError, Result};
pub use logger::{init_tracing, mask_token};
pub use types::{
    parse_command, ButtonAction, Chat, Document, Handler, HandlerResponse, InlineButton,
    InlineKeyboard, Message, MessageKind, ParseMode, Reply, ToCoreMessage,
    ToCoreUser, User,
};
