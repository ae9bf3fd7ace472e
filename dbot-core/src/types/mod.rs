//! Core types: user, chat, inbound message event, outbound reply, handler response, and Handler trait.
//!
//! Types are split into one file per main type for easier navigation.

mod chat;
mod handler;
mod message;
mod reply;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{parse_command, Message, MessageKind};
pub use reply::{ButtonAction, Document, InlineButton, InlineKeyboard, ParseMode, Reply};
pub use response::HandlerResponse;
pub use user::User;
