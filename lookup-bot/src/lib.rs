//! # lookup-bot
//!
//! Allow-listed Telegram front end for two upstream lookups (identity by numeric id, universal by
//! phone / email / id number). Events flow teloxide → core [`dbot_core::Message`] →
//! [`handler_chain::HandlerChain`] (logging → auth → per-caller queue) → [`session::SessionEngine`].

pub mod access;
pub mod admin;
pub mod app;
pub mod cli;
pub mod config;
pub mod format;
pub mod handlers;
pub mod screens;
pub mod server;
pub mod session;
pub mod status;
pub mod telegram;

pub use access::AccessGuard;
pub use admin::AdminCommands;
pub use app::{build_handler_chain, run_bot, run_webhook, BotComponents};
pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use screens::Screens;
pub use session::{FlowError, PendingMode, Session, SessionEngine};
pub use status::BotStatus;

pub use dbot_core::{
    Bot, Chat, DbotError, Document, HandlerResponse, InlineKeyboard, Message, MessageKind,
    ParseMode, Reply, Result, User,
};
pub use handler_chain::HandlerChain;
pub use lookup_client::{
    IdentityResponse, LookupError, LookupService, PersonRecord, UniversalLookup,
};
