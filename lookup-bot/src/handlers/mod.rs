//! Handlers in chain order: logging, access guard, per-caller conversation queue.

mod conversation;
mod logging_auth;

pub use conversation::ConversationHandler;
pub use logging_auth::{AuthHandler, LoggingHandler};
