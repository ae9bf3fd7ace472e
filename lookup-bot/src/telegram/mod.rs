//! teloxide transport: type adapters, [`dbot_core::Bot`] implementation, polling and webhook setup.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{
    update_to_core, TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper,
};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::{build_teloxide_bot, dispatch_event, register_webhook, run_polling};
