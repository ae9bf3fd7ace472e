//! Bot configuration loaded from the environment (and `.env` via dotenvy in `main`).

mod bot_config;


pub use bot_config::{parse_admin_ids, BotConfig, DEFAULT_LOG_FILE, DEFAULT_PORT};
