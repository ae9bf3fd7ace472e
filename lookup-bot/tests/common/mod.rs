//! Shared test helpers: recording Bot, scripted LookupService, event builders.

#![allow(dead_code)]

pub mod mock_bot;
pub mod mock_lookup;

use lookup_bot::{BotConfig, Chat, Message, User};
use lookup_client::LookupConfig;

pub const TEST_BOT_TOKEN: &str = "1234567890:TEST_TOKEN_abcdefgh";

/// Config with the given allow-list; upstream URLs are never contacted (tests use MockLookup).
pub fn test_config(admins: &[i64]) -> BotConfig {
    BotConfig {
        bot_token: TEST_BOT_TOKEN.to_string(),
        admin_user_ids: admins.to_vec(),
        bind_addr: "127.0.0.1".to_string(),
        port: 0,
        lookup: LookupConfig::new("http://127.0.0.1:1/identity", "http://127.0.0.1:1/universal"),
        contact_username: Some("ops_desk".to_string()),
        telegram_api_url: None,
        webhook_url: None,
        log_file: "logs/test.log".to_string(),
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Tester".to_string()),
        last_name: None,
    }
}

pub fn chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: "private".to_string(),
    }
}

/// Text (or `/command`) from `user_id` in their private chat.
pub fn text(user_id: i64, content: &str) -> Message {
    Message::from_text("1", user(user_id), chat(user_id), content)
}

/// Menu button press on message `10`.
pub fn callback(user_id: i64, data: &str) -> Message {
    Message::from_callback("10", user(user_id), chat(user_id), format!("cbq-{}", data), data)
}
