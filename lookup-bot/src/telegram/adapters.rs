//! Adapters from Telegram (teloxide) types to dbot_core types.

use dbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};
use teloxide::types::{CallbackQuery, Update, UpdateKind};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_channel() {
        "channel"
    } else {
        "group"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Wraps a teloxide Message. Only text messages with a sender convert; `/cmd` text becomes a command.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<Message> {
        let text = self.0.text()?;
        let user = TelegramUserWrapper(self.0.from.as_ref()?).to_core();
        Some(Message::from_text(
            self.0.id.to_string(),
            user,
            core_chat(&self.0.chat),
            text,
        ))
    }
}

/// Wraps a teloxide CallbackQuery. Queries without data are dropped. When the originating message
/// is unavailable the chat falls back to the caller's private chat and the message id is empty.
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Option<Message> {
        let query = self.0;
        let data = query.data.as_deref()?;
        let user = TelegramUserWrapper(&query.from).to_core();
        let (message_id, chat) = match query.message.as_ref() {
            Some(origin) => (origin.id().to_string(), core_chat(origin.chat())),
            None => (
                String::new(),
                Chat {
                    id: user.id,
                    chat_type: "private".to_string(),
                },
            ),
        };
        Some(Message::from_callback(
            message_id,
            user,
            chat,
            query.id.0.clone(),
            data,
        ))
    }
}

/// Converts a raw update (webhook path). Anything other than a message or callback is ignored.
pub fn update_to_core(update: &Update) -> Option<Message> {
    match &update.kind {
        UpdateKind::Message(message) => TelegramMessageWrapper(message).to_core(),
        UpdateKind::CallbackQuery(query) => TelegramCallbackWrapper(query).to_core(),
        _ => None,
    }
}
