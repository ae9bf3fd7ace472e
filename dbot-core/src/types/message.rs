//! Inbound event types for the core model: text, command or callback selection from a caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// What the caller did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Free text (not starting with `/`).
    Text,
    /// `/name arg1 arg2`; `name` is lower-cased with any `@botname` suffix removed.
    Command { name: String, args: Vec<String> },
    /// Inline button selection. `query_id` is used to answer the callback.
    Callback { query_id: String, data: String },
}

/// A single inbound event with user, chat, content and kind.
///
/// For callbacks, `id` is the message carrying the pressed keyboard (empty when unavailable) and
/// `content` is the callback data; otherwise `id` is the incoming message and `content` its text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Builds an incoming text event; text starting with `/` becomes [`MessageKind::Command`].
    pub fn from_text(id: impl Into<String>, user: User, chat: Chat, text: impl Into<String>) -> Self {
        let content = text.into();
        let kind = match parse_command(&content) {
            Some((name, args)) => MessageKind::Command { name, args },
            None => MessageKind::Text,
        };
        Self {
            id: id.into(),
            user,
            chat,
            content,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Builds an incoming callback event for the keyboard attached to message `id`.
    pub fn from_callback(
        id: impl Into<String>,
        user: User,
        chat: Chat,
        query_id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        let data = data.into();
        Self {
            id: id.into(),
            user,
            chat,
            content: data.clone(),
            kind: MessageKind::Callback {
                query_id: query_id.into(),
                data,
            },
            created_at: Utc::now(),
        }
    }

    /// Returns `(name, args)` when the event is a command.
    pub fn command(&self) -> Option<(&str, &[String])> {
        match &self.kind {
            MessageKind::Command { name, args } => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }

    /// Returns `(query_id, data)` when the event is a callback selection.
    pub fn callback(&self) -> Option<(&str, &str)> {
        match &self.kind {
            MessageKind::Callback { query_id, data } => Some((query_id.as_str(), data.as_str())),
            _ => None,
        }
    }

    /// Short label of the kind for log fields.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            MessageKind::Text => "text",
            MessageKind::Command { .. } => "command",
            MessageKind::Callback { .. } => "callback",
        }
    }
}

/// Splits `/Name@bot a b` into `("name", ["a", "b"])`. Returns `None` for anything that is not a command.
pub fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    let rest = text.trim_start().strip_prefix('/')?;
    if rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut parts = rest.split_whitespace();
    let head = parts.next()?;
    let name = head.split('@').next().unwrap_or("").to_lowercase();
    if name.is_empty() {
        return None;
    }
    let args = parts.map(str::to_string).collect();
    Some((name, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 111,
            username: None,
            first_name: Some("Op".to_string()),
            last_name: None,
        }
    }

    fn chat() -> Chat {
        Chat {
            id: 111,
            chat_type: "private".to_string(),
        }
    }

    #[test]
    fn test_parse_command_with_args_and_bot_suffix() {
        assert_eq!(
            parse_command("/Admin@LookupBot check 42"),
            Some(("admin".to_string(), vec!["check".to_string(), "42".to_string()]))
        );
        assert_eq!(parse_command("/start"), Some(("start".to_string(), vec![])));
    }

    #[test]
    fn test_parse_command_rejects_non_commands() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("/ start"), None);
        assert_eq!(parse_command("8200704994"), None);
    }

    #[test]
    fn test_from_text_detects_kind() {
        let text = Message::from_text("1", user(), chat(), "81902");
        assert_eq!(text.kind, MessageKind::Text);
        assert_eq!(text.kind_label(), "text");

        let cmd = Message::from_text("2", user(), chat(), "/admin list");
        assert_eq!(cmd.command(), Some(("admin", &["list".to_string()][..])));
        assert_eq!(cmd.content, "/admin list");
    }

    #[test]
    fn test_from_callback_exposes_data() {
        let cb = Message::from_callback("10", user(), chat(), "q1", "tg_info");
        assert_eq!(cb.callback(), Some(("q1", "tg_info")));
        assert_eq!(cb.content, "tg_info");
        assert!(cb.command().is_none());
        assert_eq!(cb.kind_label(), "callback");
    }
}
