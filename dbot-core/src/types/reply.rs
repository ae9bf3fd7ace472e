//! Outbound reply types: text with parse mode, inline keyboards and document uploads.

use std::path::PathBuf;

/// How the transport should interpret reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Plain,
    Html,
}

/// What pressing an inline button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Sends the data back as a callback selection.
    Callback(String),
    /// Opens a URL.
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub action: ButtonAction,
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Rows of inline buttons attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one row.
    pub fn row(mut self, buttons: Vec<InlineButton>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Keyboard with a single one-button row.
    pub fn single(button: InlineButton) -> Self {
        Self::new().row(vec![button])
    }

    /// All callback data values, in row order.
    pub fn callback_data(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .filter_map(|b| match &b.action {
                ButtonAction::Callback(data) => Some(data.as_str()),
                ButtonAction::Url(_) => None,
            })
            .collect()
    }
}

/// One outbound text message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub text: String,
    pub parse_mode: ParseMode,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            keyboard: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Html,
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// A local file to upload; `file_name` is what the recipient sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub file_name: String,
    pub caption: Reply,
}
