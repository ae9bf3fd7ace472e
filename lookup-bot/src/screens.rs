//! Reply templates and inline keyboards shown to callers.

use dbot_core::{InlineButton, InlineKeyboard, Reply, User};

use crate::format::{escape, truncate_chars};

pub const CB_IDENTITY: &str = "tg_info";
pub const CB_UNIVERSAL: &str = "universal_info";
pub const CB_HELP: &str = "help";
pub const CB_BACK_TO_MENU: &str = "back_to_menu";

/// Alert text for callbacks from callers outside the allow-list.
pub const CALLBACK_REFUSAL: &str = "❌ Admin access required!";

/// Max chars of free-form error text shown to a caller.
pub const ERROR_TEXT_LIMIT: usize = 100;

/// Renders every fixed screen. Holds the optional operator handle used in refusals.
#[derive(Debug, Clone, Default)]
pub struct Screens {
    contact_username: Option<String>,
}

impl Screens {
    pub fn new(contact_username: Option<String>) -> Self {
        Self { contact_username }
    }

    pub fn main_menu(&self, user: &User) -> Reply {
        let name = user.first_name.as_deref().unwrap_or("Admin");
        Reply::html(format!(
            "👋 <b>Welcome {}!</b>\n\n🆔 <b>Your ID:</b> <code>{}</code>\n\n🔍 <b>Select a lookup:</b>",
            escape(name),
            user.id
        ))
        .with_keyboard(menu_keyboard())
    }

    pub fn identity_prompt(&self) -> Reply {
        Reply::html(
            "📱 <b>Telegram Information Lookup</b>\n\n\
             Send the Telegram User ID (numeric only).\n\
             Example: <code>8190291080</code>",
        )
    }

    pub fn universal_prompt(&self) -> Reply {
        Reply::html(
            "🌐 <b>Universal Information Lookup</b>\n\n\
             Send one of:\n\
             • Mobile number\n\
             • Email address\n\
             • ID number\n\n\
             📄 Results are delivered as a .txt file.",
        )
    }

    pub fn help(&self) -> Reply {
        Reply::html(
            "ℹ️ <b>Help</b>\n\n\
             1. Open the menu with /start.\n\
             2. Pick <b>Telegram Info</b> and send a numeric user ID, or\n\
             3. Pick <b>Universal Info</b> and send a mobile number, email or ID number.\n\n\
             Each selection accepts one query; choose again from the menu for the next one.\n\n\
             👑 Admins: <code>/admin</code> for allow-list commands.",
        )
        .with_keyboard(back_keyboard("🔙 Back to Menu"))
    }

    pub fn use_menu(&self) -> Reply {
        Reply::html("Please use the buttons to select an option.")
            .with_keyboard(back_keyboard("🏠 Main Menu"))
    }

    pub fn processing(&self) -> Reply {
        Reply::html("🔄 <b>Processing your request...</b>")
    }

    pub fn invalid_identity_input(&self) -> Reply {
        Reply::html(
            "❌ <b>Invalid Input</b>\n\n\
             Please enter a valid Telegram User ID (numeric only).\n\
             Example: <code>8190291080</code>",
        )
        .with_keyboard(back_keyboard("🔙 Back to Menu"))
    }

    pub fn invalid_universal_input(&self) -> Reply {
        Reply::html(
            "❌ <b>Invalid Input</b>\n\n\
             Please send a mobile number, email address or ID number.",
        )
        .with_keyboard(back_keyboard("🔙 Back to Menu"))
    }

    pub fn identity_not_found(&self, id_text: &str) -> Reply {
        Reply::html(format!(
            "❌ <b>No information found</b>\n\nCould not find information for User ID: <code>{}</code>",
            escape(id_text)
        ))
    }

    pub fn universal_not_found(&self, query: &str) -> Reply {
        Reply::html(format!(
            "❌ No information found for: <code>{}</code>",
            escape(query)
        ))
    }

    pub fn file_error(&self) -> Reply {
        Reply::html("❌ <b>Error creating file</b>")
    }

    /// Generic failure reply; `detail` is truncated and escaped.
    pub fn error(&self, detail: &str) -> Reply {
        Reply::html(format!(
            "❌ <b>Error occurred</b>\n\nError: <code>{}</code>",
            escape(truncate_chars(detail, ERROR_TEXT_LIMIT))
        ))
    }

    pub fn query_completed(&self) -> Reply {
        Reply::html("✅ <b>Query Completed</b>\n\nWhat would you like to do next?")
            .with_keyboard(back_keyboard("🔙 Back to Menu"))
    }

    /// Refusal for `/start`, `/help` and other commands; carries the caller's id.
    pub fn access_denied(&self, user_id: i64) -> Reply {
        let contact = match &self.contact_username {
            Some(name) => format!("📞 <b>Contact Admin:</b> @{}", escape(name)),
            None => "📞 Contact an administrator for access.".to_string(),
        };
        let reply = Reply::html(format!(
            "🚫 <b>ACCESS DENIED</b>\n\n\
             This bot is for authorized personnel only.\n\n\
             {}\n\n\
             🔑 <b>Your User ID:</b> <code>{}</code>\n\n\
             <i>If you are an admin, add your ID to the bot configuration.</i>",
            contact, user_id
        ));
        match &self.contact_username {
            Some(name) => reply.with_keyboard(InlineKeyboard::single(InlineButton::url(
                "📞 Contact Admin",
                format!("https://t.me/{}", name),
            ))),
            None => reply,
        }
    }

    /// Short refusal for free text.
    pub fn access_denied_short(&self) -> Reply {
        let contact = match &self.contact_username {
            Some(name) => format!("Contact @{} for access.", escape(name)),
            None => "Contact an administrator for access.".to_string(),
        };
        Reply::html(format!(
            "🚫 <b>Access Denied</b>\n\nThis bot is for authorized personnel only.\n{}",
            contact
        ))
    }

    pub fn admin_only(&self) -> Reply {
        Reply::html("🚫 <b>Access Denied</b>\n\nThis command is for admins only.")
    }
}

fn menu_keyboard() -> InlineKeyboard {
    InlineKeyboard::new()
        .row(vec![InlineButton::callback("📱 Telegram Info", CB_IDENTITY)])
        .row(vec![InlineButton::callback("🌐 Universal Info", CB_UNIVERSAL)])
        .row(vec![InlineButton::callback("ℹ️ Help", CB_HELP)])
}

fn back_keyboard(label: &str) -> InlineKeyboard {
    InlineKeyboard::single(InlineButton::callback(label, CB_BACK_TO_MENU))
}
