//! `/admin` sub-commands: list, count, check <id>.

use dbot_core::Reply;
use std::fmt::Write;
use std::sync::Arc;

use crate::access::AccessGuard;
use crate::format::escape;
use crate::status::BotStatus;

/// Renders replies for the admin command. Callers are already authorized when this runs.
#[derive(Debug, Clone)]
pub struct AdminCommands {
    guard: Arc<AccessGuard>,
    masked_token: String,
    status: BotStatus,
}

impl AdminCommands {
    /// `masked_token` must already be masked; it is shown verbatim.
    pub fn new(guard: Arc<AccessGuard>, masked_token: String, status: BotStatus) -> Self {
        Self {
            guard,
            masked_token,
            status,
        }
    }

    pub fn handle(&self, args: &[String]) -> Reply {
        match args.first().map(|s| s.to_ascii_lowercase()).as_deref() {
            Some("list") => self.list(),
            Some("count") => Reply::html(format!(
                "👑 <b>Total Admins:</b> <code>{}</code>",
                self.guard.len()
            )),
            Some("check") => self.check(args.get(1).map(String::as_str)),
            _ => self.help(),
        }
    }

    fn list(&self) -> Reply {
        let mut text = String::from("👑 <b>Current Admin IDs</b> 👑\n\n");
        for id in self.guard.ids() {
            let _ = writeln!(text, "• <code>{}</code>", id);
        }
        let _ = write!(text, "\n<b>Total Admins:</b> {}", self.guard.len());
        Reply::html(text)
    }

    fn check(&self, arg: Option<&str>) -> Reply {
        let Some(id) = arg.and_then(|s| s.trim().parse::<i64>().ok()) else {
            return Reply::html("Usage: <code>/admin check &lt;user_id&gt;</code>");
        };
        if self.guard.is_authorized(id) {
            Reply::html(format!("✅ User <code>{}</code> is an admin.", id))
        } else {
            Reply::html(format!("❌ User <code>{}</code> is not an admin.", id))
        }
    }

    fn help(&self) -> Reply {
        let status = if self.status.is_active() {
            "RUNNING"
        } else {
            "STARTING"
        };
        Reply::html(format!(
            "👑 <b>Admin Commands</b> 👑\n\n\
             <code>/admin list</code> - List all admin IDs\n\
             <code>/admin count</code> - Count admins\n\
             <code>/admin check &lt;id&gt;</code> - Check if an ID is an admin\n\n\
             📊 <b>Bot Info:</b>\n\
             • Token: <code>{}</code>\n\
             • Total Admins: {}\n\
             • Bot Status: ✅ {}",
            escape(&self.masked_token),
            self.guard.len(),
            status
        ))
    }
}
