//! Identity lookup rendering (Telegram HTML).

use lookup_client::{is_truthy, AccountInfo, IdentityResponse};
use std::fmt::Write;

use super::{escape, group_thousands};

/// Fixed reply when the upstream body does not carry a truthy `success`.
pub const NOT_FOUND_TEXT: &str = "❌ <b>No information found for this Telegram ID</b>";

const RULE: &str = "═══════════════════════════════════";

/// Renders a found identity as a labelled block, or [`NOT_FOUND_TEXT`] when `success` is falsy.
/// Missing sub-records render as `N/A` / zero counters; the phone section only appears when present.
pub fn format_identity(response: &IdentityResponse) -> String {
    if !response.is_success() {
        return NOT_FOUND_TEXT.to_string();
    }

    let default_account = AccountInfo::default();
    let account = response.account_info.as_ref().unwrap_or(&default_account);
    let mut out = String::new();

    // Writing to a String never fails.
    let _ = writeln!(out, "🔍 <b>TELEGRAM INFORMATION</b>");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "👤 <b>Basic Information:</b>");
    let _ = writeln!(
        out,
        "   • 🆔 ID: <code>{}</code>",
        escape(response.user_id.as_deref().unwrap_or("N/A"))
    );
    let _ = writeln!(
        out,
        "   • 📛 Name: {}",
        escape(account.first_name.as_deref().unwrap_or("N/A"))
    );
    if let Some(last) = account.last_name.as_deref() {
        let _ = writeln!(out, "   • 📛 Last Name: {}", escape(last));
    }
    let _ = writeln!(out, "   • 🤖 Bot: {}", yes_no(is_truthy(&account.is_bot)));
    let _ = writeln!(out, "   • 🟢 Active: {}", yes_no(is_truthy(&account.is_active)));

    if let Some(phone) = response.phone_info.as_ref().filter(|p| !p.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "📱 <b>Phone Information:</b>");
        let _ = writeln!(
            out,
            "   • 🌍 Country: {}",
            escape(phone.country.as_deref().unwrap_or("N/A"))
        );
        let _ = writeln!(
            out,
            "   • 📞 Number: <code>{}</code>",
            escape(phone.full_number.as_deref().unwrap_or("N/A"))
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "📊 <b>Activity Statistics:</b>");
    for (label, value) in [
        ("💬 Total Messages", account.total_messages),
        ("👥 Total Groups", account.total_groups),
        ("💬 Group Messages", account.messages_in_groups),
        ("👑 Admin Groups", account.admin_in_groups),
        ("🔄 Usernames Used", account.usernames_count),
        ("📛 Names Used", account.names_count),
    ] {
        let _ = writeln!(out, "   • {}: {}", label, group_thousands(value.unwrap_or(0)));
    }
    if let Some(first) = account.first_message_date.as_deref() {
        let _ = writeln!(out, "   • 🕐 First Message: <code>{}</code>", escape(&clean_date(first)));
    }
    if let Some(last) = account.last_message_date.as_deref() {
        let _ = writeln!(out, "   • 🕐 Last Message: <code>{}</code>", escape(&clean_date(last)));
    }

    let _ = writeln!(out);
    out.push_str(RULE);
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "✅ Yes"
    } else {
        "❌ No"
    }
}

/// `2021-03-04T05:06:07Z` → `2021-03-04 05:06:07`.
fn clean_date(raw: &str) -> String {
    let spaced = raw.replace('T', " ");
    spaced.strip_suffix('Z').unwrap_or(&spaced).to_string()
}
