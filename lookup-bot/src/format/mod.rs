//! Response Formatter: identity block (HTML), universal report (plain text file), message chunking.

mod chunk;
mod identity;
mod report;

pub use chunk::{split_message, MESSAGE_LIMIT};
pub use identity::{format_identity, NOT_FOUND_TEXT};
pub use report::{render_universal_report, report_caption, report_file_name, write_report_file};

pub use teloxide::utils::html::escape;

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Truncates to at most `max` chars (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Short log-safe preview of a caller query.
pub fn preview(s: &str) -> &str {
    truncate_chars(s, 12)
}
