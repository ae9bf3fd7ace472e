//! Universal lookup report: a plain-text document delivered as a `.txt` attachment.

use chrono::NaiveDateTime;
use lookup_client::PersonRecord;
use std::io::{self, Write};
use tempfile::NamedTempFile;

use super::{escape, group_thousands};

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "------------------------------------------------------------";
const FILE_PREFIX: &str = "universal_info_";

/// Renders the report, or `None` when there are no records (the caller replies "not found").
/// Output depends only on the inputs, so the same records, query and time give identical bytes.
pub fn render_universal_report(
    records: &[PersonRecord],
    query: &str,
    generated_at: NaiveDateTime,
) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let total = records.len();
    let mut lines: Vec<String> = vec![
        HEAVY_RULE.to_string(),
        "🔍 UNIVERSAL INFORMATION LOOKUP RESULTS".to_string(),
        HEAVY_RULE.to_string(),
        String::new(),
        format!("📱 Search Query: {}", query),
        format!("📅 Search Time: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!("📊 Total Results: {}", total),
        String::new(),
        HEAVY_RULE.to_string(),
    ];

    for (idx, record) in records.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("[RESULT {} of {}]", idx + 1, total));
        lines.push(LIGHT_RULE.to_string());
        push_section(
            &mut lines,
            "👤 PERSONAL INFORMATION:",
            &[
                ("Full Name", &record.name),
                ("Father's Name", &record.father_name),
                ("ID Number", &record.id_number),
            ],
        );
        push_section(
            &mut lines,
            "📞 CONTACT DETAILS:",
            &[
                ("Mobile", &record.mobile),
                ("Alt Mobile", &record.alt_mobile),
                ("Email", &record.email),
                ("Operator", &record.circle),
            ],
        );
        if let Some(address) = record.address.as_deref() {
            let parts: Vec<&str> = address
                .split('!')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if !parts.is_empty() {
                lines.push(String::new());
                lines.push("🏠 ADDRESS:".to_string());
                lines.extend(parts.into_iter().map(|part| format!("   • {}", part)));
            }
        }
    }

    lines.push(String::new());
    lines.push(HEAVY_RULE.to_string());
    lines.push("🔐 This information is confidential".to_string());
    lines.push(HEAVY_RULE.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    Some(out)
}

/// Adds a titled block with one line per present, non-blank field; nothing when all are absent.
fn push_section(lines: &mut Vec<String>, title: &str, fields: &[(&str, &Option<String>)]) {
    let present: Vec<String> = fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("   • {}: {}", label, v))
        })
        .collect();
    if present.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(title.to_string());
    lines.extend(present);
}

/// Writes the report into a fresh temp file. The file is removed when the handle is dropped.
pub fn write_report_file(content: &str) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(FILE_PREFIX)
        .suffix(".txt")
        .tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Attachment name shown to the caller: fixed prefix, the literal query, `.txt`.
pub fn report_file_name(query: &str) -> String {
    format!("{}{}.txt", FILE_PREFIX, query)
}

/// HTML caption for the attachment.
pub fn report_caption(query: &str, record_count: usize, byte_size: usize) -> String {
    format!(
        "📄 <b>Universal Information Report</b>\n\n🔍 Query: <code>{}</code>\n📊 Results: {}\n📁 File Size: {} bytes",
        escape(query),
        record_count,
        group_thousands(i64::try_from(byte_size).unwrap_or(i64::MAX))
    )
}
