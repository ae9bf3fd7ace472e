//! Splits long replies for Telegram's message size limit.

/// Max chars per outgoing text message.
pub const MESSAGE_LIMIT: usize = 4000;

/// Splits `text` into chunks of at most `limit` chars, preferring to cut after a newline so each
/// chunk keeps whole lines (and therefore balanced inline markup). Lines longer than `limit` are
/// hard-split. Concatenating the chunks gives back `text`.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > limit {
        // Byte offset just past the `limit`-th char.
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let cut = match rest[..hard_end].rfind('\n') {
            Some(nl) if nl > 0 => nl + 1,
            _ => hard_end,
        };
        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}
