/// Longest stderr excerpt shown back to a user
const MAX_DETAIL_CHARS: usize = 500;

/// Discord rejects embed field values longer than this
pub const EMBED_FIELD_LIMIT: usize = 1024;

/// Discord rejects embed descriptions longer than this
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Keep only the tail of a long diagnostic so it fits in an embed field.
///
/// Python tracebacks end with the meaningful line, so the end is kept.
pub fn clip_detail(detail: &str) -> String {
    let trimmed = detail.trim();
    let count = trimmed.chars().count();
    if count <= MAX_DETAIL_CHARS {
        return trimmed.to_string();
    }
    let tail: String = trimmed.chars().skip(count - MAX_DETAIL_CHARS).collect();
    format!("…{}", tail)
}

/// Keep the head of `value` so the result is at most `max_chars` characters
pub fn clip_value(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", head)
}
