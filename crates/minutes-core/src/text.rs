//! Character-safe string helpers.

/// Returns at most `max_chars` leading characters of `text`.
///
/// Counts Unicode scalar values, so multi-byte (e.g. Hangul) text is never
/// cut inside a character.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Splits `text` into consecutive pieces of exactly `size` characters; the
/// last piece may be shorter. Empty input yields no pieces.
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn chunk_chars(text: &str, size: usize) -> Vec<&str> {
    assert!(size > 0, "chunk size must be positive");
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let head = truncate_chars(rest, size);
        chunks.push(head);
        rest = &rest[head.len()..];
    }
    chunks
}
