//! Octet-bounded chunking of sanitized text.

/// Split `text` into pieces of at most `max_octets` bytes.
///
/// Pieces concatenate back to the input. A flush is deferred while the most
/// recently appended character is `%` or `\` — the first byte of an escape
/// produced by [`clean`](crate::core::sanitize::clean) — so an escape
/// sequence is never split across two pieces; such a piece runs past the
/// limit until a non-escape character lands.
/// Accumulation is per character rather than per byte, so
/// a multi-byte scalar is never split either.
///
/// `None` disables chunking (one piece, the whole text). Empty input yields
/// one empty piece, preserving "log an empty record" semantics.
pub fn chunk(text: &str, max_octets: Option<usize>) -> Vec<String> {
    let max_octets = match max_octets {
        Some(n) => n,
        None => return vec![text.to_string()],
    };

    let mut pieces = Vec::new();
    let mut buf = String::new();
    for ch in text.chars() {
        buf.push(ch);
        if buf.len() >= max_octets && ch != '%' && ch != '\\' {
            pieces.push(std::mem::take(&mut buf));
        }
    }
    if !buf.is_empty() {
        pieces.push(buf);
    }
    if pieces.is_empty() {
        pieces.push(String::new());
    }
    pieces
}
