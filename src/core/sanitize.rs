//! Making formatted text safe for the sink.

/// Sanitize `text` for delivery to a syslog transport.
///
/// The steps run in this order:
/// 1. strip leading and trailing whitespace;
/// 2. escape literal newlines as `\n` (a syslog transport treats a raw
///    newline as a record separator);
/// 3. double every `%` (the transport performs printf-style substitution;
///    doubling neutralizes it);
/// 4. remove ANSI color sequences (`ESC [ ... m`) entirely.
///
/// Percent-doubling must run after newline-escaping so the backslash the
/// escape introduces is not itself doubled. Total function; idempotent on
/// text already free of newlines, percents and ANSI codes.
pub fn clean(text: &str) -> String {
    let escaped = text.trim().replace('\n', "\\n").replace('%', "%%");
    strip_ansi(&escaped)
}

/// Remove `ESC [ ... m` sequences. An unterminated sequence is left alone.
fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("\x1b[") {
        match rest[start + 2..].find('m') {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + 2 + end + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
