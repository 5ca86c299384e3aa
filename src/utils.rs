pub fn strip_ansi(s: &str) -> String {
    match strip_ansi_escapes::strip(s) {
        Ok(bytes) => String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
        Err(_) => s.to_owned(),
    }
}

/// Number of characters a terminal would show for `s`.
pub(crate) fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

// Keys that can be printed bare in an object dump, e.g. `router` but not `x-id`.
pub(crate) fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
