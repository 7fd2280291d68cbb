/// Trim and join whitespace-separated words with single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `s` to `max_chars` characters, trim trailing whitespace and append
/// `...`. Strings within the limit are returned unchanged.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", s[..cut].trim_end()),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("  a\n\tb   c \r\n"), "a b c");
    }

    #[test]
    fn truncation_is_by_character() {
        assert_eq!(truncate_with_ellipsis("héllo", 5), "héllo");
        assert_eq!(truncate_with_ellipsis("héllo world", 6), "héllo...");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
    }
}
