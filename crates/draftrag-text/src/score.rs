//! Term-frequency scoring.

/// Sum, over every token, of its non-overlapping substring occurrences in
/// the lower-cased `text`. Tokens are expected to be lower-case already.
///
/// This is a raw frequency sum with no length normalization or IDF, so a
/// document that repeats query words outranks one that mentions them once.
pub fn score<S: AsRef<str>>(text: &str, tokens: &[S]) -> u64 {
    let lowered = text.to_lowercase();
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .map(|t| lowered.matches(t).count() as u64)
        .sum()
}
