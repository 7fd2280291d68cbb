//! Query tokenizer.

/// Lower-case, split on whitespace and drop tokens shorter than two
/// characters. Duplicates are kept: a repeated word counts twice when scoring.
///
/// ```
/// use draftrag_text::tokenize::tokenize;
///
/// assert_eq!(tokenize("Wafer  THROUGHPUT a"), vec!["wafer", "throughput"]);
/// assert!(tokenize("a b c").is_empty());
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() >= 2)
        .map(String::from)
        .collect()
}
