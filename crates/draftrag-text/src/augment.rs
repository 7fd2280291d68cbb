//! Helpers for callers that feed retrieval results into prompt construction.
//!
//! Only style snippets and status messages leave through here; evidence
//! text is never rendered into the style block.

use serde::{Deserialize, Serialize};

use draftrag_core::{Hit, HitStatus};

/// Maximum number of lines in a rendered style block.
pub const STYLE_BLOCK_MAX_LINES: usize = 30;

/// Prefix length, in characters, taken from each part of a query seed.
pub const QUERY_SEED_PART_CHARS: usize = 500;

/// Retrieval outcome as reported to the rest of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagStatus {
    Hit,
    NoHit,
    EmptyCorpus,
    EmptyQuery,
    Unknown,
}

impl From<HitStatus> for RagStatus {
    fn from(status: HitStatus) -> Self {
        match status {
            HitStatus::Ok => RagStatus::Hit,
            HitStatus::NoHit => RagStatus::NoHit,
            HitStatus::EmptyCorpus => RagStatus::EmptyCorpus,
            HitStatus::EmptyQuery => RagStatus::EmptyQuery,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalSummary {
    pub status: RagStatus,
    pub message: Option<String>,
}

impl RetrievalSummary {
    pub fn from_hits(hits: &[Hit]) -> Self {
        match hits.first() {
            None => Self {
                status: RagStatus::Unknown,
                message: Some("Unexpected retrieval response format.".into()),
            },
            Some(first) if !first.is_ok() => Self {
                status: first.status.into(),
                message: first.message.clone(),
            },
            Some(_) => Self { status: RagStatus::Hit, message: None },
        }
    }
}

/// Render hits as a bullet list for the style-only part of a prompt.
pub fn format_style_block(hits: &[Hit]) -> String {
    if hits.is_empty() {
        return "- (None)".to_string();
    }

    hits.iter()
        .take(STYLE_BLOCK_MAX_LINES)
        .map(|h| {
            if !h.is_ok() {
                let msg = h.message.as_deref().unwrap_or("").trim();
                if msg.is_empty() {
                    return format!("- ({})", h.status);
                }
                return format!("- ({}) {}", h.status, msg);
            }
            let name = h.filename.as_deref().unwrap_or("unknown");
            let style = h.style_snippet.trim();
            if style.is_empty() {
                format!("- ({}) (empty style snippet)", name)
            } else {
                format!("- ({}) {}", name, style)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the retrieval query from the user's description and, when one has
/// been chosen, the introduction already written.
pub fn compose_query_seed(user_input: &str, introduction: Option<&str>) -> String {
    match introduction {
        Some(intro) if !intro.is_empty() => {
            let intro = prefix_chars(intro, QUERY_SEED_PART_CHARS);
            let user = prefix_chars(user_input, QUERY_SEED_PART_CHARS);
            format!("{} {}", intro, user)
        }
        _ => user_input.to_string(),
    }
}

fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((cut, _)) => &s[..cut],
        None => s,
    }
}
