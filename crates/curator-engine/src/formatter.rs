//! Context formatter — renders a selection into prompt-ready text.

use curator_core::{ScoredDocument, UseCaseProfile};

const ELLIPSIS: &str = "...";

/// Renders selected documents under a fixed header.
#[derive(Debug, Clone)]
pub struct ContextFormatter {
    header: String,
    excerpt_chars: usize,
}

impl ContextFormatter {
    pub fn new(header: &str, excerpt_chars: usize) -> Self {
        Self {
            header: header.to_string(),
            excerpt_chars,
        }
    }

    pub fn for_profile(profile: &UseCaseProfile) -> Self {
        Self::new(&profile.header, profile.excerpt_chars)
    }

    /// Header line followed by one block per document, blank-line separated.
    /// An empty selection renders as the empty string ("nothing to inject").
    pub fn format(&self, selection: &[ScoredDocument]) -> String {
        if selection.is_empty() {
            return String::new();
        }
        let blocks: Vec<String> = selection.iter().map(|d| self.block(d)).collect();
        format!("{}\n{}", self.header, blocks.join("\n\n"))
    }

    fn block(&self, doc: &ScoredDocument) -> String {
        format!(
            "Document: {}\nCategory: {}\nPriority: {}\nContent: {}",
            doc.document.title,
            doc.document.category,
            doc.priority_score,
            excerpt(&doc.document.content, self.excerpt_chars)
        )
    }
}

/// First `max_chars` characters of `content`, with an ellipsis when cut.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &content[..byte_idx]),
        None => content.to_string(),
    }
}
