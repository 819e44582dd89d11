//! Priority scorer.

use curator_core::{Document, ScoredDocument, UseCaseProfile};

/// Base priority: explicit per-use-case value, else category default, else 0.
pub fn resolve_priority(doc: &Document, profile: &UseCaseProfile) -> i64 {
    let explicit = if profile.priority_key.is_empty() {
        None
    } else {
        doc.priority_for(&profile.priority_key)
    };
    explicit
        .or_else(|| profile.default_priority(&doc.category))
        .unwrap_or(0)
}

/// Score one document under a profile. Pure; documents are never excluded here.
/// Totals saturate, so author-supplied extremes cannot overflow.
pub fn score(doc: Document, relevant_categories: &[String], profile: &UseCaseProfile) -> ScoredDocument {
    let priority_score = resolve_priority(&doc, profile);
    let is_relevant = relevant_categories.iter().any(|c| *c == doc.category);
    let relevance_score = if is_relevant { profile.relevance_bonus } else { 0 };
    let usage_bonus = if !profile.usage_bonus_field.is_empty() && doc.usage_flag(&profile.usage_bonus_field) {
        profile.usage_bonus
    } else {
        0
    };

    ScoredDocument {
        total_score: priority_score.saturating_add(relevance_score).saturating_add(usage_bonus),
        document: doc,
        relevance_score,
        priority_score,
        usage_bonus,
        is_relevant,
    }
}

/// Score a whole corpus snapshot, keeping input order.
pub fn score_all(
    docs: Vec<Document>,
    relevant_categories: &[String],
    profile: &UseCaseProfile,
) -> Vec<ScoredDocument> {
    docs.into_iter()
        .map(|doc| score(doc, relevant_categories, profile))
        .collect()
}
