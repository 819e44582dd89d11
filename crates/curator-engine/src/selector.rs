//! Diversity-aware selector.
//!
//! Two passes over the ranked list, in this order:
//! 1. one representative (the best-scoring) per relevant category, in
//!    relevant-category order, topped up with new categories while the
//!    profile's diversity minimum is unmet;
//! 2. the remaining slots by global rank.
//!
//! Pass order decides which documents win ties, so it is part of the contract.

use std::collections::HashSet;

use curator_core::{ScoredDocument, UseCaseProfile};

/// Sort by total score, descending. Stable: equal scores keep input order.
pub fn rank(mut scored: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
    scored.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    scored
}

/// Tracks picks by position and by id so no document is selected twice.
struct Picks<'a> {
    ranked: &'a [ScoredDocument],
    order: Vec<usize>,
    positions: HashSet<usize>,
    ids: HashSet<&'a str>,
    categories: HashSet<&'a str>,
}

impl<'a> Picks<'a> {
    fn new(ranked: &'a [ScoredDocument]) -> Self {
        Self {
            ranked,
            order: Vec::new(),
            positions: HashSet::new(),
            ids: HashSet::new(),
            categories: HashSet::new(),
        }
    }

    fn is_taken(&self, idx: usize) -> bool {
        let id = self.ranked[idx].id();
        self.positions.contains(&idx) || (!id.is_empty() && self.ids.contains(id))
    }

    fn take(&mut self, idx: usize) {
        let doc = &self.ranked[idx];
        self.order.push(idx);
        self.positions.insert(idx);
        if !doc.id().is_empty() {
            self.ids.insert(doc.id());
        }
        self.categories.insert(doc.category());
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Positions (into `ranked`) of the chosen documents, in pick order.
fn pick_order(ranked: &[ScoredDocument], relevant_categories: &[String], profile: &UseCaseProfile) -> Vec<usize> {
    let bound = profile.output_bound;
    let mut picks = Picks::new(ranked);

    // First pass: best document of each relevant category.
    let mut visited: HashSet<&str> = HashSet::new();
    for category in relevant_categories {
        if picks.len() >= bound {
            break;
        }
        if !visited.insert(category.as_str()) {
            continue;
        }
        let best = (0..ranked.len())
            .find(|&i| ranked[i].category() == category.as_str() && !picks.is_taken(i));
        if let Some(idx) = best {
            picks.take(idx);
        }
    }

    // Diversity top-up: best document of each unrepresented category.
    if let Some(min) = profile.min_category_diversity {
        for idx in 0..ranked.len() {
            if picks.len() >= bound || picks.categories.len() >= min {
                break;
            }
            if !picks.is_taken(idx) && !picks.categories.contains(ranked[idx].category()) {
                picks.take(idx);
            }
        }
    }

    // Second pass: fill by global rank.
    for idx in 0..ranked.len() {
        if picks.len() >= bound {
            break;
        }
        if !picks.is_taken(idx) {
            picks.take(idx);
        }
    }

    let mut order = picks.order;
    order.truncate(bound);
    order
}

/// Choose at most `profile.output_bound` documents.
///
/// Every relevant category with at least one document is represented,
/// provided the bound is not smaller than the number of relevant
/// categories; otherwise later categories are dropped. Empty input yields
/// an empty selection.
pub fn select(
    scored: Vec<ScoredDocument>,
    relevant_categories: &[String],
    profile: &UseCaseProfile,
) -> Vec<ScoredDocument> {
    let ranked = rank(scored);
    let order = pick_order(&ranked, relevant_categories, profile);

    let mut slots: Vec<Option<ScoredDocument>> = ranked.into_iter().map(Some).collect();
    order.into_iter().filter_map(|idx| slots[idx].take()).collect()
}
