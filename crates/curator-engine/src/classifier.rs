//! Category classifier — free text to relevant categories.
//!
//! Matching is plain substring containment on the lower-cased text, so
//! "cultural" matches inside "multicultural" and "art" inside "chart".
//! Selection outcomes depend on those semantics; keep them.

use curator_core::UseCaseProfile;
use curator_core::profile::CategoryRule;

/// How many of a rule's keywords occur in already lower-cased `text`.
pub fn keyword_matches(text: &str, rule: &CategoryRule) -> usize {
    rule.keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && text.contains(k.as_str()))
        .count()
}

/// Relevant categories for `query_text`, in table order.
///
/// A category is relevant when at least one of its keywords occurs in the
/// text. When none is, the profile's fallback categories are returned, so
/// the result is never empty for a valid profile.
pub fn classify(query_text: &str, profile: &UseCaseProfile) -> Vec<String> {
    let text = query_text.to_lowercase();
    let mut relevant: Vec<String> = Vec::new();

    for rule in &profile.categories {
        let matches = keyword_matches(&text, rule);
        if matches > 0 && !relevant.contains(&rule.category) {
            tracing::debug!("Category {} relevant ({} keyword matches)", rule.category, matches);
            relevant.push(rule.category.clone());
        }
    }

    if relevant.is_empty() {
        for category in &profile.fallback_categories {
            if !relevant.contains(category) {
                relevant.push(category.clone());
            }
        }
        tracing::debug!("No keyword matches, using fallback categories: {}", relevant.join(", "));
    }

    relevant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UseCaseProfile {
        let mut p = UseCaseProfile::named("test");
        p.categories = vec![
            CategoryRule::new("cultural-context", &["cultural", "family", "heritage"]),
            CategoryRule::new("evidence-handling", &["evidence", "example"]),
            CategoryRule::new("presentation", &["art", "visual"]),
            CategoryRule::new("heritage-dup", &["heritage"]),
        ];
        p.fallback_categories = vec!["best-practices".into(), "examples".into(), "best-practices".into()];
        p
    }

    #[test]
    fn test_keyword_hit_marks_category() {
        let cats = classify("She talks about her FAMILY a lot", &profile());
        assert_eq!(cats, vec!["cultural-context"]);
    }

    #[test]
    fn test_table_order_not_query_order() {
        let cats = classify("an example of family traditions", &profile());
        assert_eq!(cats, vec!["cultural-context", "evidence-handling"]);
    }

    #[test]
    fn test_substring_semantics_preserved() {
        // "multicultural" contains "cultural"; "chart" contains "art".
        let cats = classify("multicultural chart", &profile());
        assert_eq!(cats, vec!["cultural-context", "presentation"]);
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let cats = classify("differentiated math lesson", &profile());
        assert_eq!(cats, vec!["best-practices", "examples"]);
    }

    #[test]
    fn test_empty_query_never_empty() {
        assert!(!classify("", &profile()).is_empty());
    }

    #[test]
    fn test_blank_keywords_ignored() {
        let mut p = profile();
        p.categories.push(CategoryRule::new("style", &["", "   "]));
        assert_eq!(classify("nothing here", &p), vec!["best-practices", "examples"]);
    }

    #[test]
    fn test_keyword_matches_counts_each_keyword_once() {
        let rule = CategoryRule::new("cultural-context", &["Cultural", "family"]);
        assert_eq!(keyword_matches("cultural cultural family", &rule), 2);
        assert_eq!(keyword_matches("nothing", &rule), 0);
    }

    #[test]
    fn test_deterministic() {
        let p = profile();
        let q = "heritage evidence and visual art";
        assert_eq!(classify(q, &p), classify(q, &p));
        assert_eq!(
            classify(q, &p),
            vec!["cultural-context", "evidence-handling", "presentation", "heritage-dup"]
        );
    }
}
