//! Relevance engine — the entry point both generation call sites use.

use std::sync::Arc;

use curator_core::{
    CuratorError, Document, DocumentStore, Result, SelectionResult, StructuredCriteria, UseCaseProfile,
};

use crate::classifier::classify;
use crate::formatter::ContextFormatter;
use crate::profiles::{LESSON_PLAN, PROFILE_SUMMARY, ProfileRegistry};
use crate::query::{LessonPlanRequest, profile_summary_query};
use crate::scorer::score_all;
use crate::selector::select;

/// Shared engine: one store, many use-case profiles.
///
/// Stateless per call. Every invocation fetches a fresh corpus snapshot,
/// so concurrent calls never observe each other.
pub struct RelevanceEngine {
    store: Arc<dyn DocumentStore>,
    profiles: ProfileRegistry,
}

impl RelevanceEngine {
    /// Engine with the built-in profiles.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_profiles(store, ProfileRegistry::with_defaults())
    }

    pub fn with_profiles(store: Arc<dyn DocumentStore>, profiles: ProfileRegistry) -> Self {
        tracing::info!(
            "🧭 Relevance engine ready: store={}, {} profiles",
            store.name(),
            profiles.count()
        );
        Self { store, profiles }
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// Formatted context for prompt injection. Never fails.
    ///
    /// - unknown use case → empty string
    /// - store error or empty corpus → the profile's default context
    /// - otherwise → header plus one block per selected document
    pub async fn get_relevant_context(
        &self,
        query: &str,
        use_case: &str,
        criteria: Option<&StructuredCriteria>,
    ) -> String {
        let Some(profile) = self.profiles.get(use_case) else {
            tracing::warn!("Unknown use case '{}', no context injected", use_case);
            return String::new();
        };

        let docs = match self.store.fetch_documents(profile.document_type).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!("⚠️ Document fetch from {} failed: {e}, using default context", self.store.name());
                return profile.default_context.clone();
            }
        };
        if docs.is_empty() {
            tracing::debug!("No documents for {}, using default context", use_case);
            return profile.default_context.clone();
        }

        let result = select_documents(docs, query, profile, criteria);
        ContextFormatter::for_profile(profile).format(&result.documents)
    }

    /// Diagnostic variant: the full selection, with errors propagated.
    pub async fn explain(
        &self,
        query: &str,
        use_case: &str,
        criteria: Option<&StructuredCriteria>,
    ) -> Result<SelectionResult> {
        let profile = self
            .profiles
            .get(use_case)
            .ok_or_else(|| CuratorError::UnknownUseCase(use_case.to_string()))?;
        let docs = self.store.fetch_documents(profile.document_type).await?;
        Ok(select_documents(docs, query, profile, criteria))
    }

    /// Context for a lesson-plan request; criteria names become signals.
    pub async fn lesson_plan_context(&self, request: &LessonPlanRequest) -> String {
        let criteria = request.criteria();
        self.get_relevant_context(&request.query_text(), LESSON_PLAN, Some(&criteria))
            .await
    }

    /// Context for a profile summary built from the wizard's answers.
    pub async fn profile_summary_context<S: AsRef<str> + Sync>(&self, answers: &[S]) -> String {
        self.get_relevant_context(&profile_summary_query(answers), PROFILE_SUMMARY, None)
            .await
    }
}

/// Classify, score and select over an already-fetched snapshot.
pub fn select_documents(
    docs: Vec<Document>,
    query: &str,
    profile: &UseCaseProfile,
    criteria: Option<&StructuredCriteria>,
) -> SelectionResult {
    let corpus_size = docs.len();
    let text = match criteria.map(|c| c.signals()) {
        Some(signals) if !signals.is_empty() => format!("{query} {}", signals.join(" ")),
        _ => query.to_string(),
    };

    let relevant = classify(&text, profile);
    let scored = score_all(docs, &relevant, profile);
    let documents = select(scored, &relevant, profile);

    tracing::debug!(
        "📚 {}: {} documents selected from {} total",
        profile.name,
        documents.len(),
        corpus_size
    );
    tracing::debug!("Relevant categories: {}", relevant.join(", "));
    tracing::debug!(
        "Selected categories: {}",
        documents.iter().map(|d| d.category()).collect::<Vec<_>>().join(", ")
    );

    SelectionResult {
        use_case: profile.name.clone(),
        relevant_categories: relevant,
        documents,
        corpus_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use curator_core::profile::CategoryRule;
    use curator_core::{CalesCriteria, DocumentType};

    struct FixtureStore {
        docs: Vec<Document>,
    }

    #[async_trait]
    impl DocumentStore for FixtureStore {
        fn name(&self) -> &str {
            "fixture"
        }

        async fn fetch_documents(&self, filter: Option<DocumentType>) -> Result<Vec<Document>> {
            Ok(self
                .docs
                .iter()
                .filter(|d| d.document_type.is_eligible_for(filter))
                .cloned()
                .collect())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_documents(&self, _filter: Option<DocumentType>) -> Result<Vec<Document>> {
            Err(CuratorError::Store("connection refused".into()))
        }
    }

    fn engine(docs: Vec<Document>) -> RelevanceEngine {
        RelevanceEngine::new(Arc::new(FixtureStore { docs }))
    }

    fn three_docs() -> Vec<Document> {
        vec![
            Document::new("1", "Differentiation Guide", "best-practices", "Guide.").with_priority("lessonPlans", 10),
            Document::new("2", "Sample Lesson", "examples", "Sample.")
                .with_priority("lessonPlans", 9)
                .with_usage("lessonPlans", true),
            Document::new("3", "Study", "research", "Study.").with_priority("lessonPlans", 1),
        ]
    }

    #[test]
    fn test_fallback_only_profile_orders_by_priority() {
        // Toy profile: no keyword fires, fallback categories apply.
        let mut profile = UseCaseProfile::named("toy");
        profile.priority_key = "lessonPlans".into();
        profile.usage_bonus_field = "lessonPlans".into();
        profile.output_bound = 6;
        profile.categories = vec![CategoryRule::new("best-practices", &["pedagogy"])];
        profile.fallback_categories = vec!["best-practices".into(), "examples".into()];

        let result = select_documents(three_docs(), "differentiated math lesson", &profile, None);
        assert_eq!(result.relevant_categories, vec!["best-practices", "examples"]);
        assert_eq!(result.ids(), vec!["1", "2", "3"]);
        assert_eq!(result.corpus_size, 3);
    }

    #[tokio::test]
    async fn test_lesson_plan_three_documents() {
        let engine = engine(three_docs());
        let result = engine
            .explain("differentiated math lesson", LESSON_PLAN, None)
            .await
            .unwrap();
        assert_eq!(result.ids(), vec!["1", "2", "3"]);

        let text = engine
            .get_relevant_context("differentiated math lesson", LESSON_PLAN, None)
            .await;
        assert!(text.starts_with("Reference Documents (Optimized for Lesson Planning):\n"));
        assert!(text.contains("Document: Differentiation Guide\nCategory: best-practices\nPriority: 10"));
        assert!(text.find("Sample Lesson").unwrap() < text.find("Study").unwrap());
    }

    #[tokio::test]
    async fn test_deterministic() {
        let engine = engine(three_docs());
        let a = engine.get_relevant_context("cultural reading lesson", LESSON_PLAN, None).await;
        let b = engine.get_relevant_context("cultural reading lesson", LESSON_PLAN, None).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_empty_corpus_returns_default_context() {
        let engine = engine(vec![]);
        let text = engine.get_relevant_context("anything", LESSON_PLAN, None).await;
        assert!(text.starts_with("Default Lesson Planning Context:"));

        let summary = engine.get_relevant_context("anything", PROFILE_SUMMARY, None).await;
        assert!(summary.starts_with("Default Profile Summary Context:"));
    }

    #[tokio::test]
    async fn test_store_error_degrades_to_default_context() {
        let engine = RelevanceEngine::new(Arc::new(FailingStore));
        let text = engine.get_relevant_context("math", LESSON_PLAN, None).await;
        assert!(text.starts_with("Default Lesson Planning Context:"));

        let err = engine.explain("math", LESSON_PLAN, None).await.unwrap_err();
        assert!(matches!(err, CuratorError::Store(_)));
    }

    #[tokio::test]
    async fn test_unknown_use_case() {
        let engine = engine(three_docs());
        assert_eq!(engine.get_relevant_context("math", "parent-letter", None).await, "");
        let err = engine.explain("math", "parent-letter", None).await.unwrap_err();
        assert!(matches!(err, CuratorError::UnknownUseCase(_)));
    }

    #[tokio::test]
    async fn test_type_filter_excludes_other_use_case() {
        let docs = vec![
            Document::new("p", "Portrait Guide", "black-genius-elements", "").with_type(DocumentType::Profile),
            Document::new("l", "Lesson Guide", "best-practices", "").with_type(DocumentType::LessonPlan),
            Document::new("b", "Shared Guide", "examples", "").with_type(DocumentType::Both),
            Document::new("g", "General Note", "research", "").with_type(DocumentType::General),
        ];
        let engine = engine(docs);
        let result = engine.explain("lesson", LESSON_PLAN, None).await.unwrap();
        assert_eq!(result.corpus_size, 3);
        assert!(!result.ids().contains(&"p"));

        let result = engine.explain("identity", PROFILE_SUMMARY, None).await.unwrap();
        assert!(!result.ids().contains(&"l"));
    }

    #[tokio::test]
    async fn test_criteria_add_classifier_signals() {
        let docs = vec![
            Document::new("1", "Guide", "best-practices", ""),
            Document::new("2", "Justice Unit", "black-genius-elements", ""),
        ];
        let engine = engine(docs);
        let without = engine.explain("3rd grade math", LESSON_PLAN, None).await.unwrap();
        assert!(!without.relevant_categories.contains(&"black-genius-elements".to_string()));

        let criteria = StructuredCriteria::from_framework(CalesCriteria::from_names(&["multiculturalNavigation"]));
        let with = engine
            .explain("3rd grade math", LESSON_PLAN, Some(&criteria))
            .await
            .unwrap();
        assert!(with.relevant_categories.contains(&"black-genius-elements".to_string()));
        assert!(with.relevant_categories.contains(&"best-practices".to_string()));
    }

    #[tokio::test]
    async fn test_ten_documents_five_categories() {
        let categories = ["best-practices", "examples", "processing-framework", "black-genius-elements", "evidence-handling"];
        let mut docs = Vec::new();
        for (i, cat) in categories.iter().enumerate() {
            docs.push(Document::new(&format!("{cat}-a"), "A", cat, ""));
            docs.push(Document::new(&format!("{cat}-b"), "B", cat, "").with_priority("lessonPlans", i as i64));
        }
        let engine = engine(docs);
        let result = engine
            .explain("lesson on cultural evidence", LESSON_PLAN, None)
            .await
            .unwrap();
        for cat in categories {
            assert!(result.relevant_categories.contains(&cat.to_string()));
        }
        assert_eq!(result.len(), 6);
        assert!(result.distinct_categories() >= 4);
        let unique: std::collections::HashSet<_> = result.ids().into_iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[tokio::test]
    async fn test_lesson_plan_request_convenience() {
        let engine = engine(three_docs());
        let request = LessonPlanRequest {
            grade: "3rd".into(),
            subject: "math".into(),
            ..LessonPlanRequest::default()
        };
        let text = engine.lesson_plan_context(&request).await;
        assert!(text.contains("Differentiation Guide"));

        let summary = engine.profile_summary_context(&["She loves her family"]).await;
        assert!(summary.starts_with("Reference Documents (Prioritized by Relevance):"));
    }
}
