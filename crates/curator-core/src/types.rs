//! Reference documents and the transient records produced while ranking them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Which use case a document may be retrieved for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    #[default]
    Both,
    LessonPlan,
    Profile,
    /// Unrecognised labels land here so they stay eligible everywhere.
    #[serde(other)]
    General,
}

impl DocumentType {
    /// Whether a document of this type passes a store-side eligibility filter.
    ///
    /// `lesson-plan` and `profile` are restricted to their own use case,
    /// `both` and `general` pass every filter, and no filter admits all.
    pub fn is_eligible_for(self, filter: Option<DocumentType>) -> bool {
        match filter {
            None => true,
            Some(wanted) => match self {
                Self::Both | Self::General => true,
                own => own == wanted,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LessonPlan => "lesson-plan",
            Self::Profile => "profile",
            Self::General => "general",
            Self::Both => "both",
        }
    }

    /// Types admitted by `filter`, in a fixed order.
    pub fn eligible_types(filter: Option<DocumentType>) -> Vec<DocumentType> {
        [Self::LessonPlan, Self::Profile, Self::General, Self::Both]
            .into_iter()
            .filter(|t| t.is_eligible_for(filter))
            .collect()
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "lesson-plan" | "lessonplan" => Ok(Self::LessonPlan),
            "profile" => Ok(Self::Profile),
            "general" => Ok(Self::General),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown document type '{other}'")),
        }
    }
}

/// A reference knowledge item, as authored by the admin workflow.
///
/// Every field defaults so a partially filled record still loads; missing
/// category or priority data only lowers a document's rank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub document_type: DocumentType,
    /// Applicability flags keyed by consumer (`lessonPlans`, `profiles`, `examples`, ...).
    #[serde(default, deserialize_with = "lenient_flags")]
    pub usage_tags: BTreeMap<String, bool>,
    /// Author-assigned priority per use case (`lessonPlans`, `profiles`, ...).
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: BTreeMap<String, i64>,
}

impl Document {
    pub fn new(id: &str, title: &str, category: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            content: content.to_string(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn with_priority(mut self, key: &str, value: i64) -> Self {
        self.priority.insert(key.to_string(), value);
        self
    }

    pub fn with_usage(mut self, key: &str, flag: bool) -> Self {
        self.usage_tags.insert(key.to_string(), flag);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Explicit priority for a use case, if the author set one.
    pub fn priority_for(&self, key: &str) -> Option<i64> {
        self.priority.get(key).copied()
    }

    pub fn usage_flag(&self, key: &str) -> bool {
        self.usage_tags.get(key).copied().unwrap_or(false)
    }
}

/// Priority objects keep numeric entries; legacy labels ("medium") and other
/// shapes resolve to "no explicit priority".
fn lenient_priority<'de, D>(deserializer: D) -> Result<BTreeMap<String, i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, v)| {
            let n = v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64))?;
            Some((key, n))
        })
        .collect())
}

fn lenient_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, v)| v.as_bool().map(|b| (key, b)))
        .collect())
}

/// A document plus the score breakdown computed for one use case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDocument {
    pub document: Document,
    /// Category-match contribution.
    pub relevance_score: i64,
    /// Resolved base priority (explicit, else category default, else 0).
    pub priority_score: i64,
    pub usage_bonus: i64,
    pub total_score: i64,
    /// Whether the document's category is in the relevant-category set.
    pub is_relevant: bool,
}

impl ScoredDocument {
    pub fn id(&self) -> &str {
        &self.document.id
    }

    pub fn category(&self) -> &str {
        &self.document.category
    }
}

/// Outcome of one selection run, kept for diagnostics and tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub use_case: String,
    /// Relevant categories in discovery order.
    pub relevant_categories: Vec<String>,
    /// Selected documents, at most the profile's output bound.
    pub documents: Vec<ScoredDocument>,
    /// Size of the corpus snapshot the selection was drawn from.
    pub corpus_size: usize,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.id()).collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.category()).collect()
    }

    pub fn distinct_categories(&self) -> usize {
        self.documents
            .iter()
            .map(|d| d.category())
            .collect::<HashSet<_>>()
            .len()
    }
}
