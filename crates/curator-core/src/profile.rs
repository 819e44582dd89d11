//! Use-case profiles — the tuning surface shared by classifier, scorer and selector.
//!
//! A profile is plain data: adding a use case means adding a profile (in code
//! or in `config.toml`), never touching the ranking logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CuratorError, Result};
use crate::types::DocumentType;

/// Keywords that make one category relevant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Per-consumer configuration for the relevance engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UseCaseProfile {
    /// Use-case name callers select the profile by (e.g. "lesson-plan").
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Store-side eligibility filter (None = whole corpus).
    #[serde(default)]
    pub document_type: Option<DocumentType>,
    /// Key into `Document::priority` holding this use case's explicit priority.
    #[serde(default)]
    pub priority_key: String,
    /// `Document::usage_tags` flag that earns the usage bonus.
    #[serde(default)]
    pub usage_bonus_field: String,
    /// Category → trigger keywords, in discovery order.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
    /// Categories assumed relevant when no keyword matches.
    #[serde(default)]
    pub fallback_categories: Vec<String>,
    /// Category → priority used when a document has no explicit entry.
    #[serde(default)]
    pub default_priorities: BTreeMap<String, i64>,
    #[serde(default = "default_relevance_bonus")]
    pub relevance_bonus: i64,
    #[serde(default = "default_usage_bonus")]
    pub usage_bonus: i64,
    #[serde(default = "default_output_bound")]
    pub output_bound: usize,
    #[serde(default)]
    pub min_category_diversity: Option<usize>,
    /// Content characters shown per document in the rendered context.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    #[serde(default = "default_header")]
    pub header: String,
    /// Static guidance returned when the corpus is empty or unavailable.
    #[serde(default)]
    pub default_context: String,
}

fn default_relevance_bonus() -> i64 { 10 }
fn default_usage_bonus() -> i64 { 3 }
fn default_output_bound() -> usize { 5 }
fn default_excerpt_chars() -> usize { 500 }
fn default_header() -> String { "Reference Documents:".into() }

impl UseCaseProfile {
    /// An empty profile with default bonuses and bound.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            document_type: None,
            priority_key: String::new(),
            usage_bonus_field: String::new(),
            categories: Vec::new(),
            fallback_categories: Vec::new(),
            default_priorities: BTreeMap::new(),
            relevance_bonus: default_relevance_bonus(),
            usage_bonus: default_usage_bonus(),
            output_bound: default_output_bound(),
            min_category_diversity: None,
            excerpt_chars: default_excerpt_chars(),
            header: default_header(),
            default_context: String::new(),
        }
    }

    /// Parse a single profile from TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        let profile: Self = toml::from_str(content)
            .map_err(|e| CuratorError::Config(format!("Failed to parse profile: {e}")))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reject profiles the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CuratorError::Config("profile name must not be empty".into()));
        }
        if self.output_bound == 0 {
            return Err(CuratorError::Config(format!(
                "profile '{}': output_bound must be at least 1",
                self.name
            )));
        }
        if self.fallback_categories.is_empty() {
            return Err(CuratorError::Config(format!(
                "profile '{}': fallback_categories must not be empty",
                self.name
            )));
        }
        if let Some(min) = self.min_category_diversity {
            if min > self.output_bound {
                tracing::warn!(
                    "profile '{}': min_category_diversity {} exceeds output_bound {}",
                    self.name,
                    min,
                    self.output_bound
                );
            }
        }
        Ok(())
    }

    /// Category default priority, if configured.
    pub fn default_priority(&self, category: &str) -> Option<i64> {
        self.default_priorities.get(category).copied()
    }
}
