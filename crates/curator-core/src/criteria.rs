//! Structured criteria — explicit framework flags that add classifier signals.
//!
//! CALES (Culturally Affirming Learning Environment) flags selected in the
//! lesson-plan form each translate to a handful of keyword signals. The
//! signals are appended to the query text; they never bypass classification.

use serde::{Deserialize, Serialize};

/// The eleven CALES framework flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CalesCriteria {
    pub can_do_attitude: bool,
    pub interest_awareness: bool,
    pub multicultural_navigation: bool,
    pub racial_pride: bool,
    pub selective_trust: bool,
    pub social_justice: bool,
    pub holistic_well_being: bool,
    pub clarity: bool,
    pub accessibility: bool,
    pub credibility: bool,
    pub outcomes: bool,
}

impl CalesCriteria {
    /// (camelCase name, flag, keyword signals) for every flag.
    fn table(&self) -> [(&'static str, bool, &'static [&'static str]); 11] {
        [
            ("canDoAttitude", self.can_do_attitude, &["growth mindset", "capabilities", "belief"]),
            ("interestAwareness", self.interest_awareness, &["interests", "experiences", "personal"]),
            ("multiculturalNavigation", self.multicultural_navigation, &["cultural", "diverse", "contexts"]),
            ("racialPride", self.racial_pride, &["racial", "cultural identities", "affirm"]),
            ("selectiveTrust", self.selective_trust, &["trusting relationships", "critical thinking"]),
            ("socialJustice", self.social_justice, &["social justice", "equity", "fairness"]),
            ("holisticWellBeing", self.holistic_well_being, &["emotional", "social", "development"]),
            ("clarity", self.clarity, &["clear", "understandable", "expectations"]),
            ("accessibility", self.accessibility, &["accessible", "ability", "inclusive"]),
            ("credibility", self.credibility, &["trust", "authenticity", "credible"]),
            ("outcomes", self.outcomes, &["outcomes", "success", "meaningful"]),
        ]
    }

    fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let flag = match key.as_str() {
            "candoattitude" => &mut self.can_do_attitude,
            "interestawareness" => &mut self.interest_awareness,
            "multiculturalnavigation" => &mut self.multicultural_navigation,
            "racialpride" => &mut self.racial_pride,
            "selectivetrust" => &mut self.selective_trust,
            "socialjustice" => &mut self.social_justice,
            "holisticwellbeing" => &mut self.holistic_well_being,
            "clarity" => &mut self.clarity,
            "accessibility" => &mut self.accessibility,
            "credibility" => &mut self.credibility,
            "outcomes" => &mut self.outcomes,
            _ => return None,
        };
        Some(flag)
    }

    /// Build from flag names in camelCase, snake_case or kebab-case.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut criteria = Self::default();
        for name in names {
            let name = name.as_ref();
            match criteria.flag_mut(name) {
                Some(flag) => *flag = true,
                None => tracing::warn!("Ignoring unknown criterion '{}'", name),
            }
        }
        criteria
    }

    /// Names of the flags that are set, in framework order.
    pub fn selected_names(&self) -> Vec<&'static str> {
        self.table()
            .into_iter()
            .filter(|(_, set, _)| *set)
            .map(|(name, _, _)| name)
            .collect()
    }

    /// Keyword signals contributed by the set flags.
    pub fn keywords(&self) -> Vec<&'static str> {
        self.table()
            .into_iter()
            .filter(|(_, set, _)| *set)
            .flat_map(|(_, _, words)| words.iter().copied())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_names().is_empty()
    }
}

/// Optional structured input accompanying a free-text query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredCriteria {
    pub framework: CalesCriteria,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub extra_terms: Vec<String>,
}

impl StructuredCriteria {
    pub fn from_framework(framework: CalesCriteria) -> Self {
        Self {
            framework,
            ..Self::default()
        }
    }

    /// All keyword-equivalent signals: framework keywords, subject, grade, extras.
    pub fn signals(&self) -> Vec<String> {
        let mut signals: Vec<String> = self
            .framework
            .keywords()
            .into_iter()
            .map(String::from)
            .collect();
        signals.extend(self.subject.iter().cloned());
        signals.extend(self.grade.iter().cloned());
        signals.extend(self.extra_terms.iter().cloned());
        signals.retain(|s| !s.trim().is_empty());
        signals
    }
}
