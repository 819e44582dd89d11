//! Profile registry — the built-in use cases plus anything configured.

use std::collections::{BTreeMap, HashMap};

use curator_core::profile::CategoryRule;
use curator_core::{CuratorConfig, DocumentType, UseCaseProfile};

pub const PROFILE_SUMMARY: &str = "profile-summary";
pub const LESSON_PLAN: &str = "lesson-plan";

/// Registry of all available use-case profiles.
pub struct ProfileRegistry {
    profiles: HashMap<String, UseCaseProfile>,
}

impl ProfileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Create registry with the built-in profile-summary and lesson-plan profiles.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        for profile in builtin_profiles() {
            reg.register(profile);
        }
        reg
    }

    /// Built-ins overlaid with the profiles from `config`.
    pub fn from_config(config: &CuratorConfig) -> Self {
        let mut reg = Self::with_defaults();
        for profile in &config.profiles {
            reg.register(profile.clone());
        }
        reg
    }

    /// Register a profile, replacing any profile with the same name.
    pub fn register(&mut self, profile: UseCaseProfile) {
        let name = profile.name.clone();
        if self.profiles.insert(name.clone(), profile).is_some() {
            tracing::info!("🔁 Replaced profile: {}", name);
        } else {
            tracing::debug!("📋 Registered profile: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&UseCaseProfile> {
        self.profiles.get(name)
    }

    /// List all profiles, sorted by name.
    pub fn list(&self) -> Vec<&UseCaseProfile> {
        let mut profiles: Vec<_> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }

    pub fn count(&self) -> usize {
        self.profiles.len()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn priorities(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Child-portrait summaries: identity, cultural and evidence content first.
pub fn profile_summary() -> UseCaseProfile {
    UseCaseProfile {
        name: PROFILE_SUMMARY.into(),
        description: "Strengths-forward student profile summaries".into(),
        document_type: Some(DocumentType::Profile),
        priority_key: "profiles".into(),
        usage_bonus_field: "profiles".into(),
        categories: vec![
            CategoryRule::new(
                "black-genius-elements",
                &["black", "genius", "identity", "racial", "culture", "heritage", "pride", "african", "diaspora"],
            ),
            CategoryRule::new(
                "content-guidelines",
                &["include", "exclude", "focus", "emphasize", "highlight", "describe", "content", "guidelines"],
            ),
            CategoryRule::new(
                "processing-framework",
                &["analyze", "interpret", "understand", "context", "meaning", "framework", "process"],
            ),
            CategoryRule::new(
                "cultural-context",
                &["cultural", "background", "family", "community", "tradition", "values", "heritage", "roots"],
            ),
            CategoryRule::new(
                "evidence-handling",
                &["evidence", "proof", "example", "instance", "demonstrate", "show", "indicate", "suggest"],
            ),
            CategoryRule::new("formatting", &["format", "structure", "organize", "layout", "presentation", "style"]),
            CategoryRule::new("style", &["tone", "voice", "writing", "language", "communication", "expression"]),
            CategoryRule::new("technical-format", &["json", "schema", "field", "technical", "format", "structure"]),
            CategoryRule::new("presentation", &["readable", "clear", "visual", "presentation", "display"]),
        ],
        fallback_categories: names(&["black-genius-elements", "content-guidelines", "processing-framework"]),
        default_priorities: priorities(&[
            ("black-genius-elements", 10),
            ("content-guidelines", 9),
            ("processing-framework", 8),
            ("cultural-context", 7),
            ("evidence-handling", 6),
            ("examples", 8),
            ("best-practices", 7),
            ("technical-format", 5),
            ("formatting", 4),
            ("style", 3),
            ("presentation", 2),
            ("research", 1),
        ]),
        relevance_bonus: 10,
        usage_bonus: 3,
        output_bound: 5,
        min_category_diversity: None,
        excerpt_chars: 500,
        header: "Reference Documents (Prioritized by Relevance):".into(),
        default_context: PROFILE_SUMMARY_DEFAULT_CONTEXT.trim().into(),
    }
}

/// Lesson planning: pedagogy, best practice and example content first.
pub fn lesson_plan() -> UseCaseProfile {
    const LESSON: [&str; 3] = ["lesson", "activity", "instruction"];
    const CULTURE: [&str; 3] = ["cultural", "black", "genius"];
    const LITERACY: [&str; 2] = ["language", "reading"];
    const EARLY: [&str; 2] = ["elementary", "primary"];
    const UPPER: [&str; 2] = ["middle", "secondary"];
    const STEM: [&str; 2] = ["math", "science"];

    UseCaseProfile {
        name: LESSON_PLAN.into(),
        description: "CALES-aligned lesson plan generation".into(),
        document_type: Some(DocumentType::LessonPlan),
        priority_key: "lessonPlans".into(),
        usage_bonus_field: "lessonPlans".into(),
        categories: vec![
            CategoryRule::new("best-practices", &[&LESSON[..], &EARLY[..], &STEM[..]].concat()),
            CategoryRule::new("examples", &[&LESSON[..], &EARLY[..], &STEM[..]].concat()),
            CategoryRule::new("processing-framework", &[&LESSON[..], &UPPER[..]].concat()),
            CategoryRule::new("black-genius-elements", &[&CULTURE[..], &LITERACY[..]].concat()),
            CategoryRule::new("cultural-context", &[&CULTURE[..], &LITERACY[..]].concat()),
            CategoryRule::new("evidence-handling", &["assessment", "evaluation", "evidence"]),
            CategoryRule::new("content-guidelines", &UPPER),
        ],
        fallback_categories: names(&["best-practices", "examples", "processing-framework", "black-genius-elements"]),
        default_priorities: priorities(&[
            ("best-practices", 10),
            ("examples", 9),
            ("processing-framework", 8),
            ("content-guidelines", 7),
            ("black-genius-elements", 8),
            ("cultural-context", 7),
            ("evidence-handling", 6),
            ("presentation", 5),
            ("style", 4),
            ("formatting", 3),
            ("technical-format", 2),
            ("research", 1),
        ]),
        relevance_bonus: 10,
        usage_bonus: 3,
        output_bound: 6,
        min_category_diversity: Some(4),
        excerpt_chars: 400,
        header: "Reference Documents (Optimized for Lesson Planning):".into(),
        default_context: LESSON_PLAN_DEFAULT_CONTEXT.trim().into(),
    }
}

fn builtin_profiles() -> Vec<UseCaseProfile> {
    vec![profile_summary(), lesson_plan()]
}

const PROFILE_SUMMARY_DEFAULT_CONTEXT: &str = r#"
Default Profile Summary Context:

Black Genius Elements:
1. INTEREST AWARENESS - What the child is drawn to and curious about
2. CAN-DO ATTITUDE - Persistence, confidence and help-seeking
3. RACIAL IDENTITY - Signals of racial and cultural pride
4. MULTICULTURAL NAVIGATION - Moving between home, school and community cultures
5. SELECTIVE TRUST - The adults and peers the child trusts
6. SOCIAL JUSTICE - Include only when the answers show evidence of it

Key Principles:
- Describe the child only; do not recommend strategies or next steps
- Lead with strengths and ground every statement in the caregiver's answers
- Use clear, affirming language at a 7th-9th grade reading level
"#;

const LESSON_PLAN_DEFAULT_CONTEXT: &str = r#"
Default Lesson Planning Context:

CALES Framework for Lesson Planning:
1. CAN-DO ATTITUDE - Foster growth mindset and belief in capabilities
2. INTEREST AWARENESS - Connect learning to personal interests
3. MULTICULTURAL NAVIGATION - Navigate diverse cultural contexts
4. RACIAL PRIDE - Celebrate racial and cultural identities
5. SELECTIVE TRUST - Build trusting relationships with critical thinking
6. SOCIAL JUSTICE - Address social justice and promote equity

Lesson Structure:
- Opening Circle (5-10 min) - Build community
- Cultural Connection (10-15 min) - Connect to cultural backgrounds
- Core Learning (20-30 min) - Main instruction with differentiation
- Application & Expression (15-20 min) - Creative application
- Reflection & Planning (5-10 min) - Reflect and plan next steps

Key Principles:
- Ensure all students feel seen, heard, and valued
- Connect learning to lived experiences
- Provide multiple ways to engage with content
- Celebrate diverse perspectives
- Build on strengths and cultural assets
- Create opportunities for student voice and choice
"#;
