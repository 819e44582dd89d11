//! Query builders for the two call sites.

use serde::{Deserialize, Serialize};

use curator_core::{CalesCriteria, StructuredCriteria};

/// Chat-wizard answers become one space-joined query.
pub fn profile_summary_query<S: AsRef<str>>(answers: &[S]) -> String {
    answers
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LessonType {
    Individual,
    Group,
    WholeClass,
}

/// Lesson-plan generation context as submitted by the planner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonPlanRequest {
    /// Free-text student profile summaries.
    pub student_profiles: Vec<String>,
    pub grade: String,
    pub subject: String,
    /// Selected CALES criteria, by name.
    pub cales_criteria: Vec<String>,
    pub lesson_type: Option<LessonType>,
    pub duration: Option<String>,
}

impl LessonPlanRequest {
    /// Profiles, grade, subject and criteria names joined with single spaces.
    /// Lesson type and duration do not take part in retrieval.
    pub fn query_text(&self) -> String {
        self.student_profiles
            .iter()
            .chain(std::iter::once(&self.grade))
            .chain(std::iter::once(&self.subject))
            .chain(self.cales_criteria.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Criteria flags parsed from the request's criterion names.
    pub fn criteria(&self) -> StructuredCriteria {
        StructuredCriteria::from_framework(CalesCriteria::from_names(&self.cales_criteria))
    }
}
