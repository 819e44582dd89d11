//! # Curator Engine
//!
//! Picks a small, category-diverse set of reference documents for an LLM
//! prompt. No embeddings, no index: plain keyword matching over a corpus
//! snapshot fetched per call.
//!
//! ## How it works
//! ```text
//! query text (+ structured criteria signals)
//!   ↓ classifier   — category → keywords table, substring match
//! relevant categories (never empty: fallback categories)
//!   ↓ scorer       — base priority + relevance bonus + usage bonus
//! scored documents
//!   ↓ selector     — one per relevant category, diversity top-up, fill by score
//! ≤ output_bound documents
//!   ↓ formatter    — header + "Document/Category/Priority/Content" blocks
//! context text injected into the generation prompt
//! ```
//!
//! Every knob lives in a [`UseCaseProfile`](curator_core::UseCaseProfile);
//! the two built-ins are `profile-summary` and `lesson-plan`.

pub mod classifier;
pub mod engine;
pub mod formatter;
pub mod profiles;
pub mod query;
pub mod scorer;
pub mod selector;

pub use classifier::classify;
pub use engine::RelevanceEngine;
pub use formatter::ContextFormatter;
pub use profiles::{LESSON_PLAN, PROFILE_SUMMARY, ProfileRegistry};
pub use query::{LessonPlanRequest, LessonType, profile_summary_query};
pub use scorer::score;
pub use selector::{rank, select};
