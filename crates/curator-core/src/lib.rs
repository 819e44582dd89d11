//! # Curator Core
//!
//! Shared vocabulary for the Curator relevance engine: reference documents,
//! use-case profiles, structured criteria, configuration, errors, and the
//! `DocumentStore` seam that every corpus backend implements.

pub mod config;
pub mod criteria;
pub mod error;
pub mod profile;
pub mod traits;
pub mod types;

pub use config::CuratorConfig;
pub use criteria::{CalesCriteria, StructuredCriteria};
pub use error::{CuratorError, Result};
pub use profile::{CategoryRule, UseCaseProfile};
pub use traits::DocumentStore;
pub use types::{Document, DocumentType, ScoredDocument, SelectionResult};
