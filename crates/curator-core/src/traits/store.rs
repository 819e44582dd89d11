//! Document store trait — where the corpus comes from.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Document, DocumentType};

/// Source of reference documents.
///
/// Implementations return a fresh snapshot per call and own any retrying,
/// caching or rate limiting. On unavailability they should fail fast; the
/// engine downgrades any error to its empty-corpus fallback.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Fetch every document eligible under `filter` (see
    /// [`DocumentType::is_eligible_for`]); `None` returns the whole corpus.
    async fn fetch_documents(&self, filter: Option<DocumentType>) -> Result<Vec<Document>>;
}
