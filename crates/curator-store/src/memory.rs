//! In-memory document store.

use std::sync::RwLock;

use async_trait::async_trait;
use curator_core::{CuratorError, Document, DocumentStore, DocumentType, Result};

/// Holds the corpus in memory; each fetch clones an eligible snapshot.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(docs: Vec<Document>) -> Self {
        Self {
            docs: RwLock::new(docs),
        }
    }

    /// Insert or replace by id.
    pub fn upsert(&self, doc: Document) -> Result<()> {
        let mut docs = self.docs.write().map_err(|e| CuratorError::Store(e.to_string()))?;
        match docs.iter_mut().find(|d| !d.id.is_empty() && d.id == doc.id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_documents(&self, filter: Option<DocumentType>) -> Result<Vec<Document>> {
        let docs = self.docs.read().map_err(|e| CuratorError::Store(e.to_string()))?;
        Ok(docs
            .iter()
            .filter(|d| d.document_type.is_eligible_for(filter))
            .cloned()
            .collect())
    }
}
