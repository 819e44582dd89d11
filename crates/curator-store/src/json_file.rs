//! JSON corpus file store.
//! The admin tool exports the corpus as one JSON array; the file is re-read
//! on every fetch so edits show up without a restart.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use curator_core::{CuratorError, Document, DocumentStore, DocumentType, Result};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every decodable record in the file, unfiltered.
    pub async fn load_all(&self) -> Result<Vec<Document>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CuratorError::Store(format!("{}: {e}", self.path.display())))?;
        parse_corpus(&raw)
    }
}

/// Decode a corpus array, skipping records that fail to decode.
pub fn parse_corpus(raw: &str) -> Result<Vec<Document>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = records.len();
    let docs: Vec<Document> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<Document>(record) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("⚠️ Skipping corpus record {i}: {e}");
                None
            }
        })
        .collect();
    if docs.len() < total {
        tracing::warn!("Loaded {} of {} corpus records", docs.len(), total);
    }
    Ok(docs)
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn fetch_documents(&self, filter: Option<DocumentType>) -> Result<Vec<Document>> {
        let docs = self.load_all().await?;
        let eligible: Vec<Document> = docs
            .into_iter()
            .filter(|d| d.document_type.is_eligible_for(filter))
            .collect();
        tracing::debug!("📂 {} eligible documents from {}", eligible.len(), self.path.display());
        Ok(eligible)
    }
}
