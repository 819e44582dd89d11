//! SQLite document store.
//! One `reference_documents` table; list/map fields are stored as JSON text.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use curator_core::{CuratorError, Document, DocumentStore, DocumentType, Result};
use rusqlite::{Connection, params, params_from_iter};

fn db_err(e: rusqlite::Error) -> CuratorError {
    CuratorError::Store(e.to_string())
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the document database.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(db_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        tracing::debug!("🗄️ Opened document database: {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| CuratorError::Store(e.to_string()))
    }

    fn migrate(&self) -> Result<()> {
        self.conn()?
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS reference_documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                content TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                tags TEXT NOT NULL DEFAULT '[]',        -- JSON array
                document_type TEXT NOT NULL DEFAULT 'both',
                usage_tags TEXT NOT NULL DEFAULT '{}',  -- JSON object
                priority TEXT NOT NULL DEFAULT '{}'     -- JSON object
            );
            CREATE INDEX IF NOT EXISTS idx_reference_documents_type
                ON reference_documents(document_type);
            ",
            )
            .map_err(db_err)
    }

    /// Insert or replace a document by id.
    pub fn upsert(&self, doc: &Document) -> Result<()> {
        upsert_row(&*self.conn()?, doc)
    }

    /// Upsert many documents in one transaction; returns how many were written.
    /// Rows that cannot be written are skipped; the rest commit together.
    pub fn upsert_all(&self, docs: &[Document]) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(db_err)?;
        let mut written = 0;
        for doc in docs {
            match upsert_row(&tx, doc) {
                Ok(()) => written += 1,
                Err(e) => tracing::warn!("⚠️ Skipping document '{}': {e}", doc.title),
            }
        }
        tx.commit().map_err(db_err)?;
        Ok(written)
    }

    /// Delete by id; returns whether a row was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let n = self
            .conn()?
            .execute("DELETE FROM reference_documents WHERE id = ?1", params![id])
            .map_err(db_err)?;
        Ok(n > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM reference_documents", [], |r| r.get(0))
            .map_err(db_err)?;
        Ok(n as usize)
    }
}

fn upsert_row(conn: &Connection, doc: &Document) -> Result<()> {
    if doc.id.is_empty() {
        return Err(CuratorError::Store("document id must not be empty".into()));
    }
    conn.execute(
        "INSERT OR REPLACE INTO reference_documents
         (id, title, content, category, tags, document_type, usage_tags, priority)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            doc.id,
            doc.title,
            doc.content,
            doc.category,
            serde_json::to_string(&doc.tags)?,
            doc.document_type.as_str(),
            serde_json::to_string(&doc.usage_tags)?,
            serde_json::to_string(&doc.priority)?,
        ],
    )
    .map_err(db_err)?;
    Ok(())
}

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    let tags: String = row.get(4)?;
    let document_type: String = row.get(5)?;
    let usage_tags: String = row.get(6)?;
    let priority: String = row.get(7)?;
    Ok(Document {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: row.get(3)?,
        tags: serde_json::from_str(&tags).unwrap_or_default(),
        document_type: document_type.parse().unwrap_or(DocumentType::General),
        usage_tags: serde_json::from_str(&usage_tags).unwrap_or_default(),
        priority: serde_json::from_str(&priority).unwrap_or_default(),
    })
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_documents(&self, filter: Option<DocumentType>) -> Result<Vec<Document>> {
        let types: Vec<&str> = DocumentType::eligible_types(filter)
            .into_iter()
            .map(DocumentType::as_str)
            .collect();
        let placeholders = vec!["?"; types.len()].join(", ");
        let sql = format!(
            "SELECT id, title, content, category, tags, document_type, usage_tags, priority
             FROM reference_documents WHERE document_type IN ({placeholders}) ORDER BY rowid"
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt
            .query_map(params_from_iter(types.iter()), row_to_document)
            .map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new("1", "Lesson Guide", "best-practices", "Plan around strengths.")
                .with_type(DocumentType::LessonPlan)
                .with_priority("lessonPlans", 10)
                .with_usage("lessonPlans", true)
                .with_tags(&["planning"]),
            Document::new("2", "Portrait Guide", "black-genius-elements", "").with_type(DocumentType::Profile),
            Document::new("3", "Shared", "examples", "").with_type(DocumentType::Both),
            Document::new("4", "Note", "research", "").with_type(DocumentType::General),
        ]
    }

    #[tokio::test]
    async fn test_upsert_and_fetch_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.upsert_all(&corpus()).unwrap(), 4);
        assert_eq!(store.count().unwrap(), 4);

        let docs = store.fetch_documents(None).await.unwrap();
        assert_eq!(docs[0], corpus()[0]);
    }

    #[tokio::test]
    async fn test_filter_in_sql() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_all(&corpus()).unwrap();
        let lesson = store.fetch_documents(Some(DocumentType::LessonPlan)).await.unwrap();
        let ids: Vec<_> = lesson.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
        let profile = store.fetch_documents(Some(DocumentType::Profile)).await.unwrap();
        let ids: Vec<_> = profile.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_upsert_replaces_and_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&Document::new("1", "Old", "examples", "")).unwrap();
        store.upsert(&Document::new("1", "New", "examples", "")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.delete("1").unwrap());
        assert!(!store.delete("1").unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_empty_id_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.upsert(&Document::new("", "No id", "examples", "")).is_err());
        assert_eq!(store.upsert_all(&[Document::new("", "No id", "examples", "")]).unwrap(), 0);
    }

    #[test]
    fn test_upsert_all_commits_and_releases_connection() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut docs = corpus();
        docs.insert(1, Document::new("", "No id", "examples", ""));
        assert_eq!(store.upsert_all(&docs).unwrap(), 4);
        // A second batch must start cleanly: no transaction left open.
        assert_eq!(store.upsert_all(&[Document::new("5", "Fifth", "style", "")]).unwrap(), 1);
        assert!(store.conn().unwrap().is_autocommit());
        assert_eq!(store.count().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_open_on_disk() {
        let dir = std::env::temp_dir().join("curator-test-sqlite-store");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("curator.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.upsert_all(&corpus()).unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 4);
        std::fs::remove_dir_all(&dir).ok();
    }
}
