//! # Curator Store
//! Document store adapters behind [`DocumentStore`](curator_core::DocumentStore).
//!
//! | Backend | Use |
//! |---------|-----|
//! | `memory` | fixtures, embedding |
//! | `json` | corpus file exported from the admin tool, re-read per fetch |
//! | `sqlite` | local table, eligibility filter applied in SQL |

pub mod json_file;
pub mod memory;
pub mod sqlite;

use std::path::Path;
use std::sync::Arc;

use curator_core::{CuratorError, DocumentStore, Result};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Create a store from the configured backend name.
pub fn create_store(backend: &str, path: &Path) -> Result<Arc<dyn DocumentStore>> {
    match backend {
        "json" => Ok(Arc::new(JsonFileStore::new(path))),
        "sqlite" => Ok(Arc::new(SqliteStore::open(path)?)),
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(CuratorError::Config(format!("unknown store backend '{other}'"))),
    }
}
