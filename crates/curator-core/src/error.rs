//! Curator error types.

use thiserror::Error;

/// Errors raised by Curator crates.
///
/// The engine's text entry point never surfaces these to callers; they are
/// downgraded to fallback context at the engine boundary.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// The document store could not produce a corpus snapshot.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown use case: {0}")]
    UnknownUseCase(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CuratorError>;
