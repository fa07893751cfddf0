//! Error types
//!
//! Expected filesystem conditions (missing paths, wrong node type, the root
//! directory) are not errors: VFS operations report them through `bool` and
//! `Option` results. Only the storage layer and configuration produce errors.

use thiserror::Error;

/// Unexpected persistence failures surfaced from the node store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("storage quota exceeded: {used} of {quota} bytes used")]
    QuotaExceeded { used: u64, quota: u64 },

    #[error("storage task failed: {0}")]
    Task(String),
}

/// Malformed path syntax rejected by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path: {0:?}")]
    InvalidPath(String),
}

/// Top-level error for session setup and the host binary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}
