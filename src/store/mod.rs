//! Node Store
//!
//! Durable mapping from canonical path to filesystem node record. The store is
//! the only component that touches persistence; the VFS builds tree semantics
//! on top of the primitives defined here.

pub mod memory;
pub mod persistence;

pub use memory::MemoryNodeStore;
pub use persistence::SledNodeStore;

use crate::error::StorageError;
use crate::types::{EntryType, Timestamp, SEPARATOR};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Persisted node record, keyed by its canonical path.
///
/// The serialized layout is `{path, type, ...}` and must stay stable across
/// restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeRecord {
    Directory {
        path: String,
        name: String,
        /// Child names in insertion order.
        #[serde(default)]
        children: Vec<String>,
    },
    File {
        path: String,
        content: String,
        created: Timestamp,
        modified: Timestamp,
    },
}

impl NodeRecord {
    pub fn directory(path: impl Into<String>, name: impl Into<String>) -> Self {
        NodeRecord::Directory {
            path: path.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn file(
        path: impl Into<String>,
        content: impl Into<String>,
        created: Timestamp,
        modified: Timestamp,
    ) -> Self {
        NodeRecord::File {
            path: path.into(),
            content: content.into(),
            created,
            modified,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            NodeRecord::Directory { path, .. } | NodeRecord::File { path, .. } => path,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            NodeRecord::Directory { .. } => EntryType::Directory,
            NodeRecord::File { .. } => EntryType::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, NodeRecord::Directory { .. })
    }
}

/// A single mutation inside an atomic [`NodeStore::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put(NodeRecord),
    Delete(String),
}

/// Key prefix shared by every descendant of `path`.
pub(crate) fn descendant_prefix(path: &str) -> String {
    format!("{}{}", path, SEPARATOR)
}

/// True when `key` sits directly below the directory whose descendant prefix
/// is `prefix`.
pub(crate) fn is_direct_child(key: &str, prefix: &str) -> bool {
    key.len() > prefix.len() && key.starts_with(prefix) && !key[prefix.len()..].contains(SEPARATOR)
}

/// Node store interface
///
/// `get` reports a missing path as `Ok(None)`; errors are reserved for
/// persistence failures. `commit` applies all of its operations or none of
/// them, and readers never observe a partially applied commit.
#[async_trait]
pub trait NodeStore: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<NodeRecord>, StorageError>;

    /// Canonical paths of every stored node whose parent is `prefix`.
    async fn list_children(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), StorageError>;

    /// Bytes currently used by the store.
    async fn usage(&self) -> Result<u64, StorageError>;

    async fn put(&self, record: NodeRecord) -> Result<(), StorageError> {
        self.commit(vec![WriteOp::Put(record)]).await
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.commit(vec![WriteOp::Delete(path.to_string())]).await
    }

    /// Persist outstanding writes.
    async fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
