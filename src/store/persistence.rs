//! Sled-backed node store.

use super::{descendant_prefix, is_direct_child, NodeRecord, NodeStore, WriteOp};
use crate::error::StorageError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the sled tree holding node records.
pub const NODES_TREE: &str = "nodes";

/// Durable node store over a sled database.
///
/// Keys are canonical path bytes and values are JSON-encoded [`NodeRecord`]s.
#[derive(Clone)]
pub struct SledNodeStore {
    db: sled::Db,
    nodes: sled::Tree,
}

impl SledNodeStore {
    /// Open (or create) the store at `path` on the blocking pool.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        blocking(move || Self::new(&path)).await
    }

    /// Open the store synchronously.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        let store = Self::from_db(db)?;
        info!(path = %path.display(), nodes = store.nodes.len(), "Opened node store");
        Ok(store)
    }

    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let nodes = db.open_tree(NODES_TREE)?;
        Ok(Self { db, nodes })
    }

    fn decode(bytes: &[u8]) -> Result<NodeRecord, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Run a sled call on the blocking pool. Every sled operation may touch the
/// disk, so none of them run on an executor thread.
async fn blocking<T, F>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
}

#[async_trait]
impl NodeStore for SledNodeStore {
    async fn get(&self, path: &str) -> Result<Option<NodeRecord>, StorageError> {
        let nodes = self.nodes.clone();
        let key = path.to_string();
        blocking(move || match nodes.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        })
        .await
    }

    async fn list_children(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let nodes = self.nodes.clone();
        let dir_prefix = descendant_prefix(prefix);
        blocking(move || {
            let mut children = Vec::new();
            for entry in nodes.scan_prefix(dir_prefix.as_bytes()).keys() {
                let key = entry?;
                let key = String::from_utf8_lossy(&key);
                if is_direct_child(&key, &dir_prefix) {
                    children.push(key.into_owned());
                }
            }
            Ok(children)
        })
        .await
    }

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), StorageError> {
        let mut batch = sled::Batch::default();
        let count = ops.len();
        for op in ops {
            match op {
                WriteOp::Put(record) => {
                    let bytes = serde_json::to_vec(&record)?;
                    batch.insert(record.path().as_bytes(), bytes);
                }
                WriteOp::Delete(path) => batch.remove(path.as_bytes()),
            }
        }
        let nodes = self.nodes.clone();
        blocking(move || Ok(nodes.apply_batch(batch)?)).await?;
        debug!(ops = count, "Committed batch");
        Ok(())
    }

    async fn usage(&self) -> Result<u64, StorageError> {
        let db = self.db.clone();
        blocking(move || Ok(db.size_on_disk()?)).await
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let nodes = self.nodes.clone();
        blocking(move || {
            nodes.flush()?;
            Ok(())
        })
        .await
    }
}
