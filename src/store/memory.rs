//! In-memory node store.
//!
//! Provides a BTreeMap-based store that doesn't persist data. Used for tests
//! and ephemeral sessions.

use super::{descendant_prefix, is_direct_child, NodeRecord, NodeStore, WriteOp};
use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct MemoryNodeStore {
    records: RwLock<BTreeMap<String, NodeRecord>>,
    fail_writes: AtomicBool,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent commit fail with an I/O error. Test hook.
    #[doc(hidden)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn get(&self, path: &str) -> Result<Option<NodeRecord>, StorageError> {
        Ok(self.records.read().get(path).cloned())
    }

    async fn list_children(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let dir_prefix = descendant_prefix(prefix);
        let records = self.records.read();
        let children = records
            .range::<str, _>((Bound::Included(dir_prefix.as_str()), Bound::Unbounded))
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(&dir_prefix))
            .filter(|key| is_direct_child(key, &dir_prefix))
            .cloned()
            .collect();
        Ok(children)
    }

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated write failure",
            )));
        }

        let mut records = self.records.write();
        for op in ops {
            match op {
                WriteOp::Put(record) => {
                    records.insert(record.path().to_string(), record);
                }
                WriteOp::Delete(path) => {
                    records.remove(&path);
                }
            }
        }
        Ok(())
    }

    async fn usage(&self) -> Result<u64, StorageError> {
        let records = self.records.read();
        let mut total = 0u64;
        for (key, record) in records.iter() {
            total += (key.len() + serde_json::to_vec(record)?.len()) as u64;
        }
        Ok(total)
    }
}
