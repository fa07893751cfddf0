//! Virtual Filesystem
//!
//! Tree semantics (directories, files, listing, recursive delete) over a
//! [`NodeStore`], plus the session cursor. A [`Vfs`] is the session context
//! handed to every command: it owns the current working directory and a
//! handle to the store.
//!
//! Expected conditions (missing path, wrong node type, malformed path, the
//! root directory) are reported through `bool` and `Option` results. Only
//! [`StorageError`] is returned as an error.

pub mod bootstrap;
pub mod path;

use crate::error::StorageError;
use crate::store::{NodeRecord, NodeStore, WriteOp};
use crate::types::{now_millis, DirEntry, ROOT};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default storage quota (50 MB).
pub const DEFAULT_QUOTA_BYTES: u64 = 50 * 1024 * 1024;

/// Tunables applied to every mutation.
#[derive(Debug, Clone)]
pub struct VfsOptions {
    pub quota_bytes: u64,
    pub flush_on_write: bool,
}

impl Default for VfsOptions {
    fn default() -> Self {
        Self {
            quota_bytes: DEFAULT_QUOTA_BYTES,
            flush_on_write: true,
        }
    }
}

/// Storage usage against the configured quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub quota_bytes: u64,
}

impl StorageUsage {
    /// Usage percentage (0-100+).
    pub fn percent(&self) -> u64 {
        if self.quota_bytes == 0 {
            return 0;
        }
        self.used_bytes * 100 / self.quota_bytes
    }
}

pub struct Vfs {
    store: Arc<dyn NodeStore>,
    cwd: String,
    options: VfsOptions,
}

impl Vfs {
    /// Attach a session to an opened store, creating the root directory if the
    /// store is empty. The cursor starts at the root.
    pub async fn mount(
        store: Arc<dyn NodeStore>,
        options: VfsOptions,
    ) -> Result<Self, StorageError> {
        let vfs = Self {
            store,
            cwd: ROOT.to_string(),
            options,
        };
        if vfs.store.get(ROOT).await?.is_none() {
            vfs.store.put(NodeRecord::directory(ROOT, ROOT)).await?;
            vfs.flush_if_configured().await?;
            debug!("Created root directory");
        }
        Ok(vfs)
    }

    pub fn current_directory(&self) -> &str {
        &self.cwd
    }

    /// Resolve `raw` against the cursor; malformed paths yield `None`.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        match path::resolve(raw, &self.cwd) {
            Ok(canonical) => Some(canonical),
            Err(e) => {
                debug!(error = %e, "Rejected path");
                None
            }
        }
    }

    pub async fn exists(&self, raw: &str) -> Result<bool, StorageError> {
        match self.resolve(raw) {
            Some(canonical) => Ok(self.store.get(&canonical).await?.is_some()),
            None => Ok(false),
        }
    }

    /// Direct children of a directory in insertion order. `None` when the
    /// target is missing or not a directory.
    pub async fn list_directory(&self, raw: &str) -> Result<Option<Vec<DirEntry>>, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(None);
        };
        let children = match self.store.get(&canonical).await? {
            Some(NodeRecord::Directory { children, .. }) => children,
            _ => return Ok(None),
        };

        let mut entries = Vec::with_capacity(children.len());
        for name in children {
            let child_path = path::join(&canonical, &name);
            match self.store.get(&child_path).await? {
                Some(record) => entries.push(DirEntry {
                    name,
                    entry_type: record.entry_type(),
                }),
                None => warn!(path = %child_path, "Directory lists a missing child, skipping"),
            }
        }
        Ok(Some(entries))
    }

    /// Move the cursor to an existing directory. Leaves the cursor untouched
    /// and returns `false` otherwise.
    pub async fn change_directory(&mut self, raw: &str) -> Result<bool, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(false);
        };
        match self.store.get(&canonical).await? {
            Some(record) if record.is_dir() => {
                debug!(from = %self.cwd, to = %canonical, "Changed directory");
                self.cwd = canonical;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// File content, or `None` when the target is missing or not a file.
    pub async fn read_file(&self, raw: &str) -> Result<Option<String>, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(None);
        };
        match self.store.get(&canonical).await? {
            Some(NodeRecord::File { content, .. }) => Ok(Some(content)),
            _ => Ok(None),
        }
    }

    /// Create or overwrite a file. The parent must be an existing directory
    /// and the target must not be a directory.
    pub async fn create_file(&self, raw: &str, content: &str) -> Result<bool, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(false);
        };
        let now = now_millis();
        let created = match self.store.get(&canonical).await? {
            Some(NodeRecord::File { created, .. }) => created,
            Some(NodeRecord::Directory { .. }) => return Ok(false),
            None => now,
        };
        let record = NodeRecord::file(canonical.as_str(), content, created, now);
        let created_ok = self.insert(&canonical, record).await?;
        if created_ok {
            debug!(path = %canonical, bytes = content.len(), "Wrote file");
        }
        Ok(created_ok)
    }

    /// Create an empty file, or empty an existing one (keeping `created`).
    /// Touching a directory succeeds without change.
    pub async fn touch(&self, raw: &str) -> Result<bool, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(false);
        };
        match self.store.get(&canonical).await? {
            Some(NodeRecord::Directory { .. }) => Ok(true),
            _ => self.create_file(&canonical, "").await,
        }
    }

    /// Create a directory. Idempotent: an existing directory is success.
    pub async fn create_directory(&self, raw: &str) -> Result<bool, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(false);
        };
        match self.store.get(&canonical).await? {
            Some(NodeRecord::Directory { .. }) => return Ok(true),
            Some(NodeRecord::File { .. }) => return Ok(false),
            None => {}
        }
        let record = NodeRecord::directory(canonical.as_str(), path::file_name(&canonical));
        let created = self.insert(&canonical, record).await?;
        if created {
            debug!(path = %canonical, "Created directory");
        }
        Ok(created)
    }

    /// Remove a file, or a directory with its whole subtree, in one atomic
    /// commit. The root cannot be deleted.
    pub async fn delete(&mut self, raw: &str) -> Result<bool, StorageError> {
        let Some(canonical) = self.resolve(raw) else {
            return Ok(false);
        };
        let Some(parent) = path::parent_path(&canonical) else {
            return Ok(false);
        };
        let Some(record) = self.store.get(&canonical).await? else {
            return Ok(false);
        };

        let doomed = if record.is_dir() {
            self.collect_subtree(&canonical).await?
        } else {
            vec![canonical.clone()]
        };

        let mut ops: Vec<WriteOp> = doomed.iter().cloned().map(WriteOp::Delete).collect();
        if let Some(NodeRecord::Directory {
            path,
            name,
            mut children,
        }) = self.store.get(parent).await?
        {
            let removed = path::file_name(&canonical);
            children.retain(|child| child != removed);
            ops.push(WriteOp::Put(NodeRecord::Directory {
                path,
                name,
                children,
            }));
        }
        self.store.commit(ops).await?;
        self.flush_if_configured().await?;
        debug!(path = %canonical, removed = doomed.len(), "Deleted");

        if path::is_within(&self.cwd, &canonical) {
            self.cwd = parent.to_string();
        }
        Ok(true)
    }

    pub async fn usage(&self) -> Result<StorageUsage, StorageError> {
        Ok(StorageUsage {
            used_bytes: self.store.usage().await?,
            quota_bytes: self.options.quota_bytes,
        })
    }

    /// Every path in the subtree rooted at `root`, descendants before their
    /// ancestors.
    async fn collect_subtree(&self, root: &str) -> Result<Vec<String>, StorageError> {
        let mut preorder = Vec::new();
        let mut stack = vec![root.to_string()];
        while let Some(current) = stack.pop() {
            stack.extend(self.store.list_children(&current).await?);
            preorder.push(current);
        }
        preorder.reverse();
        Ok(preorder)
    }

    /// Store `record` at `canonical` and register it with its parent in the
    /// same commit. Fails (`false`) when the parent is not a directory.
    async fn insert(&self, canonical: &str, record: NodeRecord) -> Result<bool, StorageError> {
        let Some(parent) = path::parent_path(canonical) else {
            return Ok(false);
        };
        let (parent_path, parent_name, mut children) = match self.store.get(parent).await? {
            Some(NodeRecord::Directory {
                path,
                name,
                children,
            }) => (path, name, children),
            _ => return Ok(false),
        };

        self.check_quota(&record).await?;

        let mut ops = vec![WriteOp::Put(record)];
        let name = path::file_name(canonical);
        if !children.iter().any(|child| child == name) {
            children.push(name.to_string());
            ops.push(WriteOp::Put(NodeRecord::Directory {
                path: parent_path,
                name: parent_name,
                children,
            }));
        }
        self.store.commit(ops).await?;
        self.flush_if_configured().await?;
        Ok(true)
    }

    async fn check_quota(&self, record: &NodeRecord) -> Result<(), StorageError> {
        let incoming = serde_json::to_vec(record)?.len() as u64;
        let used = self.store.usage().await?;
        if used + incoming > self.options.quota_bytes {
            warn!(used, incoming, quota = self.options.quota_bytes, "Storage quota exceeded");
            return Err(StorageError::QuotaExceeded {
                used,
                quota: self.options.quota_bytes,
            });
        }
        Ok(())
    }

    async fn flush_if_configured(&self) -> Result<(), StorageError> {
        if self.options.flush_on_write {
            self.store.flush().await?;
        }
        Ok(())
    }
}
