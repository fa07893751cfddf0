//! Core types shared by the store, the VFS and the shell.

use serde::{Deserialize, Serialize};

/// Canonical path of the root directory. Never deletable.
pub const ROOT: &str = "~";

/// Path separator inside canonical paths.
pub const SEPARATOR: char = '/';

/// Unix time in milliseconds.
pub type Timestamp = i64;

/// Current time as a [`Timestamp`].
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Kind of a directory entry as reported by listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Directory,
    File,
}

/// One direct child of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}
