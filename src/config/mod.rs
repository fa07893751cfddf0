//! Configuration
//!
//! Layered settings for storage, the shell and logging. See [`ConfigLoader`]
//! for the source precedence.

pub mod loader;
pub mod xdg;

pub use loader::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::vfs::{VfsOptions, DEFAULT_QUOTA_BYTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermiConfig {
    pub storage: StorageConfig,
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

fn default_quota_bytes() -> u64 {
    DEFAULT_QUOTA_BYTES
}

fn default_true() -> bool {
    true
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Node store directory; None means the platform data directory.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,

    /// Flush the store after every mutation.
    #[serde(default = "default_true")]
    pub flush_on_write: bool,
}

impl StorageConfig {
    /// Store directory to open.
    pub fn resolve_store_path(&self) -> Result<PathBuf, ApiError> {
        match &self.store_path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => xdg::default_store_path(),
        }
    }

    pub fn vfs_options(&self) -> VfsOptions {
        VfsOptions {
            quota_bytes: self.quota_bytes,
            flush_on_write: self.flush_on_write,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            quota_bytes: default_quota_bytes(),
            flush_on_write: default_true(),
        }
    }
}

fn default_user() -> String {
    "user".to_string()
}

fn default_host() -> String {
    "termi-web".to_string()
}

/// Interactive shell settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_host")]
    pub host: String,

    /// ANSI colour in command output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Seed the default tree into an empty store
    #[serde(default = "default_true")]
    pub bootstrap: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            host: default_host(),
            color: default_true(),
            bootstrap: default_true(),
        }
    }
}
