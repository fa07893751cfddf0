//! Termi-Web: Virtual Filesystem & Command Dispatch
//!
//! A hierarchical filesystem persisted in an embedded key-value store, a
//! session cursor over it, and a small command language whose handlers
//! mutate the tree and write text to an output sink.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
pub mod store;
pub mod tooling;
pub mod types;
pub mod vfs;
