//! First-run seeding of the default tree.

use super::{path, Vfs, VfsOptions};
use crate::error::StorageError;
use crate::store::{NodeRecord, NodeStore, WriteOp};
use crate::types::{now_millis, Timestamp, ROOT};
use std::sync::Arc;
use tracing::{info, warn};

/// Directories created on first run, parents before children.
pub const DEFAULT_DIRECTORIES: &[&str] = &[
    "bin",
    "etc",
    "home",
    "tmp",
    "usr",
    "var",
    "home/user",
    "home/user/Documents",
    "home/user/Downloads",
];

/// Files created on first run.
pub const DEFAULT_FILES: &[(&str, &str)] = &[
    ("etc/motd", "Welcome to Termi-Web!"),
    (
        "home/user/.bashrc",
        "# Termi-Web bashrc\nexport PS1=\"\\[\\e[32m\\]\\u@\\h\\[\\e[0m\\]:\\[\\e[34m\\]\\w\\[\\e[0m\\]$ \"",
    ),
    (
        "home/user/README.md",
        "# Welcome to Termi-Web\n\nThis is a web-based Termux emulator.\n\n## Features:\n- Full terminal emulation\n- Virtual filesystem\n- Package management\n- Programming languages\n\nEnjoy!",
    ),
];

/// Every record of the default tree, root first, with each directory's
/// `children` already filled in.
pub fn default_tree(now: Timestamp) -> Vec<NodeRecord> {
    let mut records = vec![NodeRecord::directory(ROOT, ROOT)];
    for dir in DEFAULT_DIRECTORIES {
        let canonical = path::join(ROOT, dir);
        let name = path::file_name(&canonical).to_string();
        attach(&mut records, NodeRecord::directory(canonical, name));
    }
    for (file, content) in DEFAULT_FILES {
        attach(
            &mut records,
            NodeRecord::file(path::join(ROOT, file), *content, now, now),
        );
    }
    records
}

fn attach(records: &mut Vec<NodeRecord>, record: NodeRecord) {
    let canonical = record.path().to_string();
    let parent = path::parent_path(&canonical).and_then(|parent| {
        records.iter_mut().find_map(|candidate| match candidate {
            NodeRecord::Directory {
                path: dir_path,
                children,
                ..
            } if dir_path.as_str() == parent => Some(children),
            _ => None,
        })
    });
    match parent {
        Some(children) => children.push(path::file_name(&canonical).to_string()),
        None => {
            warn!(path = %canonical, "Default entry has no parent, skipping");
            return;
        }
    }
    records.push(record);
}

/// Mount `store`, seeding the default tree first if the store has no root.
///
/// The root and the whole tree go out in a single commit, so an interrupted
/// first run leaves the store empty and the next mount seeds again. Returns
/// the session and whether seeding happened.
pub async fn mount_seeded(
    store: Arc<dyn NodeStore>,
    options: VfsOptions,
) -> Result<(Vfs, bool), StorageError> {
    let fresh = store.get(ROOT).await?.is_none();
    if fresh {
        let ops: Vec<WriteOp> = default_tree(now_millis())
            .into_iter()
            .map(WriteOp::Put)
            .collect();
        let count = ops.len();
        store.commit(ops).await?;
        if options.flush_on_write {
            store.flush().await?;
        }
        info!(records = count, "Seeded default filesystem");
    }
    let vfs = Vfs::mount(store, options).await?;
    Ok((vfs, fresh))
}
