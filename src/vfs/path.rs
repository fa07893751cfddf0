//! Path resolution and canonicalization
//!
//! Canonical paths are rooted at `~`, use single `/` separators, have no
//! trailing separator and contain no `.` or `..` components. They are the
//! storage keys of the node store.

use crate::error::PathError;
use crate::types::{ROOT, SEPARATOR};

/// Resolve `raw` against the canonical working directory `cwd`.
///
/// - `~` or the empty string is the root.
/// - A leading `/` or `~/` is absolute from the root; anything else is
///   relative to `cwd`.
/// - `..` pops one component and is clamped at the root.
/// - `.` and empty components are dropped.
///
/// Control characters are the only rejected input.
pub fn resolve(raw: &str, cwd: &str) -> Result<String, PathError> {
    if raw.chars().any(char::is_control) {
        return Err(PathError::InvalidPath(raw.to_string()));
    }
    if raw.is_empty() || raw == ROOT {
        return Ok(ROOT.to_string());
    }

    let (base, rest) = if let Some(rest) = raw.strip_prefix("~/") {
        (ROOT, rest)
    } else if let Some(rest) = raw.strip_prefix(SEPARATOR) {
        (ROOT, rest)
    } else {
        (cwd, raw)
    };

    let mut components: Vec<&str> = components(base).collect();
    for segment in rest.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            name => components.push(name),
        }
    }

    Ok(join_components(&components))
}

/// Components of a canonical path below the root.
fn components(canonical: &str) -> impl Iterator<Item = &str> {
    canonical
        .split(SEPARATOR)
        .enumerate()
        .filter(|(i, part)| !(*i == 0 && *part == ROOT) && !part.is_empty())
        .map(|(_, part)| part)
}

fn join_components(components: &[&str]) -> String {
    let mut path = String::from(ROOT);
    for component in components {
        path.push(SEPARATOR);
        path.push_str(component);
    }
    path
}

/// Parent of a canonical path; `None` for the root.
pub fn parent_path(canonical: &str) -> Option<&str> {
    canonical.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Final component of a canonical path. The root's name is `~`.
pub fn file_name(canonical: &str) -> &str {
    canonical
        .rsplit_once(SEPARATOR)
        .map(|(_, name)| name)
        .unwrap_or(canonical)
}

/// Canonical path of `name` inside the directory `parent`.
pub fn join(parent: &str, name: &str) -> String {
    format!("{}{}{}", parent, SEPARATOR, name)
}

/// True if `path` is `ancestor` or lies beneath it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    path == ancestor
        || (path.starts_with(ancestor) && path[ancestor.len()..].starts_with(SEPARATOR))
}
