//! Resolution of the entry list visible at a navigation path.
//!
//! The walk follows the caller-supplied path one level at a time and never
//! recurses into the tree, so its cost is bounded by the path length times the
//! width of each visited level.

use nestdrawer_types::MenuEntry;

/// Returns the entries visible at `path`.
///
/// An empty path yields `tree` itself. A path that names a missing entry, or
/// an entry without children, yields `tree` as well: rendering always gets a
/// well-formed level, never a partial or empty result.
pub fn resolve<'a, S: AsRef<str>>(tree: &'a [MenuEntry], path: &[S]) -> &'a [MenuEntry] {
    let mut level = tree;
    for segment in path {
        match find_entry(level, segment.as_ref()) {
            Some(entry) if entry.has_children() => level = &entry.children,
            _ => return tree,
        }
    }
    level
}

/// Returns the chain of entries matched by `path`, or `None` when `resolve`
/// would fall back to the root.
pub fn resolve_trail<'a, S: AsRef<str>>(tree: &'a [MenuEntry], path: &[S]) -> Option<Vec<&'a MenuEntry>> {
    let mut trail = Vec::with_capacity(path.len());
    let mut level = tree;
    for segment in path {
        let entry = find_entry(level, segment.as_ref()).filter(|entry| entry.has_children())?;
        trail.push(entry);
        level = &entry.children;
    }
    Some(trail)
}

/// Whether `path` resolves without falling back.
pub fn is_valid_path<S: AsRef<str>>(tree: &[MenuEntry], path: &[S]) -> bool {
    resolve_trail(tree, path).is_some()
}

fn find_entry<'a>(level: &'a [MenuEntry], id: &str) -> Option<&'a MenuEntry> {
    level.iter().find(|entry| entry.id == id)
}
