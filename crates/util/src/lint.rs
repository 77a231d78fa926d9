//! Advisory checks for menu trees.
//!
//! The navigation engine accepts any tree; these lints point out shapes that
//! make entries unreachable or inert. Nothing here changes how a menu resolves.

use std::fmt;

use indexmap::IndexMap;
use nestdrawer_types::{Menu, MenuEntry, NavigationPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    Warning,
    Error,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Warning => f.write_str("warning"),
            LintSeverity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuLintKind {
    /// Several siblings share an id; only the first is reachable by path.
    DuplicateId { id: String, occurrences: usize },
    /// An entry has an empty or whitespace-only id.
    EmptyId { label: String },
    /// An entry has both children and an action; the action never runs.
    ShadowedAction { id: String },
    /// A leaf has no action; selecting it does nothing.
    InertLeaf { id: String },
}

/// A single finding, located by the path of the level it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLint {
    pub level: NavigationPath,
    pub kind: MenuLintKind,
}

impl MenuLint {
    pub fn severity(&self) -> LintSeverity {
        match self.kind {
            MenuLintKind::DuplicateId { .. } | MenuLintKind::EmptyId { .. } => LintSeverity::Error,
            MenuLintKind::ShadowedAction { .. } | MenuLintKind::InertLeaf { .. } => LintSeverity::Warning,
        }
    }
}

impl fmt::Display for MenuLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: ", self.severity(), self.level)?;
        match &self.kind {
            MenuLintKind::DuplicateId { id, occurrences } => {
                write!(f, "id '{id}' is used by {occurrences} siblings; only the first is reachable")
            }
            MenuLintKind::EmptyId { label } => write!(f, "entry '{label}' has an empty id"),
            MenuLintKind::ShadowedAction { id } => {
                write!(f, "entry '{id}' has a submenu, so its action is never run")
            }
            MenuLintKind::InertLeaf { id } => write!(f, "entry '{id}' has neither a submenu nor an action"),
        }
    }
}

/// Walks every level of `menu` and collects lints in display order.
pub fn lint_menu(menu: &Menu) -> Vec<MenuLint> {
    let mut lints = Vec::new();
    let mut pending: Vec<(NavigationPath, &[MenuEntry])> = vec![(NavigationPath::new(), menu.entries())];

    while let Some((level, entries)) = pending.pop() {
        lint_level(&level, entries, &mut lints);
        // Reverse so levels are visited in display order.
        for entry in entries.iter().rev().filter(|entry| entry.has_children()) {
            pending.push((level.child(entry.id.clone()), &entry.children));
        }
    }
    lints
}

fn lint_level(level: &NavigationPath, entries: &[MenuEntry], lints: &mut Vec<MenuLint>) {
    let mut seen: IndexMap<&str, usize> = IndexMap::new();
    for entry in entries {
        if entry.id.trim().is_empty() {
            lints.push(MenuLint {
                level: level.clone(),
                kind: MenuLintKind::EmptyId {
                    label: entry.label.clone(),
                },
            });
        } else {
            *seen.entry(entry.id.as_str()).or_default() += 1;
        }

        if entry.has_children() && entry.action.is_some() {
            lints.push(MenuLint {
                level: level.clone(),
                kind: MenuLintKind::ShadowedAction { id: entry.id.clone() },
            });
        } else if !entry.is_interactive() {
            lints.push(MenuLint {
                level: level.clone(),
                kind: MenuLintKind::InertLeaf { id: entry.id.clone() },
            });
        }
    }

    for (id, occurrences) in seen {
        if occurrences > 1 {
            lints.push(MenuLint {
                level: level.clone(),
                kind: MenuLintKind::DuplicateId {
                    id: id.to_string(),
                    occurrences,
                },
            });
        }
    }
}

/// Whether any lint is an error.
pub fn has_errors(lints: &[MenuLint]) -> bool {
    lints.iter().any(|lint| lint.severity() == LintSeverity::Error)
}
