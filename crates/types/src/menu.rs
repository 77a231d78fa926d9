//! Menu tree model shared by the engine, the TUI, and the menu file loader.
//!
//! A menu is an ordered list of root-level entries. Entries either open a
//! nested level (`children`) or name an action that the host binds to a
//! callback. The tree is supplied wholesale by the caller and never mutated
//! while a drawer session is open.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a caller-supplied, zero-argument callback.
///
/// Menu trees only carry the identifier; the host decides what activating it
/// means (see `nestdrawer_engine::dispatch`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single node in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Stable identifier, unique among siblings.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Optional secondary text rendered under the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional short glyph rendered before the label (e.g. "⚙", "$").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Action activated when a leaf is selected. Ignored when `children`
    /// is non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionId>,
    /// Ordered nested entries; empty marks a leaf.
    #[serde(default, alias = "submenu", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    /// Creates a leaf entry with no action.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            icon: None,
            action: None,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<ActionId>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = children;
        self
    }

    /// Whether selecting this entry opens a nested level.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether selecting this entry does anything at all.
    pub fn is_interactive(&self) -> bool {
        self.has_children() || self.action.is_some()
    }
}

/// The root of a menu tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Optional heading shown by hosts that display one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Root-level entries, in display order.
    #[serde(default, alias = "items")]
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self { title: None, entries }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
