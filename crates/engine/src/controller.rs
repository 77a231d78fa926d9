//! Navigation state machine for a single drawer session.
//!
//! The controller owns the current [`NavigationPath`] and the
//! [`SlideDirection`] of the next transition. Requests that leave the menu
//! (activating an action, closing the drawer) are not performed here; they
//! are returned as [`Effect`]s for the host to apply in order.

use std::sync::Arc;

use nestdrawer_types::{Effect, Menu, MenuEntry, NavigationPath, SlideDirection};
use tracing::debug;

use crate::resolver::resolve;

/// Drill-down navigation over a shared, immutable menu tree.
#[derive(Debug, Clone)]
pub struct NavigationController {
    menu: Arc<Menu>,
    path: NavigationPath,
    direction: SlideDirection,
}

impl NavigationController {
    /// Starts a session at the root level.
    pub fn new(menu: Arc<Menu>) -> Self {
        Self {
            menu,
            path: NavigationPath::new(),
            direction: SlideDirection::default(),
        }
    }

    pub fn menu(&self) -> &Arc<Menu> {
        &self.menu
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_root()
    }

    /// Entries visible at the current path, falling back to the root level
    /// when the path no longer matches the tree.
    pub fn visible_entries(&self) -> &[MenuEntry] {
        resolve(self.menu.entries(), self.path.segments())
    }

    /// Moves one level down into `entry_id`.
    ///
    /// The caller is expected to pass an entry with children at the current
    /// level; anything else leaves a path that resolves to the root.
    pub fn descend(&mut self, entry_id: impl Into<String>) {
        let entry_id = entry_id.into();
        debug!(entry_id = %entry_id, depth = self.path.depth() + 1, "descend");
        self.direction = SlideDirection::Forward;
        self.path.push(entry_id);
    }

    /// Moves one level up. At the root the path stays empty, but the
    /// direction is still set to backward.
    pub fn ascend(&mut self) {
        self.direction = SlideDirection::Backward;
        let popped = self.path.pop();
        debug!(popped = ?popped, depth = self.path.depth(), "ascend");
    }

    /// Ascends when inside a submenu; asks the host to close the drawer when
    /// already at the root.
    pub fn close_or_ascend(&mut self) -> Vec<Effect> {
        if self.is_at_root() {
            return vec![Effect::CloseDrawer];
        }
        self.ascend();
        Vec::new()
    }

    /// Handles activation of `entry`.
    ///
    /// Entries with children are descended into. Leaves with an action yield
    /// `[Activate, CloseDrawer]`. Anything else is a no-op.
    pub fn interact(&mut self, entry: &MenuEntry) -> Vec<Effect> {
        if entry.has_children() {
            self.descend(entry.id.clone());
            return Vec::new();
        }
        match &entry.action {
            Some(action) => vec![Effect::Activate(action.clone()), Effect::CloseDrawer],
            None => {
                debug!(entry_id = %entry.id, "ignoring inert entry");
                Vec::new()
            }
        }
    }

    /// Returns to the root level for a fresh session.
    pub fn reset(&mut self) {
        self.path.clear();
        self.direction = SlideDirection::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestdrawer_types::ActionId;

    fn scenario_menu() -> Arc<Menu> {
        Arc::new(Menu::new(vec![
            MenuEntry::new("a", "A").with_children(vec![MenuEntry::new("a1", "A1")]),
            MenuEntry::new("b", "B").with_action("f"),
        ]))
    }

    fn visible_ids(controller: &NavigationController) -> Vec<String> {
        controller.visible_entries().iter().map(|entry| entry.id.clone()).collect()
    }

    #[test]
    fn drill_down_and_back_scenario() {
        let mut controller = NavigationController::new(scenario_menu());
        assert_eq!(visible_ids(&controller), ["a", "b"]);

        let a = controller.visible_entries()[0].clone();
        assert!(controller.interact(&a).is_empty());
        assert_eq!(controller.path(), &NavigationPath::from(["a"]));
        assert_eq!(controller.direction(), SlideDirection::Forward);
        assert_eq!(visible_ids(&controller), ["a1"]);

        controller.ascend();
        assert!(controller.is_at_root());
        assert_eq!(controller.direction(), SlideDirection::Backward);

        let b = controller.visible_entries()[1].clone();
        assert_eq!(
            controller.interact(&b),
            vec![Effect::Activate(ActionId::new("f")), Effect::CloseDrawer]
        );
        assert!(controller.is_at_root());
    }

    #[test]
    fn descend_then_ascend_restores_path() {
        let mut controller = NavigationController::new(scenario_menu());
        controller.descend("a");
        let before = controller.path().clone();
        controller.descend("a1");
        assert_eq!(controller.depth(), 2);
        controller.ascend();
        assert_eq!(controller.path(), &before);
        assert_eq!(controller.direction(), SlideDirection::Backward);
    }

    #[test]
    fn ascend_at_root_is_idempotent() {
        let mut controller = NavigationController::new(scenario_menu());
        controller.ascend();
        controller.ascend();
        assert!(controller.path().is_root());
        assert_eq!(controller.direction(), SlideDirection::Backward);
    }

    #[test]
    fn ascend_goes_back_one_level_at_a_time() {
        let menu = Arc::new(Menu::new(vec![MenuEntry::new("x", "X").with_children(vec![
            MenuEntry::new("y", "Y").with_children(vec![MenuEntry::new("z", "Z").with_action("z")]),
        ])]));
        let mut controller = NavigationController::new(menu);
        controller.descend("x");
        controller.descend("y");
        controller.ascend();
        assert_eq!(controller.path(), &NavigationPath::from(["x"]));
        controller.ascend();
        assert!(controller.is_at_root());
    }

    #[test]
    fn close_or_ascend_closes_only_at_root() {
        let mut controller = NavigationController::new(scenario_menu());
        controller.descend("a");
        assert!(controller.close_or_ascend().is_empty());
        assert!(controller.is_at_root());
        assert_eq!(controller.close_or_ascend(), vec![Effect::CloseDrawer]);
        assert!(controller.is_at_root());
    }

    #[test]
    fn interact_with_inert_entry_does_nothing() {
        let mut controller = NavigationController::new(scenario_menu());
        controller.descend("a");
        let inert = MenuEntry::new("a1", "A1");
        assert!(controller.interact(&inert).is_empty());
        assert_eq!(controller.path(), &NavigationPath::from(["a"]));
    }

    #[test]
    fn children_take_precedence_over_action() {
        let mut controller = NavigationController::new(scenario_menu());
        let both = MenuEntry::new("a", "A")
            .with_action("ignored")
            .with_children(vec![MenuEntry::new("a1", "A1")]);
        assert!(controller.interact(&both).is_empty());
        assert_eq!(controller.depth(), 1);
    }

    #[test]
    fn descending_into_leaf_falls_back_to_root_entries() {
        let mut controller = NavigationController::new(scenario_menu());
        controller.descend("a");
        controller.descend("a1");
        assert_eq!(controller.depth(), 2);
        assert_eq!(visible_ids(&controller), ["a", "b"]);
    }

    #[test]
    fn reset_returns_to_root() {
        let mut controller = NavigationController::new(scenario_menu());
        controller.descend("a");
        controller.reset();
        assert!(controller.is_at_root());
        assert_eq!(controller.direction(), SlideDirection::Forward);
    }
}
