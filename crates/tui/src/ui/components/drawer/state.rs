use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use nestdrawer_engine::{HeightTransition, NavigationController, PanelTransition};
use nestdrawer_types::{Effect, Menu, MenuEntry, NavigationPath, SlideDirection};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::debug;

/// Header shown at the root level when the menu has no title of its own.
pub const ROOT_TITLE: &str = "Navigation Menu";
/// Header shown for a nested level that has no entries.
pub const SUBMENU_TITLE: &str = "Submenu";

/// A selectable row inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerRow {
    /// The "back" affordance, present below the root only.
    Back,
    /// An entry of the visible level, by index.
    Entry(usize),
}

/// Snapshot of the level being slid out.
#[derive(Debug, Clone)]
pub struct OutgoingLevel {
    pub entries: Vec<MenuEntry>,
    pub at_root: bool,
    pub highlighted: usize,
    pub scroll_top: usize,
}

/// A level swap that is still animating.
#[derive(Debug, Clone)]
pub struct ActiveSlide {
    pub transition: PanelTransition,
    pub outgoing: OutgoingLevel,
}

/// Drawer state: the navigation session plus everything the component needs
/// to render it and route pointer events.
///
/// Highlighting is tracked as a row index where row 0 is the back row when
/// one is shown. rat-focus flags mirror the highlighted row so the drawer
/// participates in the application focus tree.
#[derive(Debug, Clone)]
pub struct DrawerState {
    controller: NavigationController,
    is_open: bool,
    highlighted: usize,
    /// First entry index drawn when the level is taller than the sheet.
    pub scroll_top: usize,
    slide: Option<ActiveSlide>,
    height: Option<HeightTransition>,
    last_tick: Option<Instant>,

    /// Focus flag for the container in the global focus tree.
    pub container_focus: FocusFlag,
    /// Focus flag for the back row.
    pub back_focus: FocusFlag,
    /// Focus flags for each visible entry; kept in sync with the level.
    pub entry_focus_flags: Vec<FocusFlag>,

    /// Last rendered area of the sheet itself.
    pub sheet_area: Rect,
    /// Last rendered back row, if shown.
    pub back_area: Option<Rect>,
    /// Last rendered per-entry areas, indexed like the visible entries.
    /// Entries scrolled out of view hold an empty rect.
    pub per_entry_areas: Vec<Rect>,
}

impl DrawerState {
    /// Creates an open drawer at the root of `menu`.
    pub fn new(menu: Arc<Menu>) -> Self {
        let mut state = Self {
            controller: NavigationController::new(menu),
            is_open: true,
            highlighted: 0,
            scroll_top: 0,
            slide: None,
            height: None,
            last_tick: None,
            container_focus: FocusFlag::named("drawer"),
            back_focus: FocusFlag::named("drawer.back"),
            entry_focus_flags: Vec::new(),
            sheet_area: Rect::default(),
            back_area: None,
            per_entry_areas: Vec::new(),
        };
        state.rebuild_entry_focus_flags();
        state
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Opens a fresh session at the root. Nothing animates on the first frame.
    pub fn open(&mut self) {
        self.controller.reset();
        self.is_open = true;
        self.highlighted = 0;
        self.scroll_top = 0;
        self.slide = None;
        self.height = None;
        self.last_tick = None;
        self.rebuild_entry_focus_flags();
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.slide = None;
        self.last_tick = None;
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn path(&self) -> &NavigationPath {
        self.controller.path()
    }

    pub fn visible_entries(&self) -> &[MenuEntry] {
        self.controller.visible_entries()
    }

    pub fn slide(&self) -> Option<&ActiveSlide> {
        self.slide.as_ref()
    }

    /// Header for the visible level.
    pub fn title(&self) -> String {
        let at_root = self.controller.is_at_root();
        let root_title = self.controller.menu().title.as_deref();
        level_title(root_title, self.visible_entries(), at_root)
    }

    pub fn has_back_row(&self) -> bool {
        !self.controller.is_at_root()
    }

    /// Number of selectable rows, including the back row.
    pub fn row_count(&self) -> usize {
        self.visible_entries().len() + usize::from(self.has_back_row())
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_row(&self) -> Option<DrawerRow> {
        row_at(self.highlighted, self.has_back_row(), self.visible_entries().len())
    }

    /// Index of the highlighted entry, ignoring the back row.
    pub fn highlighted_entry_index(&self) -> Option<usize> {
        match self.highlighted_row()? {
            DrawerRow::Entry(index) => Some(index),
            DrawerRow::Back => None,
        }
    }

    /// Highlights `row`, clamped into range.
    pub fn highlight_row(&mut self, row: usize) {
        let count = self.row_count();
        self.highlighted = if count == 0 { 0 } else { row.min(count - 1) };
        self.apply_highlight_focus();
    }

    pub fn highlight_entry(&mut self, entry_index: usize) {
        self.highlight_row(entry_index + usize::from(self.has_back_row()));
    }

    /// Moves the highlight one row forward or backward, wrapping at the ends.
    pub fn cycle_highlight(&mut self, forward: bool) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let next = if forward {
            (self.highlighted + 1) % count
        } else {
            (self.highlighted + count - 1) % count
        };
        self.highlight_row(next);
    }

    /// Focus flag of the highlighted row, if any.
    pub fn highlighted_flag(&self) -> Option<FocusFlag> {
        match self.highlighted_row()? {
            DrawerRow::Back => Some(self.back_focus.clone()),
            DrawerRow::Entry(index) => self.entry_focus_flags.get(index).cloned(),
        }
    }

    /// Activates the highlighted row.
    pub fn activate_highlighted(&mut self) -> Vec<Effect> {
        match self.highlighted_row() {
            Some(DrawerRow::Back) => self.go_back(),
            Some(DrawerRow::Entry(index)) => self.activate_entry(index),
            None => Vec::new(),
        }
    }

    /// Activates the entry at `index` of the visible level.
    pub fn activate_entry(&mut self, index: usize) -> Vec<Effect> {
        let Some(entry) = self.visible_entries().get(index).cloned() else {
            return Vec::new();
        };
        self.navigate(|controller| controller.interact(&entry))
    }

    /// Goes up one level; does nothing at the root.
    pub fn go_back(&mut self) -> Vec<Effect> {
        if self.controller.is_at_root() {
            return Vec::new();
        }
        self.navigate(|controller| {
            controller.ascend();
            Vec::new()
        })
    }

    /// Escape semantics: ascend inside a submenu, close at the root.
    pub fn close_or_ascend(&mut self) -> Vec<Effect> {
        self.navigate(NavigationController::close_or_ascend)
    }

    /// Runs a controller operation and starts a slide when the depth changed.
    fn navigate(&mut self, operation: impl FnOnce(&mut NavigationController) -> Vec<Effect>) -> Vec<Effect> {
        let from_depth = self.controller.depth();
        let came_from = self.controller.path().last().map(str::to_owned);
        let outgoing = OutgoingLevel {
            entries: self.visible_entries().to_vec(),
            at_root: self.controller.is_at_root(),
            highlighted: self.highlighted,
            scroll_top: self.scroll_top,
        };

        let effects = operation(&mut self.controller);

        let to_depth = self.controller.depth();
        if to_depth != from_depth {
            let direction = self.controller.direction();
            debug!(from_depth, to_depth, ?direction, "level changed");
            self.slide = Some(ActiveSlide {
                transition: PanelTransition::new(direction, from_depth, to_depth),
                outgoing,
            });
            self.last_tick = Some(Instant::now());
            self.scroll_top = 0;
            self.rebuild_entry_focus_flags();
            match (direction, came_from) {
                (SlideDirection::Backward, Some(id)) => {
                    let index = self.visible_entries().iter().position(|entry| entry.id == id).unwrap_or(0);
                    self.highlight_entry(index);
                }
                _ => self.highlight_entry(0),
            }
        }
        effects
    }

    /// Whether a slide or a height change is still running.
    pub fn is_animating(&self) -> bool {
        self.slide.is_some() || self.height.is_some_and(|height| !height.is_complete())
    }

    /// Advances animations by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = self.last_tick.map(|last| now.saturating_duration_since(last)).unwrap_or_default();
        self.advance(dt);
        self.last_tick = if self.is_animating() { Some(now) } else { None };
    }

    /// Advances animations by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(slide) = self.slide.as_mut() {
            slide.transition.tick(dt);
            if slide.transition.is_complete() {
                self.slide = None;
            }
        }
        if let Some(height) = self.height.as_mut() {
            height.tick(dt);
        }
    }

    /// Drops any height animation; the next frame draws at its target size.
    pub fn settle_height(&mut self) {
        self.height = None;
    }

    /// Retargets the sheet height and returns the height to draw this frame.
    /// The first call after opening settles immediately.
    pub fn sync_height(&mut self, target: u16) -> u16 {
        match self.height.as_mut() {
            Some(height) => {
                let was_complete = height.is_complete();
                height.retarget(target);
                if was_complete && !height.is_complete() && self.last_tick.is_none() {
                    self.last_tick = Some(Instant::now());
                }
                height.current()
            }
            None => {
                self.height = Some(HeightTransition::settled(target));
                target
            }
        }
    }

    /// Updates the collection of entry focus flags to match the visible level.
    fn rebuild_entry_focus_flags(&mut self) {
        let length = self.visible_entries().len();
        self.entry_focus_flags = (0..length).map(|i| FocusFlag::named(&format!("drawer.entry.{i}"))).collect();
        self.highlight_row(self.highlighted);
    }

    /// Applies the highlighted row to the focus flags.
    fn apply_highlight_focus(&mut self) {
        let row = self.highlighted_row();
        self.back_focus.set(row == Some(DrawerRow::Back));
        for (i, flag) in self.entry_focus_flags.iter().enumerate() {
            flag.set(row == Some(DrawerRow::Entry(i)));
        }
    }
}

impl HasFocus for DrawerState {
    /// Builds a focus subtree: the back row (when shown) followed by one leaf
    /// per entry, under the container flag.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        if self.has_back_row() {
            builder.leaf_widget(&self.back_focus);
        }
        for flag in &self.entry_focus_flags {
            builder.leaf_widget(flag);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.sheet_area
    }
}

/// Header text for a level: the menu title (or "Navigation Menu") at the
/// root, otherwise the first visible entry's label, or "Submenu" when the
/// level is empty.
pub fn level_title(root_title: Option<&str>, entries: &[MenuEntry], at_root: bool) -> String {
    if at_root {
        return root_title.unwrap_or(ROOT_TITLE).to_string();
    }
    entries
        .first()
        .map(|entry| entry.label.clone())
        .unwrap_or_else(|| SUBMENU_TITLE.to_string())
}

/// Maps a row index to the row it designates.
pub fn row_at(row: usize, has_back_row: bool, entry_count: usize) -> Option<DrawerRow> {
    match (has_back_row, row) {
        (true, 0) => Some(DrawerRow::Back),
        (true, row) if row - 1 < entry_count => Some(DrawerRow::Entry(row - 1)),
        (false, row) if row < entry_count => Some(DrawerRow::Entry(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestdrawer_types::ActionId;

    fn menu() -> Arc<Menu> {
        Arc::new(Menu::new(vec![
            MenuEntry::new("settings", "Settings").with_children(vec![
                MenuEntry::new("profile", "Profile").with_action("profile.open"),
                MenuEntry::new("security", "Security").with_children(vec![MenuEntry::new("password", "Password").with_action("pw")]),
            ]),
            MenuEntry::new("help", "Help").with_action("help.open"),
            MenuEntry::new("about", "About").with_children(vec![MenuEntry::new("version", "Version")]),
        ]))
    }

    #[test]
    fn starts_open_at_root_with_first_entry_highlighted() {
        let state = DrawerState::new(menu());
        assert!(state.is_open());
        assert!(!state.has_back_row());
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Entry(0)));
        assert!(state.entry_focus_flags[0].get());
        assert_eq!(state.title(), ROOT_TITLE);
        assert!(!state.is_animating());
    }

    #[test]
    fn descending_starts_a_forward_slide_and_highlights_first_entry() {
        let mut state = DrawerState::new(menu());
        let effects = state.activate_entry(0);
        assert!(effects.is_empty());
        assert_eq!(state.path().segments(), ["settings"]);
        assert!(state.has_back_row());
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Entry(0)));

        let slide = state.slide().expect("slide running");
        assert_eq!(slide.transition.direction(), SlideDirection::Forward);
        assert_eq!((slide.transition.from_depth(), slide.transition.to_depth()), (0, 1));
        assert_eq!(slide.outgoing.entries.len(), 3);
        assert!(slide.outgoing.at_root);
        assert_eq!(state.title(), "Profile");
    }

    #[test]
    fn going_back_highlights_the_entry_we_came_from() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(2);
        assert_eq!(state.path().segments(), ["about"]);
        let effects = state.go_back();
        assert!(effects.is_empty());
        assert!(state.path().is_root());
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Entry(2)));
        assert_eq!(state.slide().map(|s| s.transition.direction()), Some(SlideDirection::Backward));
    }

    #[test]
    fn leaf_activation_returns_activate_then_close() {
        let mut state = DrawerState::new(menu());
        let effects = state.activate_entry(1);
        assert_eq!(effects, vec![Effect::Activate(ActionId::from("help.open")), Effect::CloseDrawer]);
        assert!(state.slide().is_none());
    }

    #[test]
    fn inert_leaf_does_nothing() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(2);
        state.advance(Duration::from_secs(1));
        assert!(state.activate_entry(0).is_empty());
        assert_eq!(state.path().segments(), ["about"]);
        assert!(state.slide().is_none());
    }

    #[test]
    fn escape_ascends_then_closes() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(0);
        state.activate_entry(1);
        assert_eq!(state.path().depth(), 2);
        assert!(state.close_or_ascend().is_empty());
        assert_eq!(state.path().segments(), ["settings"]);
        assert!(state.close_or_ascend().is_empty());
        assert_eq!(state.close_or_ascend(), vec![Effect::CloseDrawer]);
    }

    #[test]
    fn highlight_cycles_through_back_row_and_wraps() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(0);
        assert_eq!(state.row_count(), 3);
        state.cycle_highlight(true);
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Entry(1)));
        state.cycle_highlight(true);
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Back));
        assert!(state.back_focus.get());
        state.cycle_highlight(false);
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Entry(1)));
        assert!(state.entry_focus_flags[1].get());
        assert!(!state.back_focus.get());
    }

    #[test]
    fn activating_back_row_ascends() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(0);
        state.highlight_row(0);
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Back));
        state.activate_highlighted();
        assert!(state.path().is_root());
    }

    #[test]
    fn go_back_at_root_is_a_no_op() {
        let mut state = DrawerState::new(menu());
        assert!(state.go_back().is_empty());
        assert!(state.slide().is_none());
    }

    #[test]
    fn slide_finishes_after_its_duration() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(0);
        state.advance(Duration::from_millis(150));
        assert!(state.is_animating());
        state.advance(Duration::from_millis(150));
        assert!(state.slide().is_none());
        assert!(!state.is_animating());
    }

    #[test]
    fn first_height_sync_settles_then_animates_on_change() {
        let mut state = DrawerState::new(menu());
        assert_eq!(state.sync_height(10), 10);
        assert!(!state.is_animating());
        assert_eq!(state.sync_height(6), 10);
        assert!(state.is_animating());
        state.advance(Duration::from_millis(250));
        assert_eq!(state.sync_height(6), 6);
    }

    #[test]
    fn settling_height_skips_the_running_animation() {
        let mut state = DrawerState::new(menu());
        state.sync_height(10);
        assert_eq!(state.sync_height(4), 10);
        state.settle_height();
        assert!(!state.is_animating());
        assert_eq!(state.sync_height(4), 4);
    }

    #[test]
    fn reopen_resets_to_root() {
        let mut state = DrawerState::new(menu());
        state.activate_entry(0);
        state.close();
        assert!(!state.is_open());
        state.open();
        assert!(state.is_open());
        assert!(state.path().is_root());
        assert!(state.slide().is_none());
        assert_eq!(state.highlighted_row(), Some(DrawerRow::Entry(0)));
    }

    #[test]
    fn titles_follow_level() {
        let entries = vec![MenuEntry::new("x", "First"), MenuEntry::new("y", "Second")];
        assert_eq!(level_title(None, &entries, true), ROOT_TITLE);
        assert_eq!(level_title(Some("Main"), &entries, true), "Main");
        assert_eq!(level_title(None, &entries, false), "First");
        assert_eq!(level_title(None, &[], false), SUBMENU_TITLE);
    }

    #[test]
    fn row_mapping() {
        assert_eq!(row_at(0, true, 2), Some(DrawerRow::Back));
        assert_eq!(row_at(2, true, 2), Some(DrawerRow::Entry(1)));
        assert_eq!(row_at(3, true, 2), None);
        assert_eq!(row_at(1, false, 2), Some(DrawerRow::Entry(1)));
        assert_eq!(row_at(0, false, 0), None);
    }
}
