//! Component system for the drawer TUI.
//!
//! Components are self-contained UI elements that handle their own events and
//! rendering while keeping their state on [`App`]. They never mutate global
//! state beyond their own slice of `App`; anything that crosses component
//! boundaries (activating an action, closing the drawer) is reported back as
//! an [`Effect`] for the runtime to apply.

use crossterm::event::{KeyEvent, MouseEvent};
use nestdrawer_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI component with localized behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: the runtime forwards input through `handle_key_events` and
///    `handle_mouse_events` to whichever component owns the input.
/// 2. **Messages**: `handle_message` receives ticks and resizes.
/// 3. **Rendering**: `render` draws into the provided area and records any
///    geometry needed for hit testing.
pub(crate) trait Component {
    /// Handle a runtime message such as an animation tick.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component owns input.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events when this component owns input.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations may record the areas they drew into on `app` so that
    /// later mouse events can be hit tested.
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App);

    /// Key hints shown in the status line while this component owns input.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Areas this component would lay out inside `area`.
    fn get_preferred_layout(&self, _app: &App, _area: Rect) -> Vec<Rect> {
        Vec::new()
    }
}

/// Returns the index of the area in `areas` containing `(x, y)`, but only if
/// the point is also inside `container`.
pub(crate) fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    if !contains(container, x, y) {
        return None;
    }
    areas.iter().position(|area| contains(area, x, y))
}

pub(crate) fn contains(area: &Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x.saturating_add(area.width) && y >= area.y && y < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_row_under_the_pointer() {
        let container = Rect::new(0, 0, 20, 10);
        let rows = [Rect::new(1, 1, 18, 1), Rect::new(1, 2, 18, 2)];
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 5, 1), Some(0));
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 5, 3), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 5, 4), None);
    }

    #[test]
    fn ignores_points_outside_the_container() {
        let container = Rect::new(0, 0, 10, 2);
        let rows = [Rect::new(0, 0, 30, 30)];
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 15, 1), None);
        assert!(!contains(&Rect::new(2, 2, 0, 0), 2, 2));
    }
}
