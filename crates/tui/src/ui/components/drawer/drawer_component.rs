use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use nestdrawer_types::{Effect, MenuEntry, Msg};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::state::ActiveSlide;
use crate::app::App;
use crate::ui::components::component::{Component, contains, find_target_index_by_mouse_position};
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::{blit_shifted, bottom_sheet_rect, max_sheet_height, truncate_to_width};

/// Column at which wrapped descriptions start.
const DESCRIPTION_INDENT: u16 = 4;
const CHEVRON: &str = "›";
const BACK_LABEL: &str = "‹ Back";
/// Sheet rows that are not level content: two borders and the hint row.
const SHEET_CHROME_ROWS: u16 = 3;

/// Bottom-sheet drawer with drill-down navigation.
///
/// Renders the dimmed overlay, the sheet, the back row and the visible level.
/// Level swaps slide the outgoing and incoming levels simultaneously; each
/// level is drawn into an off-screen buffer and copied into the frame at its
/// animated offset.
#[derive(Debug, Default)]
pub struct DrawerComponent;

impl DrawerComponent {
    pub fn new() -> Self {
        Self
    }
}

impl Component for DrawerComponent {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => app.drawer.tick(),
            // Sheet geometry is recomputed from the new area on the next frame.
            Msg::Resize(..) => app.drawer.settle_height(),
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let state = &mut app.drawer;
        match key.code {
            KeyCode::Esc => state.close_or_ascend(),
            KeyCode::Down | KeyCode::Tab => {
                state.cycle_highlight(true);
                Vec::new()
            }
            KeyCode::Up | KeyCode::BackTab => {
                state.cycle_highlight(false);
                Vec::new()
            }
            KeyCode::Home => {
                state.highlight_row(0);
                Vec::new()
            }
            KeyCode::End => {
                state.highlight_row(usize::MAX);
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Char(' ') => state.activate_highlighted(),
            KeyCode::Right => match state.highlighted_entry_index() {
                Some(index) if state.visible_entries()[index].has_children() => state.activate_entry(index),
                _ => Vec::new(),
            },
            KeyCode::Left | KeyCode::Backspace => state.go_back(),
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let state = &mut app.drawer;
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if state.sheet_area.is_empty() {
                    return Vec::new();
                }
                if !contains(&state.sheet_area, x, y) {
                    return vec![Effect::CloseDrawer];
                }
                if state.back_area.is_some_and(|area| contains(&area, x, y)) {
                    return state.go_back();
                }
                if let Some(index) = find_target_index_by_mouse_position(&state.sheet_area, &state.per_entry_areas, x, y) {
                    state.highlight_entry(index);
                    return state.activate_entry(index);
                }
                Vec::new()
            }
            MouseEventKind::Moved => {
                if let Some(index) = find_target_index_by_mouse_position(&state.sheet_area, &state.per_entry_areas, x, y) {
                    state.highlight_entry(index);
                } else if state.back_area.is_some_and(|area| contains(&area, x, y)) {
                    state.highlight_row(0);
                }
                Vec::new()
            }
            MouseEventKind::ScrollDown => {
                state.cycle_highlight(true);
                Vec::new()
            }
            MouseEventKind::ScrollUp => {
                state.cycle_highlight(false);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &mut app.drawer;

        frame.render_widget(Block::default().style(theme.modal_background_style()).dim(), area);

        let probe = bottom_sheet_rect(area, max_sheet_height(area));
        let inner_width = probe.width.saturating_sub(2);
        let target_height = level_rows(state.visible_entries(), state.has_back_row(), inner_width).saturating_add(SHEET_CHROME_ROWS);
        let height = state.sync_height(target_height);
        let sheet = bottom_sheet_rect(area, height);

        frame.render_widget(Clear, sheet);
        let title = state.title();
        let block = th::block(theme, Some(title.as_str()), true);
        let inner = block.inner(sheet);
        frame.render_widget(block, sheet);

        state.sheet_area = sheet;
        state.back_area = None;
        state.per_entry_areas = vec![Rect::default(); state.visible_entries().len()];
        if inner.is_empty() {
            return;
        }

        let [content, hints] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let heights: Vec<u16> = state.visible_entries().iter().map(|entry| entry_height(entry, content.width)).collect();
        let available = content.height.saturating_sub(u16::from(state.has_back_row()));
        state.scroll_top = scroll_to_reveal(&heights, available, state.highlighted_entry_index(), state.scroll_top);

        let current = LevelView {
            entries: state.visible_entries(),
            has_back_row: state.has_back_row(),
            highlighted: state.highlighted_index(),
            scroll_top: state.scroll_top,
        };
        let mut level_buffer = Buffer::empty(Rect::new(0, 0, content.width, content.height));
        let geometry = render_level(&mut level_buffer, &current, theme);

        match state.slide().cloned() {
            Some(slide) => render_slide(frame.buffer_mut(), content, &slide, &level_buffer, theme),
            None => blit_shifted(&level_buffer, frame.buffer_mut(), content, 0, false),
        }

        state.back_area = geometry.back.map(|rect| translate(rect, content));
        state.per_entry_areas = geometry.entries.into_iter().map(|rect| translate(rect, content)).collect();

        let hint_pairs: &[(&str, &str)] = if state.has_back_row() {
            &[("Esc", " Back  "), ("↑/↓", " Move  "), ("Enter", " Select")]
        } else {
            &[("Esc", " Close  "), ("↑/↓", " Move  "), ("Enter", " Select")]
        };
        let hint_line = Line::from(th::build_hint_spans(theme, hint_pairs));
        frame.render_widget(Paragraph::new(hint_line).style(th::panel_style(theme)), hints);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("Esc", " Close or back  "), ("←", " Back  "), ("→", " Open submenu")])
    }
}

/// Draws both halves of a level swap into `target`.
fn render_slide(target: &mut Buffer, content: Rect, slide: &ActiveSlide, incoming_buffer: &Buffer, theme: &dyn Theme) {
    let outgoing = LevelView {
        entries: &slide.outgoing.entries,
        has_back_row: !slide.outgoing.at_root,
        highlighted: slide.outgoing.highlighted,
        scroll_top: slide.outgoing.scroll_top,
    };
    let mut outgoing_buffer = Buffer::empty(Rect::new(0, 0, content.width, content.height));
    render_level(&mut outgoing_buffer, &outgoing, theme);

    target.set_style(content, th::panel_style(theme));
    for (buffer, frame) in [
        (&outgoing_buffer, slide.transition.outgoing()),
        (incoming_buffer, slide.transition.incoming()),
    ] {
        if frame.opacity <= 0.0 {
            continue;
        }
        blit_shifted(buffer, target, content, frame.offset_cells(content.width), frame.opacity < 0.5);
    }
}

/// What to draw for one level.
struct LevelView<'a> {
    entries: &'a [MenuEntry],
    has_back_row: bool,
    /// Highlighted row, counting the back row.
    highlighted: usize,
    scroll_top: usize,
}

/// Row areas produced by [`render_level`], relative to the level buffer.
#[derive(Debug, Default)]
struct LevelGeometry {
    back: Option<Rect>,
    entries: Vec<Rect>,
}

/// Renders a level into `buffer`, whose area is the sheet content area moved
/// to the origin.
fn render_level(buffer: &mut Buffer, level: &LevelView<'_>, theme: &dyn Theme) -> LevelGeometry {
    let area = buffer.area;
    buffer.set_style(area, th::panel_style(theme));
    let mut geometry = LevelGeometry {
        back: None,
        entries: vec![Rect::default(); level.entries.len()],
    };
    if area.is_empty() {
        return geometry;
    }

    let mut y = 0u16;
    if level.has_back_row {
        let row = Rect::new(0, 0, area.width, 1);
        let highlighted = level.highlighted == 0;
        buffer.set_style(row, th::row_style(theme, highlighted));
        buffer.set_string(1, 0, BACK_LABEL, theme.accent_secondary_style());
        geometry.back = Some(row);
        y = 1;
    }

    let first_entry_row = usize::from(level.has_back_row);
    for (index, entry) in level.entries.iter().enumerate().skip(level.scroll_top) {
        if y >= area.height {
            break;
        }
        let height = entry_height(entry, area.width).min(area.height - y);
        let row = Rect::new(0, y, area.width, height);
        let highlighted = level.highlighted == index + first_entry_row;
        render_entry(buffer, row, entry, highlighted, theme);
        geometry.entries[index] = row;
        y += height;
    }
    geometry
}

/// Renders one entry: icon, label, chevron for submenus, wrapped description.
fn render_entry(buffer: &mut Buffer, row: Rect, entry: &MenuEntry, highlighted: bool, theme: &dyn Theme) {
    buffer.set_style(row, th::row_style(theme, highlighted));

    let mut label_style = if entry.is_interactive() {
        theme.text_primary_style()
    } else {
        theme.text_muted_style()
    };
    if highlighted {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![Span::raw(" ")];
    let mut used = 1usize;
    if let Some(icon) = entry.icon.as_deref() {
        spans.push(Span::styled(format!("{icon} "), theme.accent_secondary_style()));
        used += icon.width() + 1;
    }
    let chevron_room = if entry.has_children() { 3 } else { 1 };
    let label_room = usize::from(row.width).saturating_sub(used + chevron_room);
    spans.push(Span::styled(truncate_to_width(&entry.label, label_room), label_style));
    buffer.set_line(row.x, row.y, &Line::from(spans), row.width);

    if entry.has_children() && row.width >= 2 {
        buffer.set_string(row.right() - 2, row.y, CHEVRON, theme.accent_primary_style());
    }

    let Some(description) = entry.description.as_deref() else {
        return;
    };
    let wrap_width = description_width(row.width);
    let description_rows = row.height.saturating_sub(1);
    let lines = textwrap::wrap(description, wrap_width);
    for (offset, line) in (0..description_rows).zip(lines.iter()) {
        let y = row.y + 1 + offset;
        buffer.set_stringn(row.x + DESCRIPTION_INDENT, y, line, wrap_width, theme.text_muted_style());
    }
}

fn description_width(row_width: u16) -> usize {
    usize::from(row_width.saturating_sub(DESCRIPTION_INDENT + 1)).max(1)
}

/// Rows an entry occupies at `width` columns: the label row plus wrapped
/// description lines.
pub(crate) fn entry_height(entry: &MenuEntry, width: u16) -> u16 {
    let description_rows = entry
        .description
        .as_deref()
        .map(|text| textwrap::wrap(text, description_width(width)).len())
        .unwrap_or(0);
    u16::try_from(description_rows).unwrap_or(u16::MAX).saturating_add(1)
}

/// Content rows a level needs, including the back row, capped at `u16::MAX`.
pub(crate) fn level_rows(entries: &[MenuEntry], has_back_row: bool, width: u16) -> u16 {
    let rows: usize = entries.iter().map(|entry| usize::from(entry_height(entry, width))).sum();
    u16::try_from(rows + usize::from(has_back_row)).unwrap_or(u16::MAX)
}

/// Adjusts `scroll_top` so the highlighted entry fits inside `available` rows.
pub(crate) fn scroll_to_reveal(heights: &[u16], available: u16, highlighted: Option<usize>, scroll_top: usize) -> usize {
    let Some((highlighted, &height)) = highlighted.and_then(|index| heights.get(index).map(|height| (index, height))) else {
        return scroll_top.min(heights.len().saturating_sub(1));
    };
    let top = scroll_top.min(highlighted);
    // Walk back from the highlighted entry while the rows still fit.
    let mut start = highlighted;
    let mut used = usize::from(height);
    while start > top {
        let previous = usize::from(heights[start - 1]);
        if used + previous > usize::from(available) {
            break;
        }
        used += previous;
        start -= 1;
    }
    start
}

fn translate(rect: Rect, origin: Rect) -> Rect {
    if rect.is_empty() {
        return rect;
    }
    Rect::new(rect.x + origin.x, rect.y + origin.y, rect.width, rect.height).intersection(origin)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use crossterm::event::{KeyModifiers, MouseEvent};
    use nestdrawer_types::{ActionId, Menu};
    use ratatui::{Terminal, backend::TestBackend};

    use super::super::state::DrawerRow;
    use super::*;

    fn menu() -> Arc<Menu> {
        Arc::new(Menu::new(vec![
            MenuEntry::new("settings", "Settings")
                .with_icon("⚙")
                .with_description("Account and security")
                .with_children(vec![
                    MenuEntry::new("profile", "Profile").with_action("profile.open"),
                    MenuEntry::new("security", "Security").with_action("security.open"),
                ]),
            MenuEntry::new("help", "Help").with_action("help.open"),
        ]))
    }

    fn app() -> App {
        App::for_tests(menu())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(component: &mut DrawerComponent, app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
        terminal.draw(|frame| component.render(frame, frame.area(), app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).map(|x| buffer[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_root_level_with_title_chevron_and_description() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        let text = buffer_text(&draw(&mut component, &mut app));
        assert!(text.contains("Navigation Menu"));
        assert!(text.contains("Settings"));
        assert!(text.contains(CHEVRON));
        assert!(text.contains("Account and security"));
        assert!(text.contains("Help"));
        assert!(!text.contains(BACK_LABEL));
    }

    #[test]
    fn sheet_sits_at_the_bottom_and_records_hit_areas() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        draw(&mut component, &mut app);
        let sheet = app.drawer.sheet_area;
        assert_eq!(sheet.bottom(), 19);
        assert_eq!(sheet.width, 56);
        // borders + two entries (settings has a description line) + hints
        assert_eq!(sheet.height, 3 + 2 + 1);
        assert_eq!(app.drawer.per_entry_areas.len(), 2);
        assert_eq!(app.drawer.per_entry_areas[0].height, 2);
        assert!(app.drawer.back_area.is_none());
    }

    #[test]
    fn clicking_a_submenu_entry_descends_and_shows_back_row_after_slide() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        draw(&mut component, &mut app);
        let settings = app.drawer.per_entry_areas[0];

        let effects = component.handle_mouse_events(&mut app, click(settings.x + 1, settings.y));
        assert!(effects.is_empty());
        assert_eq!(app.drawer.path().segments(), ["settings"]);
        assert!(app.drawer.slide().is_some());

        app.drawer.advance(Duration::from_millis(300));
        let text = buffer_text(&draw(&mut component, &mut app));
        assert!(text.contains(BACK_LABEL));
        assert!(text.contains("Security"));
        assert!(app.drawer.back_area.is_some());
    }

    #[test]
    fn clicking_a_leaf_activates_then_closes() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        draw(&mut component, &mut app);
        let help = app.drawer.per_entry_areas[1];
        let effects = component.handle_mouse_events(&mut app, click(help.x + 2, help.y));
        assert_eq!(effects, vec![Effect::Activate(ActionId::from("help.open")), Effect::CloseDrawer]);
    }

    #[test]
    fn clicking_the_overlay_closes_even_inside_a_submenu() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        draw(&mut component, &mut app);
        app.drawer.activate_entry(0);
        app.drawer.advance(Duration::from_secs(1));
        draw(&mut component, &mut app);
        let effects = component.handle_mouse_events(&mut app, click(0, 0));
        assert_eq!(effects, vec![Effect::CloseDrawer]);
    }

    #[test]
    fn clicking_back_row_ascends() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        app.drawer.activate_entry(0);
        app.drawer.advance(Duration::from_secs(1));
        draw(&mut component, &mut app);
        let back = app.drawer.back_area.expect("back row rendered");
        let effects = component.handle_mouse_events(&mut app, click(back.x + 1, back.y));
        assert!(effects.is_empty());
        assert!(app.drawer.path().is_root());
    }

    #[test]
    fn keyboard_navigation() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        assert!(component.handle_key_events(&mut app, key(KeyCode::Right)).is_empty());
        assert_eq!(app.drawer.path().segments(), ["settings"]);

        assert!(component.handle_key_events(&mut app, key(KeyCode::Left)).is_empty());
        assert!(app.drawer.path().is_root());

        component.handle_key_events(&mut app, key(KeyCode::Down));
        assert_eq!(app.drawer.highlighted_row(), Some(DrawerRow::Entry(1)));
        assert!(component.handle_key_events(&mut app, key(KeyCode::Right)).is_empty());
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::Activate(ActionId::from("help.open")), Effect::CloseDrawer]);

        assert_eq!(component.handle_key_events(&mut app, key(KeyCode::Esc)), vec![Effect::CloseDrawer]);
    }

    #[test]
    fn slide_moves_outgoing_level_out_and_incoming_level_in() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        draw(&mut component, &mut app);
        app.drawer.activate_entry(0);

        app.drawer.advance(Duration::from_millis(10));
        let early = buffer_text(&draw(&mut component, &mut app));
        assert!(early.contains("Help"));
        assert!(!early.contains("Security"));

        app.drawer.advance(Duration::from_millis(140));
        let late = buffer_text(&draw(&mut component, &mut app));
        assert!(app.drawer.is_animating());
        assert!(late.contains("Security"));
        assert!(!late.contains("Help"));
    }

    #[test]
    fn scroll_keeps_highlighted_entry_visible() {
        let heights = [1, 1, 1, 1, 1];
        assert_eq!(scroll_to_reveal(&heights, 3, Some(4), 0), 2);
        assert_eq!(scroll_to_reveal(&heights, 3, Some(1), 2), 1);
        assert_eq!(scroll_to_reveal(&heights, 10, Some(4), 0), 0);
        assert_eq!(scroll_to_reveal(&[3, 3], 2, Some(1), 0), 1);
    }

    #[test]
    fn entry_height_counts_wrapped_description() {
        let entry = MenuEntry::new("x", "X").with_description("one two three four five six");
        assert_eq!(entry_height(&entry, 14), 4);
        assert_eq!(entry_height(&MenuEntry::new("y", "Y"), 14), 1);
        assert_eq!(level_rows(&[entry, MenuEntry::new("y", "Y")], true, 14), 6);
    }

    #[test]
    fn clicks_before_the_first_frame_are_ignored() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        assert!(component.handle_mouse_events(&mut app, click(0, 0)).is_empty());
        assert!(app.drawer.is_open());
    }

    #[test]
    fn resize_snaps_the_sheet_to_its_new_height() {
        let mut app = app();
        let mut component = DrawerComponent::new();
        draw(&mut component, &mut app);
        assert_eq!(app.drawer.sync_height(12), 6);
        component.handle_message(&mut app, Msg::Resize(60, 20));
        assert_eq!(app.drawer.sync_height(12), 12);
    }

    #[test]
    fn very_long_level_caps_row_count_and_still_renders() {
        let entries: Vec<MenuEntry> = (0..70_000)
            .map(|i| MenuEntry::new(format!("item-{i}"), format!("Item {i}")).with_action("noop"))
            .collect();
        assert_eq!(level_rows(&entries, true, 50), u16::MAX);
        assert_eq!(scroll_to_reveal(&vec![1; 70_000], 5, Some(69_999), 0), 69_995);

        let mut app = App::for_tests(Arc::new(Menu::new(entries)));
        let mut component = DrawerComponent::new();
        let text = buffer_text(&draw(&mut component, &mut app));
        assert!(text.contains("Item 0"));
        assert_eq!(app.drawer.sheet_area.bottom(), 19);
    }
}
