//! Home screen shown behind the drawer once it is closed.
//!
//! A single "Open Menu" button plus the list of actions activated so far.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use nestdrawer_types::Effect;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::ui::components::component::{Component, contains};
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::centered_rect;

const OPEN_LABEL: &str = "Open Menu";

#[derive(Debug, Clone)]
pub struct HomeState {
    /// Focus flag for the "Open Menu" button.
    pub open_button: FocusFlag,
    /// Last rendered button area for hit testing.
    pub button_area: Rect,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            open_button: FocusFlag::named("home.open"),
            button_area: Rect::default(),
        }
    }
}

impl HasFocus for HomeState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.open_button.clone()
    }

    fn area(&self) -> Rect {
        self.button_area
    }
}

#[derive(Debug, Default)]
pub struct HomeComponent;

impl Component for HomeComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => vec![Effect::OpenDrawer],
            KeyCode::Esc | KeyCode::Char('q') => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) && contains(&app.home.button_area, mouse.column, mouse.row) {
            return vec![Effect::OpenDrawer];
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let layout = self.get_preferred_layout(app, area);

        let focused = app.home.open_button.get();
        let button = Paragraph::new(OPEN_LABEL)
            .centered()
            .style(th::button_style(theme, focused))
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style(focused)));
        frame.render_widget(button, layout[0]);
        app.home.button_area = layout[0];

        let lines: Vec<Line> = if app.activated.is_empty() {
            vec![Line::from(Span::styled("No actions activated yet.", theme.text_muted_style()))]
        } else {
            app.activated
                .iter()
                .map(|action| Line::from(vec![Span::styled("✓ ", theme.status_success()), Span::styled(action.to_string(), theme.text_primary_style())]))
                .collect()
        };
        frame.render_widget(Paragraph::new(lines).block(th::block(theme, Some("Activated"), false)), layout[1]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("Enter", " Open menu  "), ("q", " Quit")])
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let column = centered_rect(60, 80, area);
        let [button_row, _, activated] = Layout::vertical([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3)]).areas(column);
        let [_, button, _] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(17), Constraint::Fill(1)]).areas(button_row);
        vec![button, activated]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use nestdrawer_types::{Menu, MenuEntry};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn keys_open_the_drawer_or_quit() {
        let mut app = App::for_tests(Arc::new(Menu::new(vec![MenuEntry::new("a", "A")])));
        let mut home = HomeComponent;
        assert_eq!(home.handle_key_events(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), vec![Effect::OpenDrawer]);
        assert_eq!(home.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)), vec![Effect::Quit]);
        assert!(home.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)).is_empty());
    }

    #[test]
    fn clicking_the_button_opens_the_drawer() {
        let mut app = App::for_tests(Arc::new(Menu::new(vec![MenuEntry::new("a", "A")])));
        let mut home = HomeComponent;
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| home.render(frame, frame.area(), &mut app)).expect("draw");

        let button = app.home.button_area;
        assert_eq!(button.width, 17);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: button.x + 1,
            row: button.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(home.handle_mouse_events(&mut app, click), vec![Effect::OpenDrawer]);
    }
}
