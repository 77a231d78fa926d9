use crossterm::event::{KeyEvent, MouseEvent};
use nestdrawer_types::{Effect, Msg};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};

use super::components::{Component, DrawerComponent, HomeComponent};
use crate::app::App;

/// Root view: the home screen with the drawer layered on top while open.
#[derive(Debug, Default)]
pub struct MainView {
    pub home_view: HomeComponent,
    pub drawer_view: DrawerComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        if app.drawer.is_open() {
            return self.drawer_view.handle_message(app, msg);
        }
        self.home_view.handle_message(app, msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.drawer.is_open() {
            return self.drawer_view.handle_key_events(app, key);
        }
        self.home_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.drawer.is_open() {
            return self.drawer_view.handle_mouse_events(app, mouse);
        }
        self.home_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.home_view.render(frame, layout[0], app);

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[1]);

        if app.drawer.is_open() {
            self.drawer_view.render(frame, area, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        if app.drawer.is_open() {
            hint_spans.extend(self.drawer_view.get_hint_spans(app));
        } else {
            hint_spans.extend(self.home_view.get_hint_spans(app));
        }
        hint_spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let [content, hints] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        vec![content, hints]
    }
}
