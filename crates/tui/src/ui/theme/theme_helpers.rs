use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for a focused or hovered row inside a list.
pub fn row_style<T: Theme + ?Sized>(theme: &T, highlighted: bool) -> Style {
    if highlighted {
        theme.selection_style().add_modifier(Modifier::BOLD)
    } else {
        panel_style(theme)
    }
}

/// Button style, filled with the selection color when focused.
pub fn button_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles {
        accent_primary,
        selection_bg,
        ..
    } = *theme.roles();
    let style = Style::default().fg(accent_primary).add_modifier(Modifier::BOLD);
    if focused { style.bg(selection_bg) } else { style }
}

/// Builds "key description" hint spans, e.g. `Esc Close  Enter Open`.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(key.to_string(), theme.accent_emphasis_style()));
        spans.push(Span::styled(description.to_string(), theme.text_muted_style()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_spans_alternate_key_and_description() {
        let theme = crate::ui::theme::catalog::default_truecolor().build();
        let spans = build_hint_spans(&theme, &[("Esc", " Close "), ("Enter", " Open")]);
        let text: Vec<&str> = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, vec!["Esc", " Close ", "Enter", " Open"]);
    }
}
