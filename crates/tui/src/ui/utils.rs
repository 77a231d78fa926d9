//! Layout and buffer helpers shared by the UI components.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthChar;

/// Widest the drawer sheet grows, in columns.
pub const SHEET_MAX_WIDTH: u16 = 56;
/// Horizontal gap between the sheet and the screen edges.
pub const SHEET_INSET: u16 = 2;

/// Creates a centered rectangular area within a given rectangle.
///
/// # Arguments
///
/// * `percent_x` - The width of the centered rectangle as a percentage (0-100)
/// * `percent_y` - The height of the centered rectangle as a percentage (0-100)
/// * `r` - The parent rectangle to center within
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Area of a bottom sheet `height` rows tall inside `area`.
///
/// The sheet is horizontally centered, keeps [`SHEET_INSET`] columns from
/// both edges, never exceeds [`SHEET_MAX_WIDTH`], and rests one row above the
/// bottom edge. The height is clamped so the sheet never covers the top row.
pub fn bottom_sheet_rect(area: Rect, height: u16) -> Rect {
    let width = area.width.saturating_sub(SHEET_INSET * 2).min(SHEET_MAX_WIDTH);
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width - width) / 2;
    let y = area.bottom().saturating_sub(height + 1).max(area.y);
    Rect::new(x, y, width, height)
}

/// Largest sheet height that fits inside `area`.
pub fn max_sheet_height(area: Rect) -> u16 {
    area.height.saturating_sub(2)
}

/// Copies `source` into `target` inside `clip`, shifted horizontally by
/// `offset` columns. Cells landing outside `clip` are dropped. With `dim`
/// set, copied cells get the DIM modifier.
pub fn blit_shifted(source: &Buffer, target: &mut Buffer, clip: Rect, offset: i32, dim: bool) {
    let source_area = source.area;
    for row in 0..source_area.height {
        for column in 0..source_area.width {
            let target_x = i32::from(clip.x) + i32::from(column) + offset;
            if target_x < i32::from(clip.x) || target_x >= i32::from(clip.right()) {
                continue;
            }
            let target_y = clip.y + row;
            if target_y >= clip.bottom() {
                continue;
            }
            let Some(cell) = source.cell((source_area.x + column, source_area.y + row)) else {
                continue;
            };
            let Some(slot) = target.cell_mut((target_x as u16, target_y)) else {
                continue;
            };
            *slot = cell.clone();
            if dim {
                slot.set_style(Style::default().add_modifier(Modifier::DIM));
            }
        }
    }
}

/// Truncates `text` to at most `max_width` display columns, appending an
/// ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn sheet_is_centered_inset_and_capped() {
        let wide = bottom_sheet_rect(Rect::new(0, 0, 100, 30), 10);
        assert_eq!(wide.width, SHEET_MAX_WIDTH);
        assert_eq!(wide.x, 22);
        assert_eq!(wide.bottom(), 29);

        let narrow = bottom_sheet_rect(Rect::new(0, 0, 30, 8), 20);
        assert_eq!(narrow.width, 26);
        assert_eq!(narrow.x, 2);
        assert_eq!(narrow.height, 6);
        assert_eq!(narrow.y, 1);
    }

    #[test]
    fn blit_shifts_and_clips() {
        let mut source = Buffer::empty(Rect::new(0, 0, 4, 1));
        source.set_string(0, 0, "abcd", Style::default().fg(Color::Red));
        let mut target = Buffer::empty(Rect::new(0, 0, 6, 1));

        blit_shifted(&source, &mut target, Rect::new(1, 0, 4, 1), 2, false);
        let row: String = (0..6).map(|x| target[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, "   ab ");
    }

    #[test]
    fn blit_can_dim() {
        let mut source = Buffer::empty(Rect::new(0, 0, 1, 1));
        source.set_string(0, 0, "x", Style::default());
        let mut target = Buffer::empty(Rect::new(0, 0, 1, 1));
        blit_shifted(&source, &mut target, Rect::new(0, 0, 1, 1), 0, true);
        assert!(target[(0, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("Settings", 20), "Settings");
        assert_eq!(truncate_to_width("Settings", 5), "Sett…");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
