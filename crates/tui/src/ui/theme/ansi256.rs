//! ANSI 256-color fallback for terminals without truecolor support.
//!
//! Approximates the Dracula palette with indexed colors so the drawer stays
//! legible inside macOS Terminal and other 8-bit color terminals.

use ratatui::style::Color;

use super::roles::ThemeRoles;

pub fn roles() -> ThemeRoles {
    ThemeRoles {
        background: Color::Indexed(236),
        surface: Color::Indexed(236),
        border: Color::Indexed(239),

        text: Color::Indexed(255),
        text_secondary: Color::Indexed(250),
        text_muted: Color::Indexed(247),

        accent_primary: Color::Indexed(212),
        accent_secondary: Color::Indexed(117),
        success: Color::Indexed(84),

        selection_bg: Color::Indexed(239),
        selection_fg: Color::Indexed(255),
        focus: Color::Indexed(117),

        modal_bg: Color::Indexed(232),
    }
}
