//! Dracula palette (https://draculatheme.com/contribute) mapped onto the
//! drawer's theme roles. Default for truecolor terminals.

use ratatui::style::Color;

use super::roles::ThemeRoles;

pub const BG: Color = Color::Rgb(0x28, 0x2A, 0x36); // #282a36
pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A); // #44475a
pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2); // #f8f8f2
pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4); // #6272a4

pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD); // #8be9fd
pub const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B); // #50fa7b
pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6); // #ff79c6

pub const BG_MODAL_OVERLAY: Color = Color::Rgb(0x1D, 0x1F, 0x27);

pub fn roles() -> ThemeRoles {
    ThemeRoles {
        background: BG,
        surface: BG,
        border: CURRENT_LINE,

        text: FOREGROUND,
        text_secondary: COMMENT,
        text_muted: COMMENT,

        // Pink marks interactive elements; cyan marks focus.
        accent_primary: PINK,
        accent_secondary: CYAN,
        success: GREEN,

        selection_bg: CURRENT_LINE,
        selection_fg: FOREGROUND,
        focus: CYAN,

        modal_bg: BG_MODAL_OVERLAY,
    }
}
