//! Dracula palette (<https://draculatheme.com/contribute>).

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

const BACKGROUND: Color = Color::Rgb(0x28, 0x2A, 0x36);
const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);
const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B);
const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C);
const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
const PURPLE: Color = Color::Rgb(0xBD, 0x93, 0xF9);
const RED: Color = Color::Rgb(0xFF, 0x55, 0x55);

// Shades below the background for the rail and floating popovers.
const RAIL: Color = Color::Rgb(0x21, 0x22, 0x2C);
const POPOVER: Color = Color::Rgb(0x1D, 0x1F, 0x27);

const ROLES: ThemeRoles = ThemeRoles {
    background: BACKGROUND,
    rail_bg: RAIL,
    surface: RAIL,
    badge_bg: CURRENT_LINE,
    popover_bg: POPOVER,
    border: CURRENT_LINE,
    focus: PURPLE,
    text: FOREGROUND,
    text_secondary: COMMENT,
    text_muted: COMMENT,
    accent: PINK,
    counter: CYAN,
    success: GREEN,
    warning: ORANGE,
    error: RED,
    selection_bg: CURRENT_LINE,
    selection_fg: FOREGROUND,
};

/// Default theme for truecolor terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraculaTheme;

impl DraculaTheme {
    pub const fn new() -> Self {
        Self
    }
}

impl Theme for DraculaTheme {
    fn roles(&self) -> &ThemeRoles {
        &ROLES
    }
}
