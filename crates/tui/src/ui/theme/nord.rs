//! Nord palette (<https://www.nordtheme.com/docs/colors-and-palettes>).

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Polar Night
const NIGHT_0: Color = Color::Rgb(0x2E, 0x34, 0x40);
const NIGHT_1: Color = Color::Rgb(0x3B, 0x42, 0x52);
const NIGHT_2: Color = Color::Rgb(0x43, 0x4C, 0x5E);
const NIGHT_3: Color = Color::Rgb(0x4C, 0x56, 0x6A);
// Snow Storm
const SNOW_0: Color = Color::Rgb(0xD8, 0xDE, 0xE9);
const SNOW_1: Color = Color::Rgb(0xE5, 0xE9, 0xF0);
const SNOW_2: Color = Color::Rgb(0xEC, 0xEF, 0xF4);
// Frost
const FROST_1: Color = Color::Rgb(0x88, 0xC0, 0xD0);
const FROST_2: Color = Color::Rgb(0x81, 0xA1, 0xC1);
// Aurora
const RED: Color = Color::Rgb(0xBF, 0x61, 0x6A);
const ORANGE: Color = Color::Rgb(0xD0, 0x87, 0x70);
const YELLOW: Color = Color::Rgb(0xEB, 0xCB, 0x8B);
const GREEN: Color = Color::Rgb(0xA3, 0xBE, 0x8C);

const MUTED: Color = Color::Rgb(0x61, 0x6E, 0x88);
const POPOVER: Color = Color::Rgb(0x1A, 0x1E, 0x28);

const ROLES: ThemeRoles = ThemeRoles {
    background: NIGHT_0,
    rail_bg: NIGHT_0,
    surface: NIGHT_1,
    badge_bg: NIGHT_2,
    popover_bg: POPOVER,
    border: NIGHT_3,
    focus: FROST_2,
    text: SNOW_0,
    text_secondary: SNOW_1,
    text_muted: MUTED,
    accent: FROST_1,
    counter: YELLOW,
    success: GREEN,
    warning: ORANGE,
    error: RED,
    selection_bg: NIGHT_3,
    selection_fg: SNOW_2,
};

/// Cool, low-contrast theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NordTheme;

impl NordTheme {
    pub const fn new() -> Self {
        Self
    }
}

impl Theme for NordTheme {
    fn roles(&self) -> &ThemeRoles {
        &ROLES
    }
}

