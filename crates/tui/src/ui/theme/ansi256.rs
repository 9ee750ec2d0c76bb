//! Indexed-color palette for terminals without truecolor support.
//!
//! Colors are picked from the xterm 256-color cube to stay close to the
//! default theme. Project tints are still computed as RGB and left to the
//! terminal to downsample; badge backgrounds fall back to `selection_bg`.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

const fn xterm(index: u8) -> Color {
    Color::Indexed(index)
}

const ROLES: ThemeRoles = ThemeRoles {
    background: xterm(235),
    rail_bg: xterm(234),
    surface: xterm(234),
    badge_bg: xterm(238),
    popover_bg: xterm(233),
    border: xterm(238),
    focus: xterm(141),
    text: xterm(255),
    text_secondary: xterm(103),
    text_muted: xterm(245),
    accent: xterm(212),
    counter: xterm(117),
    success: xterm(84),
    warning: xterm(215),
    error: xterm(203),
    selection_bg: xterm(239),
    selection_fg: xterm(255),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi256Theme;

impl Ansi256Theme {
    pub const fn new() -> Self {
        Self
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &ROLES
    }
}
