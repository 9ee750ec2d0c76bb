use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Colors a palette assigns to each part of the rail and its host.
///
/// Components never name raw colors; they read a role here or ask the
/// [`Theme`] for a ready-made style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeRoles {
    /// Backdrop behind every pane.
    pub background: Color,
    /// Fill of the rail column.
    pub rail_bg: Color,
    /// Fill of the content pane. Project tints are blended over it.
    pub surface: Color,
    /// Fill of inactive project badges.
    pub badge_bg: Color,
    /// Fill of popovers anchored to the rail.
    pub popover_bg: Color,
    pub border: Color,
    /// Border and marker color of the focused element.
    pub focus: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Workspaces highlight and primary buttons.
    pub accent: Color,
    /// Star and online counters.
    pub counter: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
}

/// A palette plus the styles derived from it.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let roles = self.roles();
        fg(if focused { roles.focus } else { roles.border })
    }

    /// Base style of the rail column.
    fn rail_style(&self) -> Style {
        let roles = self.roles();
        Style::default().bg(roles.rail_bg).fg(roles.text)
    }

    fn popover_style(&self) -> Style {
        let roles = self.roles();
        Style::default().bg(roles.popover_bg).fg(roles.text)
    }

    fn selection_style(&self) -> Style {
        let roles = self.roles();
        Style::default().bg(roles.selection_bg).fg(roles.selection_fg)
    }

    fn success_style(&self) -> Style {
        fg(self.roles().success)
    }
    fn warning_style(&self) -> Style {
        fg(self.roles().warning)
    }
    fn error_style(&self) -> Style {
        fg(self.roles().error)
    }

    fn accent_style(&self) -> Style {
        fg(self.roles().accent)
    }
    fn accent_bold_style(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }
    fn counter_style(&self) -> Style {
        fg(self.roles().counter)
    }
}

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}
