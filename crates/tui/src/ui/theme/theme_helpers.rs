use rail_types::Hue;
use rail_util::Translator;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Saturation used for project tints, as a fraction.
pub const TINT_SATURATION: f32 = 0.70;
/// Lightness used for project tints, as a fraction.
pub const TINT_LIGHTNESS: f32 = 0.60;
/// Opacity of the tinted badge background over the rail.
pub const TINT_BACKGROUND_ALPHA: f32 = 0.20;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
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

/// Block framing the rail column; the border lights up while a rail item
/// holds focus.
pub fn rail_block<T: Theme + ?Sized>(theme: &T, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(theme.rail_style())
}

/// Block used for popovers: rounded, elevated background.
pub fn popover_block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(true))
        .style(theme.popover_style())
        .padding(Padding::horizontal(1));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_primary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Converts HSL (hue in degrees, saturation and lightness as fractions) to RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |value: f32| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r1), channel(g1), channel(b1))
}

/// Blend `top` over `bottom` with the given opacity.
/// Non-RGB colors cannot be blended; `top` is returned unchanged for them.
pub fn blend_rgb(top: Color, bottom: Color, alpha: f32) -> Color {
    match (top, bottom) {
        (Color::Rgb(tr, tg, tb), Color::Rgb(br, bg, bb)) => {
            let a = alpha.clamp(0.0, 1.0);
            let mix = |t: u8, b: u8| (t as f32 * a + b as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(mix(tr, br), mix(tg, bg), mix(tb, bb))
        }
        (top, _) => top,
    }
}

/// Foreground and background colors of an active project badge.
///
/// The foreground is the project's hue at fixed saturation/lightness. The
/// background is the same color at 20% opacity over the rail background. On
/// indexed palettes the background falls back to the selection color.
pub fn project_tint<T: Theme + ?Sized>(theme: &T, hue: Hue) -> (Color, Color) {
    let (r, g, b) = hsl_to_rgb(f32::from(hue.degrees()), TINT_SATURATION, TINT_LIGHTNESS);
    let foreground = Color::Rgb(r, g, b);
    let ThemeRoles { rail_bg, selection_bg, .. } = *theme.roles();
    let background = match rail_bg {
        Color::Rgb(..) => blend_rgb(foreground, rail_bg, TINT_BACKGROUND_ALPHA),
        _ => selection_bg,
    };
    (foreground, background)
}

/// Style of an active project badge.
pub fn project_badge_active_style<T: Theme + ?Sized>(theme: &T, hue: Hue) -> Style {
    let (fg, bg) = project_tint(theme, hue);
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

/// Neutral badge style used for every inactive project.
pub fn project_badge_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { badge_bg, text, .. } = *theme.roles();
    Style::default().bg(badge_bg).fg(text)
}

/// Secondary button style (outline-like, rely on border color in Block).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, selected: bool) -> Style {
    if !enabled {
        return theme.text_muted_style();
    }
    let ThemeRoles {
        counter,
        selection_bg,
        ..
    } = *theme.roles();
    let style = Style::default().fg(counter);
    if selected { style.bg(selection_bg) } else { style }
}

/// Primary button style (filled accent background).
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles {
        accent,
        background,
        ..
    } = *theme.roles();
    let style = Style::default().bg(accent).fg(background);
    if focused { style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED) } else { style }
}

/// How a rail button should be drawn.
#[derive(Debug, Clone, Copy)]
pub struct ButtonRenderOptions {
    pub is_focused: bool,
    /// Overrides the label style (project tint, neutral badge, ...).
    pub style: Option<Style>,
    pub is_selected: bool,
}

impl ButtonRenderOptions {
    pub fn new(is_focused: bool, is_selected: bool) -> Self {
        Self {
            is_focused,
            style: None,
            is_selected,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Renders a rail button.
///
/// Focused buttons get a border; unfocused ones are padded to the same size
/// so labels stay put while focus moves.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, options: ButtonRenderOptions) {
    let borders = if options.is_focused { Borders::ALL } else { Borders::NONE };
    let padding = if borders.is_empty() {
        Padding::vertical(1)
    } else {
        Padding::ZERO
    };
    let style = options
        .style
        .unwrap_or_else(|| button_secondary_style(theme, true, options.is_selected));

    frame.render_widget(
        Paragraph::new(Span::styled(label.to_string(), style)).centered().block(
            Block::bordered()
                .borders(borders)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style(options.is_focused))
                .padding(padding),
        ),
        area,
    );
}

/// Build styled hint spans: each key in accent, followed by its description
/// looked up in `strings` and muted.
pub fn build_hint_spans<T: Theme + ?Sized>(
    theme: &T,
    strings: &Translator,
    hints: &[(&str, &str)],
) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description_key) in hints {
        spans.push(Span::styled(format!(" {key}"), theme.accent_bold_style()));
        spans.push(Span::styled(format!(" {}", strings.t(description_key)), theme.text_muted_style()));
    }
    spans
}
