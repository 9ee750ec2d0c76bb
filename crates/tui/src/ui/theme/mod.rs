//! Palettes, style roles and widget builders.
//!
//! The active theme lives on the `App` and is passed to render code as
//! `&dyn Theme`.

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};

/// Environment variable selecting a theme by id or alias.
pub const THEME_ENV: &str = "RAIL_THEME";
/// Environment variable forcing the color capability (`truecolor` or `ansi256`).
pub const COLOR_MODE_ENV: &str = "RAIL_COLOR_MODE";

/// Where the active theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// `--theme` on the command line.
    Explicit,
    /// Forced because the terminal lacks truecolor.
    AnsiFallback,
    Environment,
    Preference,
    Default,
}

/// Theme plus how it was chosen.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub source: ThemeSource,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    fn new(definition: &'static ThemeDefinition, source: ThemeSource) -> Self {
        debug!(theme = definition.id, ?source, "theme resolved");
        Self {
            definition,
            source,
            theme: definition.build(),
        }
    }
}

fn named(name: Option<&str>) -> Option<&'static ThemeDefinition> {
    catalog::resolve(name?.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Picks the palette for this session.
///
/// An explicit name always wins. Otherwise 256-color terminals get the ANSI
/// palette, and truecolor terminals take `RAIL_THEME`, then the saved
/// preference, then Dracula. Unknown names are skipped.
pub fn load(explicit: Option<&str>, preferred: Option<&str>) -> LoadedTheme {
    if let Some(definition) = named(explicit) {
        return LoadedTheme::new(definition, ThemeSource::Explicit);
    }
    if detect_color_capability() == ColorCapability::Ansi256 {
        return LoadedTheme::new(catalog::default_ansi(), ThemeSource::AnsiFallback);
    }
    if let Some(definition) = named(env::var(THEME_ENV).ok().as_deref()) {
        return LoadedTheme::new(definition, ThemeSource::Environment);
    }
    match named(preferred) {
        Some(definition) => LoadedTheme::new(definition, ThemeSource::Preference),
        None => LoadedTheme::new(catalog::default_truecolor(), ThemeSource::Default),
    }
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var(COLOR_MODE_ENV).ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_choice_wins_even_on_ansi_terminals() {
        temp_env::with_vars([(COLOR_MODE_ENV, Some("ansi256")), (THEME_ENV, Some("dracula"))], || {
            let loaded = load(Some("nord"), None);
            assert_eq!(loaded.definition.id, "nord");
            assert_eq!(loaded.source, ThemeSource::Explicit);
        });
    }

    #[test]
    fn ansi_terminals_get_fallback() {
        temp_env::with_vars([(COLOR_MODE_ENV, Some("256")), (THEME_ENV, None::<&str>)], || {
            let loaded = load(None, Some("nord"));
            assert_eq!(loaded.definition.id, "ansi256");
            assert_eq!(loaded.source, ThemeSource::AnsiFallback);
        });
    }

    #[test]
    fn env_beats_preference_on_truecolor() {
        temp_env::with_vars([(COLOR_MODE_ENV, Some("truecolor")), (THEME_ENV, Some("nord"))], || {
            assert_eq!(load(None, Some("dracula")).definition.id, "nord");
        });
    }

    #[test]
    fn preference_used_without_env() {
        temp_env::with_vars([(COLOR_MODE_ENV, Some("24bit")), (THEME_ENV, None::<&str>)], || {
            let loaded = load(None, Some(" Polar "));
            assert_eq!(loaded.definition.id, "nord");
            assert_eq!(loaded.source, ThemeSource::Preference);
        });
    }

    #[test]
    fn unknown_names_fall_through_to_default() {
        temp_env::with_vars([(COLOR_MODE_ENV, Some("truecolor")), (THEME_ENV, Some("nope"))], || {
            let loaded = load(Some("also-nope"), Some("nope"));
            assert_eq!(loaded.definition.id, "dracula");
            assert_eq!(loaded.source, ThemeSource::Default);
        });
    }
}
