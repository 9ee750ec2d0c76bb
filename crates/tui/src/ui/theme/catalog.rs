//! Registry of the palettes a user can pick by name.

use super::{Ansi256Theme, DraculaTheme, NordTheme, Theme};

/// A selectable palette.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Identifier stored in preferences.
    pub id: &'static str,
    pub label: &'static str,
    /// Extra names accepted on the command line and in `RAIL_THEME`.
    pub aliases: &'static [&'static str],
    /// Palette limited to indexed colors.
    pub is_ansi_fallback: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }

    /// Whether `name` is this palette's id or one of its aliases, ignoring ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        std::iter::once(self.id)
            .chain(self.aliases.iter().copied())
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}

const DRACULA: ThemeDefinition = ThemeDefinition {
    id: "dracula",
    label: "Dracula",
    aliases: &["default", "dark"],
    is_ansi_fallback: false,
    factory: || Box::new(DraculaTheme::new()),
};

const NORD: ThemeDefinition = ThemeDefinition {
    id: "nord",
    label: "Nord",
    aliases: &["polar"],
    is_ansi_fallback: false,
    factory: || Box::new(NordTheme::new()),
};

const ANSI256: ThemeDefinition = ThemeDefinition {
    id: "ansi256",
    label: "ANSI 256",
    aliases: &["ansi", "256"],
    is_ansi_fallback: true,
    factory: || Box::new(Ansi256Theme::new()),
};

static DEFINITIONS: [ThemeDefinition; 3] = [DRACULA, NORD, ANSI256];

/// Every palette, in display order.
pub fn all() -> &'static [ThemeDefinition] {
    &DEFINITIONS
}

pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    DEFINITIONS.iter().find(|definition| definition.matches(name))
}

/// Palette used when nothing was chosen and the terminal supports truecolor.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &DEFINITIONS[0]
}

/// Palette forced on terminals limited to 256 colors.
pub fn default_ansi() -> &'static ThemeDefinition {
    &DEFINITIONS[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_regardless_of_case() {
        assert_eq!(resolve("NORD").map(|d| d.id), Some("nord"));
        assert_eq!(resolve("Polar").map(|d| d.id), Some("nord"));
        assert_eq!(resolve("256").map(|d| d.id), Some("ansi256"));
        assert_eq!(resolve("default").map(|d| d.id), Some("dracula"));
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn defaults() {
        assert_eq!(default_truecolor().id, "dracula");
        assert!(!default_truecolor().is_ansi_fallback);
        assert!(default_ansi().is_ansi_fallback);
    }

    #[test]
    fn ids_are_unique() {
        for (index, definition) in all().iter().enumerate() {
            assert!(all()[index + 1..].iter().all(|other| !other.matches(definition.id)));
        }
    }
}
