use super::{ansi256, dracula, nord, roles::ThemeRoles};

/// Describes a selectable theme inside the TUI.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> ThemeRoles,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> PaletteTheme {
        PaletteTheme { roles: (self.factory)() }
    }
}

/// A theme backed by a fixed set of roles.
#[derive(Debug, Clone)]
pub struct PaletteTheme {
    roles: ThemeRoles,
}

impl super::Theme for PaletteTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Ordered list of selectable themes.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "dracula",
        label: "Dracula",
        aliases: &["dracula", "default"],
        is_ansi_fallback: false,
        factory: dracula::roles,
    },
    ThemeDefinition {
        id: "nord",
        label: "Nord",
        aliases: &["nord", "polar"],
        is_ansi_fallback: false,
        factory: nord::roles,
    },
    ThemeDefinition {
        id: "ansi256",
        label: "ANSI 256",
        aliases: &["ansi256", "ansi", "256"],
        is_ansi_fallback: true,
        factory: ansi256::roles,
    },
];

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let name = name.trim();
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(name) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    THEME_DEFINITIONS
        .iter()
        .find(|definition| definition.is_ansi_fallback)
        .unwrap_or(&THEME_DEFINITIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_matches_ids_and_aliases_case_insensitively() {
        assert_eq!(resolve("NORD").map(|d| d.id), Some("nord"));
        assert_eq!(resolve(" polar ").map(|d| d.id), Some("nord"));
        assert_eq!(resolve("256").map(|d| d.id), Some("ansi256"));
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn defaults_point_at_expected_palettes() {
        assert_eq!(default_truecolor().id, "dracula");
        assert_eq!(default_ansi().id, "ansi256");
        assert!(THEME_DEFINITIONS.iter().filter(|d| d.is_ansi_fallback).count() >= 1);
    }

    #[test]
    fn build_produces_roles_from_palette() {
        use super::super::Theme;
        let theme = resolve("dracula").expect("registered").build();
        assert_eq!(theme.roles().background, dracula::BG);
    }
}
