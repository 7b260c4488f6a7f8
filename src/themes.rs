//! Built-in theme definitions.
//!
//! A small set of shippable themes registered at startup so the theme
//! picker is never empty. Each is an ordinary [`ThemeDef`]; user themes
//! registered under the same name replace them.

use std::collections::HashMap;

use crate::palette::ThemeDef;
use crate::registry::ThemeRegistry;

/// List of all built-in theme names, in registration order.
const BUILTIN_NAMES: &[&str] = &["classic", "ember", "midnight", "forest"];

/// Returns the built-in theme names, in registration order.
pub fn builtin_names() -> &'static [&'static str] {
    BUILTIN_NAMES
}

/// Returns a built-in theme by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<ThemeDef> {
    match name {
        "classic" => Some(classic()),
        "ember" => Some(ember()),
        "midnight" => Some(midnight()),
        "forest" => Some(forest()),
        _ => None,
    }
}

/// Register every built-in theme.
pub fn register_builtins(registry: &mut ThemeRegistry) {
    for name in BUILTIN_NAMES {
        if let Some(def) = get_builtin(name) {
            for warning in registry.register_def(&def) {
                log::warn!("built-in theme '{}': {}", name, warning.message);
            }
        }
    }
}

/// The default look under its own name: no overrides at all.
fn classic() -> ThemeDef {
    ThemeDef { name: "classic".to_string(), colors: HashMap::new() }
}

/// Warm oranges over the classic board.
fn ember() -> ThemeDef {
    ThemeDef {
        name: "ember".to_string(),
        colors: HashMap::from([
            ("accent".to_string(), "#FF8C42".to_string()),
            ("last-move".to_string(), "#E8A87C80".to_string()),
            ("move-dot".to_string(), "#C2541799".to_string()),
            ("capture-ring".to_string(), "#C2541799".to_string()),
            ("selection".to_string(), "#9C3F1166".to_string()),
            ("button-hover".to_string(), "#5A4636".to_string()),
        ]),
    }
}

/// Cool blue-gray dark board.
fn midnight() -> ThemeDef {
    ThemeDef {
        name: "midnight".to_string(),
        colors: HashMap::from([
            ("board-light".to_string(), "#8CA2AD".to_string()),
            ("board-dark".to_string(), "#4B6470".to_string()),
            ("board-border".to_string(), "#2E3C44".to_string()),
            ("panel-background".to_string(), "#1C232A".to_string()),
            ("panel-border".to_string(), "#34414B".to_string()),
            ("accent".to_string(), "#5C9BD1".to_string()),
            ("move-dot".to_string(), "#D9E4EA99".to_string()),
            ("capture-ring".to_string(), "#D9E4EA99".to_string()),
            ("button-background".to_string(), "#2A333C".to_string()),
            ("button-hover".to_string(), "#3A4752".to_string()),
        ]),
    }
}

/// Muted greens.
fn forest() -> ThemeDef {
    ThemeDef {
        name: "forest".to_string(),
        colors: HashMap::from([
            ("board-light".to_string(), "#EBECD0".to_string()),
            ("board-dark".to_string(), "#739552".to_string()),
            ("board-border".to_string(), "#4E6B36".to_string()),
            ("accent".to_string(), "#81B64C".to_string()),
            ("last-move".to_string(), "#F5F58280".to_string()),
            ("selection".to_string(), "#1B421266".to_string()),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ColorField;
    use crate::palette::OverridePalette;

    #[test]
    fn test_all_builtins_resolvable() {
        for name in builtin_names() {
            let def = get_builtin(name);
            assert!(def.is_some(), "built-in theme '{}' should exist", name);
            assert_eq!(def.unwrap().name, *name);
        }
    }

    #[test]
    fn test_unknown_builtin_is_none() {
        assert!(get_builtin("neon").is_none());
    }

    #[test]
    fn test_builtins_convert_without_warnings() {
        for name in builtin_names() {
            let def = get_builtin(name).unwrap();
            let (_, warnings) = OverridePalette::from_def(&def);
            assert!(
                warnings.is_empty(),
                "built-in theme '{}' produced warnings: {:?}",
                name,
                warnings,
            );
        }
    }

    #[test]
    fn test_register_builtins_fills_catalog_in_order() {
        let mut registry = ThemeRegistry::new();
        register_builtins(&mut registry);

        assert_eq!(registry.names(), BUILTIN_NAMES);
        assert!(registry.set_active("midnight"));
        assert_ne!(
            registry.current().get(ColorField::BoardDark),
            registry.defaults().get(ColorField::BoardDark),
        );
    }

    #[test]
    fn test_classic_matches_defaults() {
        let mut registry = ThemeRegistry::new();
        register_builtins(&mut registry);

        registry.set_active("classic");
        assert_eq!(registry.current(), registry.defaults());
    }
}
