//! Registry of named themes and the currently active resolved table.
//!
//! Owns the default table, the catalog of sparse overrides, the active
//! theme name, and the current resolved table. All mutations funnel
//! through [`ThemeRegistry::apply`], which compares tables structurally
//! and broadcasts to listeners only on a genuine change.

use std::collections::HashMap;

use crate::fields::ResolvedPalette;
use crate::notify::{ListenerId, ListenerSet};
use crate::palette::{resolve, OverridePalette, ThemeDef, ThemeWarning};

/// Name reported by [`ThemeRegistry::active_name`] before any theme has
/// been activated: the built-in default table.
pub const DEFAULT_THEME_NAME: &str = "default";

/// Catalog of named themes plus the single currently-active table.
///
/// Constructed once at application start and passed by reference to
/// consumers; tests construct isolated instances. Mutated only through
/// registration and activation calls, never concurrently.
#[derive(Debug)]
pub struct ThemeRegistry {
    defaults: ResolvedPalette,
    current: ResolvedPalette,
    catalog: HashMap<String, OverridePalette>,
    order: Vec<String>,
    active: String,
    listeners: ListenerSet,
}

impl ThemeRegistry {
    /// A registry on the built-in default table, with an empty catalog.
    pub fn new() -> Self {
        Self::with_defaults(ResolvedPalette::defaults())
    }

    /// A registry on a caller-supplied default table.
    pub fn with_defaults(defaults: ResolvedPalette) -> Self {
        Self {
            defaults,
            current: defaults,
            catalog: HashMap::new(),
            order: Vec::new(),
            active: DEFAULT_THEME_NAME.to_string(),
            listeners: ListenerSet::new(),
        }
    }

    /// Insert or replace a named theme.
    ///
    /// New names append to the listing order; re-registering keeps the
    /// original position. Replacing the currently-active theme re-resolves
    /// and broadcasts immediately — live-editing the active theme is a
    /// supported path, not an error.
    pub fn register(&mut self, name: impl Into<String>, overrides: OverridePalette) {
        let name = name.into();
        if !self.catalog.contains_key(&name) {
            self.order.push(name.clone());
        }
        let hot = name == self.active;
        self.catalog.insert(name, overrides);
        if hot {
            let table = resolve(&overrides, &self.defaults);
            self.apply(table);
        }
    }

    /// Register a theme from its authored form, converting leniently.
    ///
    /// Returns the conversion warnings; unknown fields and malformed
    /// colors are skipped, never fatal.
    pub fn register_def(&mut self, def: &ThemeDef) -> Vec<ThemeWarning> {
        let (overrides, warnings) = OverridePalette::from_def(def);
        self.register(def.name.clone(), overrides);
        warnings
    }

    /// Activate a named theme.
    ///
    /// Resolves the overrides against the defaults, records the name, and
    /// broadcasts if the resolved table differs from the current one.
    /// Unknown names are a logged no-op; returns whether the name was
    /// known, so call sites probing for optional themes can ignore the
    /// result and call sites that care about typos can check it.
    pub fn set_active(&mut self, name: &str) -> bool {
        let Some(overrides) = self.catalog.get(name) else {
            log::warn!("ignoring activation of unknown theme '{}'", name);
            return false;
        };
        let table = resolve(overrides, &self.defaults);
        self.active = name.to_string();
        self.apply(table);
        true
    }

    /// Apply an ad hoc override set without registering it.
    ///
    /// Broadcasts on change like activation does, but leaves the active
    /// name untouched. Returns whether the table actually changed.
    pub fn load_overrides(&mut self, overrides: &OverridePalette) -> bool {
        let table = resolve(overrides, &self.defaults);
        self.apply(table)
    }

    /// Replace the current table and broadcast, unless nothing changed.
    fn apply(&mut self, table: ResolvedPalette) -> bool {
        if table == self.current {
            log::debug!("resolved palette unchanged; skipping broadcast");
            return false;
        }
        self.current = table;
        log::debug!("resolved palette changed; notifying {} listener(s)", self.listeners.len());
        self.listeners.notify(&self.current);
        true
    }

    /// The current resolved table.
    pub fn current(&self) -> ResolvedPalette {
        self.current
    }

    /// The default table overrides resolve against.
    pub fn defaults(&self) -> ResolvedPalette {
        self.defaults
    }

    /// Registered theme names in registration order, for UI listing.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// The active theme name.
    pub fn active_name(&self) -> &str {
        &self.active
    }

    /// Check if a theme with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.catalog.contains_key(name)
    }

    /// The stored override set for a name.
    pub fn get(&self, name: &str) -> Option<&OverridePalette> {
        self.catalog.get(name)
    }

    /// Number of registered themes.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// True when no theme is registered.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Register a listener invoked synchronously after each table change.
    pub fn add_listener(&self, callback: impl Fn(&ResolvedPalette) + 'static) -> ListenerId {
        self.listeners.add(callback)
    }

    /// Remove a listener. Returns whether the id was still registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// A handle to the listener set, for callbacks that unsubscribe
    /// themselves mid-broadcast.
    pub fn listeners(&self) -> ListenerSet {
        self.listeners.clone()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ColorField;
    use image::Rgba;
    use std::cell::Cell;
    use std::rc::Rc;

    const ORANGE: Rgba<u8> = Rgba([0xFF, 0x8C, 0x00, 0xFF]);
    const TEAL: Rgba<u8> = Rgba([0x00, 0x80, 0x80, 0xFF]);

    fn ember() -> OverridePalette {
        OverridePalette::empty().with(ColorField::Accent, ORANGE)
    }

    fn counting_listener(registry: &ThemeRegistry) -> Rc<Cell<usize>> {
        let hits = Rc::new(Cell::new(0));
        let hits2 = hits.clone();
        registry.add_listener(move |_| hits2.set(hits2.get() + 1));
        hits
    }

    #[test]
    fn test_new_registry_serves_defaults() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.current(), ResolvedPalette::defaults());
        assert_eq!(registry.active_name(), DEFAULT_THEME_NAME);
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_registration_order_is_display_order() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        registry.register("midnight", OverridePalette::empty());
        registry.register("ember", ember()); // re-registration keeps position

        assert_eq!(registry.names(), ["ember", "midnight"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_does_not_broadcast_for_inactive_theme() {
        let mut registry = ThemeRegistry::new();
        let hits = counting_listener(&registry);

        registry.register("ember", ember());
        assert_eq!(hits.get(), 0);
        assert_eq!(registry.current(), ResolvedPalette::defaults());
    }

    #[test]
    fn test_set_active_resolves_and_broadcasts() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        let hits = counting_listener(&registry);

        assert!(registry.set_active("ember"));
        assert_eq!(hits.get(), 1);
        assert_eq!(registry.active_name(), "ember");
        assert_eq!(registry.current().get(ColorField::Accent), ORANGE);
        assert_eq!(
            registry.current().get(ColorField::BoardLight),
            registry.defaults().get(ColorField::BoardLight),
        );
    }

    #[test]
    fn test_set_active_twice_broadcasts_once() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        let hits = counting_listener(&registry);

        registry.set_active("ember");
        registry.set_active("ember");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_set_active_unknown_name_is_noop() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        registry.set_active("ember");
        let hits = counting_listener(&registry);

        assert!(!registry.set_active("does-not-exist"));
        assert_eq!(hits.get(), 0);
        assert_eq!(registry.active_name(), "ember");
        assert_eq!(registry.current().get(ColorField::Accent), ORANGE);
    }

    #[test]
    fn test_hot_reload_of_active_theme_broadcasts() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        registry.set_active("ember");
        let hits = counting_listener(&registry);

        registry.register("ember", OverridePalette::empty().with(ColorField::Accent, TEAL));
        assert_eq!(hits.get(), 1);
        assert_eq!(registry.current().get(ColorField::Accent), TEAL);
    }

    #[test]
    fn test_hot_reload_with_identical_values_does_not_broadcast() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        registry.set_active("ember");
        let hits = counting_listener(&registry);

        registry.register("ember", ember());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_load_overrides_keeps_active_name() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());
        registry.set_active("ember");
        let hits = counting_listener(&registry);

        let ad_hoc = OverridePalette::empty().with(ColorField::BoardDark, TEAL);
        assert!(registry.load_overrides(&ad_hoc));
        assert_eq!(hits.get(), 1);
        assert_eq!(registry.active_name(), "ember");
        assert_eq!(registry.current().get(ColorField::BoardDark), TEAL);
        // The ad hoc table replaced the ember resolution entirely.
        assert_eq!(
            registry.current().get(ColorField::Accent),
            registry.defaults().get(ColorField::Accent),
        );
    }

    #[test]
    fn test_load_overrides_unchanged_is_noop() {
        let mut registry = ThemeRegistry::new();
        let hits = counting_listener(&registry);

        assert!(!registry.load_overrides(&OverridePalette::empty()));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_register_def_reports_warnings() {
        let mut registry = ThemeRegistry::new();
        let def = crate::palette::ThemeDef {
            name: "odd".to_string(),
            colors: std::collections::HashMap::from([
                ("accent".to_string(), "#FF8C00".to_string()),
                ("sparkle".to_string(), "#FFFFFF".to_string()),
            ]),
        };

        let warnings = registry.register_def(&def);
        assert_eq!(warnings.len(), 1);
        assert!(registry.contains("odd"));
        assert_eq!(registry.get("odd").unwrap().get(ColorField::Accent), Some(ORANGE));
    }

    #[test]
    fn test_remove_listener_stops_delivery() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());

        let hits = Rc::new(Cell::new(0));
        let hits2 = hits.clone();
        let id = registry.add_listener(move |_| hits2.set(hits2.get() + 1));

        registry.set_active("ember");
        assert!(registry.remove_listener(id));
        registry.load_overrides(&OverridePalette::empty());

        assert_eq!(hits.get(), 1);
        assert!(!registry.remove_listener(id));
    }

    #[test]
    fn test_listener_receives_new_table() {
        let mut registry = ThemeRegistry::new();
        registry.register("ember", ember());

        let seen = Rc::new(Cell::new(None));
        let seen2 = seen.clone();
        registry.add_listener(move |table| seen2.set(Some(table.get(ColorField::Accent))));

        registry.set_active("ember");
        assert_eq!(seen.get(), Some(ORANGE));
    }
}
