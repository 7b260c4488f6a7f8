//! Name-keyed store of palette-derived bitmaps and static file assets.
//!
//! Palette-derived resources are declared up front as [`SpriteSpec`]s and
//! rebuilt as a whole pass whenever the theme cache reports an observable
//! color change — rebuilding is cheap next to draw-time lookups, and a
//! full pass needs no per-resource dependency tracking. Static file
//! assets live in a disjoint namespace, are not palette-dependent, and
//! load lazily on first request, cached for the process lifetime.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use image::RgbaImage;
use thiserror::Error;

use crate::cache::ThemeCache;
use crate::color::Color;
use crate::fields::{ColorField, ResolvedPalette};
use crate::sprites;

/// A pure bitmap generator: square size and resolved color in, pixels out.
pub type Generator = fn(u32, Color) -> RgbaImage;

/// Error type for static-asset requests.
///
/// Fatal to the single request only; the rest of the store is untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResourceError {
    /// No file for the requested asset name under the asset root
    #[error("asset '{name}' not found")]
    AssetNotFound { name: String },
    /// The asset file exists but could not be read or decoded
    #[error("asset '{name}' could not be loaded")]
    AssetDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Declaration of one palette-derived resource.
#[derive(Debug, Clone)]
pub struct SpriteSpec {
    /// Semantic name renderers fetch the resource by.
    pub name: String,
    /// Square pixel size handed to the generator.
    pub size: u32,
    /// Resolved field whose color feeds the generator.
    pub field: ColorField,
    /// Shape strategy; see [`crate::sprites`] for the built-in set.
    pub generator: Generator,
}

impl SpriteSpec {
    pub fn new(name: impl Into<String>, size: u32, field: ColorField, generator: Generator) -> Self {
        Self { name: name.into(), size, field, generator }
    }
}

/// The standard board-GUI resource set at the given square size.
pub fn standard_specs(square: u32) -> Vec<SpriteSpec> {
    vec![
        SpriteSpec::new("move-dot", square, ColorField::MoveDot, sprites::dot_marker),
        SpriteSpec::new("capture-ring", square, ColorField::CaptureRing, sprites::ring_marker),
        SpriteSpec::new("selection", square, ColorField::Selection, sprites::square_outline),
        SpriteSpec::new("last-move", square, ColorField::LastMove, sprites::solid_fill),
        SpriteSpec::new("check", square, ColorField::CheckHighlight, sprites::solid_fill),
        SpriteSpec::new("panel", square * 4, ColorField::PanelBackground, sprites::rounded_panel),
        SpriteSpec::new("shadow", square, ColorField::DropShadow, sprites::drop_shadow),
    ]
}

/// Store of pre-built themed bitmaps plus lazily-loaded file assets.
#[derive(Debug)]
pub struct ResourceStore {
    inner: Rc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    specs: Vec<SpriteSpec>,
    built: RefCell<HashMap<String, Rc<RgbaImage>>>,
    assets: RefCell<HashMap<String, Rc<RgbaImage>>>,
    asset_root: PathBuf,
}

impl StoreInner {
    fn rebuild(&self, table: &ResolvedPalette) {
        let mut fresh = HashMap::with_capacity(self.specs.len());
        for spec in &self.specs {
            let image = (spec.generator)(spec.size, table.get(spec.field));
            fresh.insert(spec.name.clone(), Rc::new(image));
        }
        // Swap the whole map at once; readers never observe a half-built
        // pass.
        *self.built.borrow_mut() = fresh;
        log::debug!("rebuilt {} themed resource(s)", self.specs.len());
    }
}

impl ResourceStore {
    /// Build every declared resource from the cache's current colors and
    /// subscribe for rebuilds on change.
    ///
    /// `asset_root` is the directory static file assets are served from.
    pub fn attach(cache: &ThemeCache, specs: Vec<SpriteSpec>, asset_root: impl Into<PathBuf>) -> Self {
        let inner = Rc::new(StoreInner {
            specs,
            built: RefCell::new(HashMap::new()),
            assets: RefCell::new(HashMap::new()),
            asset_root: asset_root.into(),
        });
        inner.rebuild(&cache.colors());
        let weak = Rc::downgrade(&inner);
        cache.add_listener(move |table| {
            if let Some(inner) = weak.upgrade() {
                inner.rebuild(table);
            }
        });
        Self { inner }
    }

    /// Fetch a pre-built palette-derived resource.
    ///
    /// Unknown names are `None`, never an error.
    pub fn get(&self, name: &str) -> Option<Rc<RgbaImage>> {
        self.inner.built.borrow().get(name).cloned()
    }

    /// Names of the pre-built resources, sorted for stable listing.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.built.borrow().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Fetch a static file asset, loading and caching it on first request.
    ///
    /// The namespace is disjoint from [`get`](Self::get): asset names are
    /// paths relative to the asset root, and their pixels never depend on
    /// the palette.
    pub fn asset(&self, name: &str) -> Result<Rc<RgbaImage>, ResourceError> {
        if let Some(cached) = self.inner.assets.borrow().get(name) {
            return Ok(cached.clone());
        }

        let path = self.inner.asset_root.join(name);
        let decoded = image::open(&path).map_err(|e| match e {
            image::ImageError::IoError(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                ResourceError::AssetNotFound { name: name.to_string() }
            }
            other => ResourceError::AssetDecode { name: name.to_string(), source: other },
        })?;

        let resource = Rc::new(decoded.to_rgba8());
        self.inner.assets.borrow_mut().insert(name.to_string(), resource.clone());
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::OverridePalette;
    use crate::registry::ThemeRegistry;
    use image::Rgba;

    const ORANGE: Rgba<u8> = Rgba([0xFF, 0x8C, 0x00, 0xFF]);

    fn pipeline() -> (ThemeRegistry, ThemeCache) {
        let mut registry = ThemeRegistry::new();
        registry.register(
            "ember",
            OverridePalette::empty().with(ColorField::MoveDot, ORANGE),
        );
        let cache = ThemeCache::attach(&registry);
        (registry, cache)
    }

    fn dot_spec() -> Vec<SpriteSpec> {
        vec![SpriteSpec::new("move-dot", 16, ColorField::MoveDot, sprites::dot_marker)]
    }

    #[test]
    fn test_initial_build_uses_current_colors() {
        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, dot_spec(), "assets");

        let dot = store.get("move-dot").unwrap();
        assert_eq!(dot.dimensions(), (16, 16));
        assert_eq!(
            *dot.get_pixel(8, 8),
            ResolvedPalette::defaults().get(ColorField::MoveDot),
        );
    }

    #[test]
    fn test_unknown_resource_is_none() {
        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, dot_spec(), "assets");
        assert!(store.get("does-not-exist").is_none());
    }

    #[test]
    fn test_theme_change_rebuilds_with_new_color() {
        let (mut registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, dot_spec(), "assets");

        registry.set_active("ember");
        let dot = store.get("move-dot").unwrap();
        assert_eq!(*dot.get_pixel(8, 8), ORANGE);
    }

    #[test]
    fn test_rebuild_is_whole_pass() {
        let (mut registry, cache) = pipeline();
        let mut specs = dot_spec();
        specs.push(SpriteSpec::new("panel", 16, ColorField::PanelBackground, sprites::solid_fill));
        let store = ResourceStore::attach(&cache, specs, "assets");

        let panel_before = store.get("panel").unwrap();
        registry.set_active("ember");
        let panel_after = store.get("panel").unwrap();

        // The panel does not depend on the changed field: it was rebuilt
        // (new allocation) but produced identical pixels.
        assert!(!Rc::ptr_eq(&panel_before, &panel_after));
        assert_eq!(*panel_before, *panel_after);
    }

    #[test]
    fn test_standard_specs_cover_all_generators() {
        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, standard_specs(32), "assets");

        assert_eq!(
            store.names(),
            ["capture-ring", "check", "last-move", "move-dot", "panel", "selection", "shadow"],
        );
        assert_eq!(store.get("panel").unwrap().dimensions(), (128, 128));
    }

    #[test]
    fn test_asset_loads_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let mut probe = RgbaImage::new(2, 2);
        probe.put_pixel(0, 0, ORANGE);
        probe.save(dir.path().join("probe.png")).unwrap();

        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, Vec::new(), dir.path());

        let first = store.asset("probe.png").unwrap();
        assert_eq!(first.dimensions(), (2, 2));
        assert_eq!(*first.get_pixel(0, 0), ORANGE);

        // Second request is served from the cache, not the filesystem.
        let second = store.asset("probe.png").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_asset_reports_name() {
        let dir = tempfile::tempdir().unwrap();
        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, Vec::new(), dir.path());

        let err = store.asset("missing.png").unwrap_err();
        match err {
            ResourceError::AssetNotFound { name } => assert_eq!(name, "missing.png"),
            other => panic!("expected AssetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_asset_reports_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("junk.png"), b"not a png").unwrap();

        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, Vec::new(), dir.path());

        let err = store.asset("junk.png").unwrap_err();
        match err {
            ResourceError::AssetDecode { name, .. } => assert_eq!(name, "junk.png"),
            other => panic!("expected AssetDecode, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_asset_request_leaves_store_usable() {
        let dir = tempfile::tempdir().unwrap();
        let mut probe = RgbaImage::new(1, 1);
        probe.put_pixel(0, 0, ORANGE);
        probe.save(dir.path().join("good.png")).unwrap();

        let (_registry, cache) = pipeline();
        let store = ResourceStore::attach(&cache, dot_spec(), dir.path());

        assert!(store.asset("missing.png").is_err());
        assert!(store.asset("good.png").is_ok());
        assert!(store.get("move-dot").is_some());
    }
}
