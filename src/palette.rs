//! Sparse theme overrides and the merge with the default table.
//!
//! A theme author picks colors for some fields and inherits the rest;
//! [`resolve`] is the single place that merge is defined.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::{format_color, parse_color, Color};
use crate::fields::{ColorField, ResolvedPalette};

/// A theme as authored: stable field names mapped to hex color strings.
///
/// This is the shape theme-selection UIs and catalog files exchange.
/// Field names come from [`ColorField::name`]; entries the current schema
/// does not know are ignorable so catalogs stay forward and backward
/// compatible.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThemeDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Warning produced while converting a [`ThemeDef`] leniently.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeWarning {
    pub message: String,
}

impl ThemeWarning {
    pub fn unknown_field(name: &str) -> Self {
        Self { message: format!("unknown color field '{}'", name) }
    }

    pub fn bad_color(field: &str, value: &str, detail: impl std::fmt::Display) -> Self {
        Self { message: format!("field '{}': invalid color '{}': {}", field, value, detail) }
    }
}

/// Sparse per-field color choices of one named theme.
///
/// One optional color per field; `None` means "inherit the default".
/// Immutable once registered — replacing a registration is a full
/// re-registration, not a mutation of the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverridePalette([Option<Color>; ColorField::COUNT]);

impl OverridePalette {
    /// An override set with no explicit choices.
    pub const fn empty() -> Self {
        Self([None; ColorField::COUNT])
    }

    /// The explicit choice for one field, if any.
    pub fn get(&self, field: ColorField) -> Option<Color> {
        self.0[field as usize]
    }

    /// Set an explicit choice for one field.
    pub fn set(&mut self, field: ColorField, color: Color) {
        self.0[field as usize] = Some(color);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, field: ColorField, color: Color) -> Self {
        self.set(field, color);
        self
    }

    /// Number of fields with an explicit choice.
    pub fn len(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    /// True when no field is explicitly chosen.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| c.is_none())
    }

    /// Convert an authored theme leniently.
    ///
    /// Unknown field names and malformed color strings are skipped and
    /// reported as warnings; they never fail the conversion.
    pub fn from_def(def: &ThemeDef) -> (Self, Vec<ThemeWarning>) {
        let mut overrides = Self::empty();
        let mut warnings = Vec::new();

        for (name, value) in &def.colors {
            let Some(field) = ColorField::from_name(name) else {
                warnings.push(ThemeWarning::unknown_field(name));
                continue;
            };
            match parse_color(value) {
                Ok(color) => overrides.set(field, color),
                Err(e) => warnings.push(ThemeWarning::bad_color(name, value, e)),
            }
        }

        (overrides, warnings)
    }

    /// Render back to the authoring shape, e.g. for catalog export.
    pub fn to_def(&self, name: impl Into<String>) -> ThemeDef {
        let mut colors = HashMap::new();
        for field in ColorField::ALL {
            if let Some(color) = self.get(field) {
                colors.insert(field.name().to_string(), format_color(color));
            }
        }
        ThemeDef { name: name.into(), colors }
    }
}

impl Default for OverridePalette {
    fn default() -> Self {
        Self::empty()
    }
}

/// Merge an override set with a default table.
///
/// For every field the result is the override if present, else the
/// default. Pure: neither input is touched.
pub fn resolve(overrides: &OverridePalette, defaults: &ResolvedPalette) -> ResolvedPalette {
    let mut table = *defaults;
    for field in ColorField::ALL {
        if let Some(color) = overrides.get(field) {
            table.set(field, color);
        }
    }
    table
}
