//! The themeable field schema: every color a renderer can ask for.
//!
//! One `color_fields!` invocation is the single source of truth for the
//! field list. It generates the [`ColorField`] enum, the ordinal-ordered
//! [`ColorField::ALL`] array, the stable name table, and the default color
//! table together, so the four views cannot drift apart.

use std::ops::Index;

use image::Rgba;

use crate::color::Color;

macro_rules! color_fields {
    ($(($variant:ident, $name:literal, $default:expr)),+ $(,)?) => {
        /// One themeable color attribute.
        ///
        /// Ordinals are append-only: they may be persisted in user configs
        /// and referenced externally, so new fields go at the end and
        /// existing fields are never reordered or removed.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(usize)]
        pub enum ColorField {
            $($variant),+
        }

        impl ColorField {
            /// Number of fields in the schema.
            pub const COUNT: usize = 0 $(+ color_fields!(@one $variant))+;

            /// All fields in ordinal order.
            pub const ALL: [ColorField; Self::COUNT] = [$(ColorField::$variant),+];

            /// The stable name used in theme catalogs and config files.
            pub fn name(self) -> &'static str {
                match self {
                    $(ColorField::$variant => $name),+
                }
            }

            /// Look up a field by its stable name.
            ///
            /// Unknown names return `None` rather than an error: theme
            /// catalogs may be written against a newer or older field list
            /// and unrecognized tokens are ignorable.
            pub fn from_name(name: &str) -> Option<ColorField> {
                match name {
                    $($name => Some(ColorField::$variant),)+
                    _ => None,
                }
            }

            /// The built-in default color for this field.
            pub fn default_color(self) -> Color {
                DEFAULTS[self as usize]
            }
        }

        /// Default color table, indexed by field ordinal.
        const DEFAULTS: [Color; ColorField::COUNT] = [$($default),+];
    };
    (@one $variant:ident) => { 1 };
}

color_fields! {
    (BoardLight, "board-light", Rgba([0xF0, 0xD9, 0xB5, 0xFF])),
    (BoardDark, "board-dark", Rgba([0xB5, 0x88, 0x63, 0xFF])),
    (BoardBorder, "board-border", Rgba([0x6B, 0x4E, 0x33, 0xFF])),
    (LastMove, "last-move", Rgba([0xCD, 0xD2, 0x6A, 0x80])),
    (CheckHighlight, "check-highlight", Rgba([0xE0, 0x39, 0x39, 0x80])),
    (Selection, "selection", Rgba([0x14, 0x55, 0x1E, 0x66])),
    (MoveDot, "move-dot", Rgba([0x14, 0x55, 0x1E, 0x99])),
    (CaptureRing, "capture-ring", Rgba([0x14, 0x55, 0x1E, 0x99])),
    (PanelBackground, "panel-background", Rgba([0x2A, 0x2A, 0x2A, 0xFF])),
    (PanelBorder, "panel-border", Rgba([0x4A, 0x4A, 0x4A, 0xFF])),
    (TextPrimary, "text-primary", Rgba([0xFF, 0xFF, 0xFF, 0xFF])),
    (TextSecondary, "text-secondary", Rgba([0x88, 0x88, 0x88, 0xFF])),
    (Accent, "accent", Rgba([0x7F, 0xA6, 0x50, 0xFF])),
    (ButtonBackground, "button-background", Rgba([0x3C, 0x3C, 0x3C, 0xFF])),
    (ButtonHover, "button-hover", Rgba([0x4A, 0x4A, 0x4A, 0xFF])),
    (DropShadow, "drop-shadow", Rgba([0x00, 0x00, 0x00, 0x66])),
}

/// A dense color table with exactly one concrete color per field.
///
/// Stored as a plain array indexed by field ordinal, which gives O(1)
/// access by [`ColorField`] without a per-field branch and a layout that
/// generic consumers (diffing, serialization, debug views) can walk via
/// [`ResolvedPalette::as_slice`]. Compared field-wise, never by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPalette([Color; ColorField::COUNT]);

// Ordinal indexing relies on the table being exactly COUNT packed RGBA
// quads; a schema or representation change that breaks this fails the
// build rather than desynchronizing field ids from colors at runtime.
const _: () = assert!(std::mem::size_of::<ResolvedPalette>() == ColorField::COUNT * 4);

impl ResolvedPalette {
    /// Construct from a full color table in ordinal order.
    pub const fn new(colors: [Color; ColorField::COUNT]) -> Self {
        Self(colors)
    }

    /// The built-in default table.
    pub const fn defaults() -> Self {
        Self(DEFAULTS)
    }

    /// Color for one field.
    pub fn get(&self, field: ColorField) -> Color {
        self.0[field as usize]
    }

    /// Replace the color for one field.
    pub fn set(&mut self, field: ColorField, color: Color) {
        self.0[field as usize] = color;
    }

    /// All colors in ordinal order, for generic per-field iteration.
    pub fn as_slice(&self) -> &[Color; ColorField::COUNT] {
        &self.0
    }
}

impl Default for ResolvedPalette {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Index<ColorField> for ResolvedPalette {
    type Output = Color;

    fn index(&self, field: ColorField) -> &Color {
        &self.0[field as usize]
    }
}
