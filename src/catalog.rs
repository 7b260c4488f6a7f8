//! Theme catalog loading from JSON-lines streams.
//!
//! One theme definition per line; blank lines and `//` comment lines are
//! skipped. Malformed lines become line-numbered warnings and parsing
//! continues — a bad entry never takes down the rest of the catalog.
//! Catalogs are in-process registration input, not a persistence format
//! the core guarantees.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::palette::ThemeDef;
use crate::registry::ThemeRegistry;

/// Error type for catalog loading failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// The underlying stream or file could not be read
    #[error("failed to read theme catalog")]
    Io(#[from] std::io::Error),
}

/// Warning for one skipped catalog line.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogWarning {
    pub line: usize,
    pub message: String,
}

/// Result of parsing a theme catalog stream.
#[derive(Debug, Clone, Default)]
pub struct CatalogResult {
    pub themes: Vec<ThemeDef>,
    pub warnings: Vec<CatalogWarning>,
}

/// Parse a single catalog line into a theme definition.
pub fn parse_theme_line(line: &str, line_number: usize) -> Result<ThemeDef, CatalogWarning> {
    serde_json::from_str(line)
        .map_err(|e| CatalogWarning { line: line_number, message: e.to_string() })
}

/// Parse a stream of theme definitions, collecting warnings for
/// malformed or unnamed entries and continuing.
pub fn parse_theme_stream<R: Read>(reader: R) -> Result<CatalogResult, CatalogError> {
    let mut result = CatalogResult::default();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        match parse_theme_line(trimmed, line_number) {
            Ok(def) if def.name.is_empty() => result.warnings.push(CatalogWarning {
                line: line_number,
                message: "theme has no name".to_string(),
            }),
            Ok(def) => result.themes.push(def),
            Err(warning) => result.warnings.push(warning),
        }
    }

    Ok(result)
}

/// Parse a theme catalog file.
pub fn load_theme_file(path: impl AsRef<Path>) -> Result<CatalogResult, CatalogError> {
    let file = std::fs::File::open(path)?;
    parse_theme_stream(file)
}

/// Register every parsed theme, routing per-theme conversion warnings to
/// the log. Returns the number of themes registered.
pub fn register_all(themes: &[ThemeDef], registry: &mut ThemeRegistry) -> usize {
    for def in themes {
        for warning in registry.register_def(def) {
            log::warn!("theme '{}': {}", def.name, warning.message);
        }
    }
    themes.len()
}
