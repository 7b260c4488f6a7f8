//! Hex color parsing and formatting for theme authoring.
//!
//! Theme catalogs carry colors as hex strings:
//! `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.

use image::Rgba;
use thiserror::Error;

/// One concrete RGBA color, 8 bits per channel.
pub type Color = Rgba<u8>;

/// Error type for color parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGBA color.
///
/// 3- and 4-digit forms double each digit (`#F00` -> `#FF0000`); alpha
/// defaults to 255 when absent.
///
/// # Examples
///
/// ```
/// use boardtheme::color::parse_color;
///
/// let red = parse_color("#F00").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let translucent = parse_color("#00000080").unwrap();
/// assert_eq!(translucent, image::Rgba([0, 0, 0, 128]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, missing the leading `#`,
/// the wrong length, or contains non-hex characters.
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let Some(hex) = s.strip_prefix('#') else {
        return Err(ColorError::MissingHash);
    };

    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let r = parse_hex_digit(chars.next().unwrap())? * 17;
            let g = parse_hex_digit(chars.next().unwrap())? * 17;
            let b = parse_hex_digit(chars.next().unwrap())? * 17;
            Ok(Rgba([r, g, b, 255]))
        }
        4 => {
            let mut chars = hex.chars();
            let r = parse_hex_digit(chars.next().unwrap())? * 17;
            let g = parse_hex_digit(chars.next().unwrap())? * 17;
            let b = parse_hex_digit(chars.next().unwrap())? * 17;
            let a = parse_hex_digit(chars.next().unwrap())? * 17;
            Ok(Rgba([r, g, b, a]))
        }
        6 => {
            let r = parse_hex_pair(&hex[0..2])?;
            let g = parse_hex_pair(&hex[2..4])?;
            let b = parse_hex_pair(&hex[4..6])?;
            Ok(Rgba([r, g, b, 255]))
        }
        8 => {
            let r = parse_hex_pair(&hex[0..2])?;
            let g = parse_hex_pair(&hex[2..4])?;
            let b = parse_hex_pair(&hex[4..6])?;
            let a = parse_hex_pair(&hex[6..8])?;
            Ok(Rgba([r, g, b, a]))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Format a color as a hex string.
///
/// Emits `#RRGGBB` for opaque colors and `#RRGGBBAA` otherwise, so
/// formatted catalogs round-trip through [`parse_color`].
pub fn format_color(color: Color) -> String {
    let Rgba([r, g, b, a]) = color;
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut chars = s.chars();
    let high = parse_hex_digit(chars.next().ok_or(ColorError::InvalidLength(1))?)?;
    let low = parse_hex_digit(chars.next().ok_or(ColorError::InvalidLength(1))?)?;
    Ok(high * 16 + low)
}
