//! Procedural bitmap generators for palette-derived resources.
//!
//! Each generator is a pure function of a square size and one resolved
//! color, producing an RGBA bitmap. The resource store treats them as
//! injectable strategies; nothing here knows when rebuilds happen.
//!
//! Rasterization works in doubled integer coordinates (a pixel's center
//! at `2x + 1`), which keeps circles symmetric on even sizes without
//! floating point.

use image::{Rgba, RgbaImage};

use crate::color::Color;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A full-square solid fill.
pub fn solid_fill(size: u32, color: Color) -> RgbaImage {
    RgbaImage::from_pixel(size, size, color)
}

/// A filled disc of one third the square's width, centered.
///
/// The classic quiet-move marker.
pub fn dot_marker(size: u32, color: Color) -> RgbaImage {
    let d = size as i64;
    let radius = d / 3; // doubled units: disc diameter = size / 3
    from_membership(size, |dx, dy| dx * dx + dy * dy <= radius * radius, color)
}

/// An annulus hugging the square's edge.
///
/// The classic capture marker: outer edge one pixel in from the border,
/// ring one eighth of the square thick.
pub fn ring_marker(size: u32, color: Color) -> RgbaImage {
    let d = size as i64;
    let outer = d - 2;
    let inner = (outer - d / 4).max(0);
    from_membership(
        size,
        |dx, dy| {
            let dist = dx * dx + dy * dy;
            dist <= outer * outer && dist > inner * inner
        },
        color,
    )
}

/// A stroked square border, one sixteenth of the width thick (minimum one
/// pixel).
pub fn square_outline(size: u32, color: Color) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size, size, TRANSPARENT);
    let t = (size / 16).max(1);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if x < t || y < t || x >= size - t || y >= size - t {
            *pixel = color;
        }
    }
    image
}

/// A filled square with quarter-circle corners, radius one eighth of the
/// width.
pub fn rounded_panel(size: u32, color: Color) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size, size, color);
    if size == 0 {
        return image;
    }
    let r = (size as i64) / 4; // doubled units: corner radius = size / 8
    let d = 2 * size as i64;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let px = 2 * x as i64 + 1;
        let py = 2 * y as i64 + 1;
        // Distance to the nearest corner-arc center; pixels outside the
        // arc in a corner cell go transparent.
        let cx = if px < r { r } else if px > d - r { d - r } else { px };
        let cy = if py < r { r } else if py > d - r { d - r } else { py };
        let dx = px - cx;
        let dy = py - cy;
        if dx * dx + dy * dy > r * r {
            *pixel = TRANSPARENT;
        }
    }
    image
}

/// A radial shadow: the color's alpha at the center, falling off
/// quadratically to transparent at the edge.
pub fn drop_shadow(size: u32, color: Color) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size, size, TRANSPARENT);
    if size == 0 {
        return image;
    }
    let d = size as i64;
    let max_sq = d * d;
    let Rgba([r, g, b, a]) = color;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = 2 * x as i64 + 1 - d;
        let dy = 2 * y as i64 + 1 - d;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq >= max_sq {
            continue;
        }
        let alpha = (a as i64 * (max_sq - dist_sq) / max_sq) as u8;
        *pixel = Rgba([r, g, b, alpha]);
    }
    image
}

/// Build a square image from a doubled-coordinate membership test around
/// the center.
fn from_membership(size: u32, inside: impl Fn(i64, i64) -> bool, color: Color) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size, size, TRANSPARENT);
    let d = size as i64;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = 2 * x as i64 + 1 - d;
        let dy = 2 * y as i64 + 1 - d;
        if inside(dx, dy) {
            *pixel = color;
        }
    }
    image
}
