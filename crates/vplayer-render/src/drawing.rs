#![forbid(unsafe_code)]

//! Gradient backgrounds and the closed-glyph scan-line fill.

use crate::color::Rgb;
use crate::region::RegionMut;

/// Paint a top-to-bottom gradient.
///
/// Row `r` of `H` rows gets `top + (bottom - top) * r / H`, each channel
/// rounded independently. The last row therefore stops one step short of
/// `bottom`.
pub fn gradient_vertical(dst: &mut RegionMut<'_>, top: Rgb, bottom: Rgb) {
    let height = dst.height();
    let width = dst.width() as i32;
    for row in 0..height {
        let color = top.lerp(bottom, row, height);
        for x in 0..width {
            dst.set_pixel(x, row as i32, color);
        }
    }
}

/// Paint a left-to-right gradient; column `c` of `W` gets
/// `left + (right - left) * c / W`.
pub fn gradient_horizontal(dst: &mut RegionMut<'_>, left: Rgb, right: Rgb) {
    let width = dst.width();
    let height = dst.height() as i32;
    for col in 0..width {
        let color = left.lerp(right, col, width);
        for y in 0..height {
            dst.set_pixel(col as i32, y, color);
        }
    }
}

/// Fill the interior of a row-convex outline drawn in `color`.
///
/// Each row is scanned left to right. The first pixel of exactly `color`
/// opens the span and the next one closes it; the pixels strictly between
/// are painted. A row with fewer than two crossings is left unchanged, and
/// the open/closed state resets at every row.
///
/// Glyphs must cross every row exactly twice with single-pixel edges. A
/// thick or concave outline closes early and fills wrongly.
pub fn fill_closed_glyph(dst: &mut RegionMut<'_>, color: Rgb) {
    for y in 0..dst.height() {
        let mut open: Option<u32> = None;
        let mut span = None;
        for x in 0..dst.width() {
            if dst.pixel(x, y) != Some(color) {
                continue;
            }
            match open {
                None => open = Some(x),
                Some(start) => {
                    span = Some((start + 1, x));
                    break;
                }
            }
        }
        if let Some((from, to)) = span {
            for x in from..to {
                dst.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}
