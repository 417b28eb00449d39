#![forbid(unsafe_code)]

//! The drawing-primitive seam.
//!
//! Widgets draw lines, outlines, and text only through [`Renderer`], so the
//! rasteriser can be swapped without touching widget code.

use vplayer_core::geometry::Point;

use crate::color::Rgb;
use crate::region::RegionMut;

/// Text face variants the player uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    #[inline]
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    #[inline]
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Line, rectangle, and text rasterisation into a region.
///
/// Coordinates are local to `dst` and may lie outside it; implementations
/// clip.
pub trait Renderer {
    /// A one-pixel line including both endpoints.
    fn line(&self, dst: &mut RegionMut<'_>, from: Point, to: Point, color: Rgb);

    /// A one-pixel outline with corners `top_left` and `bottom_right`, both
    /// inclusive.
    fn rectangle(&self, dst: &mut RegionMut<'_>, top_left: Point, bottom_right: Point, color: Rgb) {
        let top_right = Point::new(bottom_right.x, top_left.y);
        let bottom_left = Point::new(top_left.x, bottom_right.y);
        self.line(dst, top_left, top_right, color);
        self.line(dst, top_right, bottom_right, color);
        self.line(dst, bottom_right, bottom_left, color);
        self.line(dst, bottom_left, top_left, color);
    }

    /// Draw `text` with its baseline starting at `origin`.
    fn put_text(
        &self,
        dst: &mut RegionMut<'_>,
        text: &str,
        origin: Point,
        style: FontStyle,
        color: Rgb,
    );

    /// Horizontal advance of `text` in pixels.
    fn text_width(&self, text: &str, style: FontStyle) -> u32;
}
