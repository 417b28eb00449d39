#![forbid(unsafe_code)]

//! Render kernel: one pixel canvas, aliasing regions, and drawing primitives.
//!
//! # Role in vplayer
//! `vplayer-render` owns the single pixel buffer that the whole player
//! surface lives in. Every logical widget writes through a [`region::Region`]
//! that aliases a rectangle of that buffer, so drawing updates the surface in
//! place with no copy-back step.
//!
//! # Primary responsibilities
//! - **Canvas**: owned, contiguous, row-major pixel storage.
//! - **Region**: a bounds-checked header (offset, inherited stride, size)
//!   naming a sub-rectangle of a canvas or of another region.
//! - **Image**: an owned deep copy of pixels, used for snapshots, sprites, and
//!   decoded video frames.
//! - **Drawing**: gradients and the closed-glyph scan-line fill.
//! - **Renderer**: the line/rectangle/text seam, with [`bitmap::BitmapRenderer`]
//!   as the built-in implementation.

pub mod bitmap;
pub mod canvas;
pub mod color;
pub mod drawing;
pub mod image;
pub mod region;
pub mod renderer;

pub use canvas::{Canvas, CanvasId};
pub use color::Rgb;
pub use image::Image;
pub use region::{Region, RegionError, RegionMut, RegionRef};
pub use renderer::{FontStyle, Renderer};
