#![forbid(unsafe_code)]

//! Aliasing views into a [`Canvas`](crate::Canvas).
//!
//! A [`Region`] is a small `Copy` header: the identity of the canvas it
//! belongs to, a byte offset, the canvas stride, and a size. It owns no
//! pixels. To read or write, borrow a [`RegionRef`] / [`RegionMut`] from the
//! canvas; every write lands at
//! `offset + y * stride + x * channels` of the shared buffer.
//!
//! Regions nest. A child's offset is its parent's offset plus the child's
//! local origin; the stride is copied unchanged at every level. Creating a
//! child that does not fit inside its parent is an error, never a clip.

use thiserror::Error;
use vplayer_core::geometry::Rect;

use crate::canvas::CanvasId;
use crate::color::Rgb;
use crate::image::Image;

/// Errors from region and canvas construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error(
        "region {width}x{height} at ({x},{y}) exceeds parent extent {parent_width}x{parent_height}"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        parent_width: u32,
        parent_height: u32,
    },

    #[error("region must have a non-zero size, got {width}x{height}")]
    ZeroSized { width: u32, height: u32 },

    #[error("image {got_width}x{got_height} does not match region {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },

    #[error("unsupported channel count {channels} (expected 3 or 4)")]
    UnsupportedChannels { channels: u8 },
}

/// A bounds-checked rectangle of a canvas, addressed by offset and stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    canvas: CanvasId,
    offset: usize,
    stride: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    channels: u8,
}

impl Region {
    pub(crate) fn root(canvas: CanvasId, width: u32, height: u32, channels: u8) -> Self {
        Self {
            canvas,
            offset: 0,
            stride: width as usize * channels as usize,
            x: 0,
            y: 0,
            width,
            height,
            channels,
        }
    }

    /// Create a child region at local `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RegionError::ZeroSized`] for an empty rectangle,
    /// [`RegionError::OutOfBounds`] if it does not fit inside `self`.
    pub fn sub(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Region, RegionError> {
        if width == 0 || height == 0 {
            return Err(RegionError::ZeroSized { width, height });
        }
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(RegionError::OutOfBounds {
                x,
                y,
                width,
                height,
                parent_width: self.width,
                parent_height: self.height,
            });
        }
        Ok(Region {
            canvas: self.canvas,
            offset: self.offset + y as usize * self.stride + x as usize * self.channels as usize,
            stride: self.stride,
            x: self.x + x,
            y: self.y + y,
            width,
            height,
            channels: self.channels,
        })
    }

    #[inline]
    pub const fn canvas_id(&self) -> CanvasId {
        self.canvas
    }

    /// Byte offset of the top-left pixel in the canvas buffer.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes per row of the owning canvas.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn channels(&self) -> u8 {
        self.channels
    }

    /// Top-left corner in canvas coordinates.
    #[inline]
    pub const fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// The region's rectangle in canvas coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(
            clamp_u16(self.x),
            clamp_u16(self.y),
            clamp_u16(self.width),
            clamp_u16(self.height),
        )
    }

    /// Buffer index of local pixel `(x, y)`. Caller checks bounds.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        self.offset + y as usize * self.stride + x as usize * self.channels as usize
    }

    #[inline]
    fn row_bytes(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}

#[inline]
fn clamp_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// A read-only borrowed view of a region.
#[derive(Debug, Clone, Copy)]
pub struct RegionRef<'a> {
    data: &'a [u8],
    region: Region,
}

impl<'a> RegionRef<'a> {
    pub(crate) fn new(data: &'a [u8], region: Region) -> Self {
        Self { data, region }
    }

    #[inline]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.region.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.region.height
    }

    /// Colour at local `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.region.width || y >= self.region.height {
            return None;
        }
        Some(Rgb::from_bytes(&self.data[self.region.index(x, y)..]))
    }

    /// Bytes of local row `y`, exactly `width * channels` long.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &'a [u8] {
        assert!(y < self.region.height, "row {y} out of range");
        let start = self.region.index(0, y);
        &self.data[start..start + self.region.row_bytes()]
    }

    /// Deep-copy the region's pixels.
    pub fn snapshot(&self) -> Image {
        let mut bytes = Vec::with_capacity(self.region.row_bytes() * self.region.height as usize);
        for y in 0..self.region.height {
            bytes.extend_from_slice(self.row(y));
        }
        Image::from_parts(
            self.region.width,
            self.region.height,
            self.region.channels,
            bytes,
        )
    }
}

/// A writable borrowed view of a region. Writes go straight to the canvas.
#[derive(Debug)]
pub struct RegionMut<'a> {
    data: &'a mut [u8],
    region: Region,
}

impl<'a> RegionMut<'a> {
    pub(crate) fn new(data: &'a mut [u8], region: Region) -> Self {
        Self { data, region }
    }

    #[inline]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.region.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.region.height
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> RegionRef<'_> {
        RegionRef::new(&*self.data, self.region)
    }

    /// Borrow a nested writable view at local `(x, y)`.
    ///
    /// # Errors
    ///
    /// Same as [`Region::sub`].
    pub fn sub_mut(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<RegionMut<'_>, RegionError> {
        let child = self.region.sub(x, y, width, height)?;
        Ok(RegionMut::new(&mut *self.data, child))
    }

    /// Colour at local `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.as_view().pixel(x, y)
    }

    /// Write one pixel. Coordinates outside the region are ignored.
    ///
    /// Returns whether the pixel was written.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return false;
        };
        if x >= self.region.width || y >= self.region.height {
            return false;
        }
        let idx = self.region.index(x, y);
        let channels = self.region.channels as usize;
        color.write_to(&mut self.data[idx..idx + channels]);
        true
    }

    /// Mutable bytes of local row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.region.height, "row {y} out of range");
        let start = self.region.index(0, y);
        let len = self.region.row_bytes();
        &mut self.data[start..start + len]
    }

    /// Paint every pixel of the region.
    pub fn fill(&mut self, color: Rgb) {
        let channels = self.region.channels as usize;
        for y in 0..self.region.height {
            for px in self.row_mut(y).chunks_exact_mut(channels) {
                color.write_to(px);
            }
        }
    }

    /// Copy `image` over the whole region.
    ///
    /// # Errors
    ///
    /// [`RegionError::SizeMismatch`] unless the image has exactly the region's
    /// size.
    pub fn restore(&mut self, image: &Image) -> Result<(), RegionError> {
        if image.width() != self.region.width || image.height() != self.region.height {
            return Err(RegionError::SizeMismatch {
                width: self.region.width,
                height: self.region.height,
                got_width: image.width(),
                got_height: image.height(),
            });
        }
        self.blit(image, 0, 0);
        Ok(())
    }

    /// Copy `image` with its top-left at local `(x, y)`, clipping to the region.
    pub fn blit(&mut self, image: &Image, x: i32, y: i32) {
        let same_layout = image.channels() == self.region.channels;
        for sy in 0..image.height() {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.region.height as i32 {
                continue;
            }
            if same_layout && x >= 0 && x as u32 + image.width() <= self.region.width {
                let channels = self.region.channels as usize;
                let start = x as usize * channels;
                let src = image.row(sy);
                self.row_mut(dy as u32)[start..start + src.len()].copy_from_slice(src);
                continue;
            }
            for sx in 0..image.width() {
                if let Some(color) = image.pixel(sx, sy) {
                    self.set_pixel(x + sx as i32, dy, color);
                }
            }
        }
    }

    /// Nearest-neighbour scale `image` to cover the whole region.
    pub fn blit_scaled(&mut self, image: &Image) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "blit_scaled",
            src_w = image.width(),
            src_h = image.height(),
            dst_w = self.region.width,
            dst_h = self.region.height
        )
        .entered();

        if image.width() == self.region.width && image.height() == self.region.height {
            self.blit(image, 0, 0);
            return;
        }
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let (dw, dh) = (self.region.width as u64, self.region.height as u64);
        let (sw, sh) = (image.width() as u64, image.height() as u64);
        for dy in 0..self.region.height {
            let sy = (dy as u64 * sh / dh) as u32;
            for dx in 0..self.region.width {
                let sx = (dx as u64 * sw / dw) as u32;
                if let Some(color) = image.pixel(sx, sy) {
                    self.set_pixel(dx as i32, dy as i32, color);
                }
            }
        }
    }
}
