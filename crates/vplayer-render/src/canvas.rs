#![forbid(unsafe_code)]

//! The shared pixel canvas.
//!
//! A [`Canvas`] owns one contiguous, row-major buffer. Widgets never own
//! pixels of their own: they hold [`Region`] headers into the canvas and
//! borrow a [`RegionMut`] view for the duration of a draw call.
//!
//! # Invariants
//!
//! 1. `data.len() == width * height * channels`.
//! 2. `channels` is 3 or 4.
//! 3. A region can only be viewed through the canvas it was created from
//!    (checked against [`CanvasId`]).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Rgb;
use crate::region::{Region, RegionError, RegionMut, RegionRef};

static NEXT_CANVAS_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a canvas, carried by every region derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasId(u64);

impl CanvasId {
    fn next() -> Self {
        Self(NEXT_CANVAS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw identifier value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One contiguous pixel buffer covering the whole player surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    id: CanvasId,
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a black canvas.
    ///
    /// # Errors
    ///
    /// [`RegionError::ZeroSized`] when either dimension is zero, and
    /// [`RegionError::UnsupportedChannels`] unless `channels` is 3 or 4.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self, RegionError> {
        if width == 0 || height == 0 {
            return Err(RegionError::ZeroSized { width, height });
        }
        if !matches!(channels, 3 | 4) {
            return Err(RegionError::UnsupportedChannels { channels });
        }
        let len = width as usize * height as usize * channels as usize;
        let mut data = vec![0u8; len];
        if channels == 4 {
            for px in data.chunks_exact_mut(4) {
                px[3] = u8::MAX;
            }
        }
        Ok(Self {
            id: CanvasId::next(),
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub const fn id(&self) -> CanvasId {
        self.id
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

    /// Bytes per row.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Raw pixel bytes in row-major order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The region covering the whole canvas.
    pub fn root(&self) -> Region {
        Region::root(self.id, self.width, self.height, self.channels)
    }

    /// A sub-rectangle of the whole canvas.
    ///
    /// # Errors
    ///
    /// Fails if the rectangle is empty or does not fit inside the canvas.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Region, RegionError> {
        self.root().sub(x, y, width, height)
    }

    /// Borrow a read-only view of `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` was derived from a different canvas.
    pub fn view(&self, region: &Region) -> RegionRef<'_> {
        assert_eq!(
            region.canvas_id(),
            self.id,
            "region belongs to another canvas"
        );
        RegionRef::new(&self.data, *region)
    }

    /// Borrow a writable view of `region`. Writes land directly in the canvas.
    ///
    /// # Panics
    ///
    /// Panics if `region` was derived from a different canvas.
    pub fn view_mut(&mut self, region: &Region) -> RegionMut<'_> {
        assert_eq!(
            region.canvas_id(),
            self.id,
            "region belongs to another canvas"
        );
        RegionMut::new(&mut self.data, *region)
    }

    /// Colour at absolute canvas coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * self.channels as usize;
        Some(Rgb::from_bytes(&self.data[idx..]))
    }

    /// Paint every pixel.
    pub fn fill(&mut self, color: Rgb) {
        let channels = self.channels as usize;
        for px in self.data.chunks_exact_mut(channels) {
            color.write_to(px);
        }
    }

    /// Copy the canvas into a `0x00RRGGBB` buffer of `width * height` words.
    ///
    /// Extra words in `out` are left untouched; a short `out` is filled as far
    /// as it goes.
    pub fn write_xrgb(&self, out: &mut [u32]) {
        let channels = self.channels as usize;
        for (dst, px) in out.iter_mut().zip(self.data.chunks_exact(channels)) {
            *dst = Rgb::from_bytes(px).to_u32();
        }
    }
}
