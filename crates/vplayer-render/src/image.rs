#![forbid(unsafe_code)]

//! Owned pixel images.
//!
//! An [`Image`] is a deep copy, never a view: region snapshots, widget
//! sprites, and decoded video frames all use it.

use crate::color::Rgb;
use crate::region::RegionError;

/// An owned, tightly packed, row-major pixel image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Image {
    /// A black image.
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        Self::filled(width, height, channels, Rgb::BLACK)
    }

    /// An image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, channels: u8, color: Rgb) -> Self {
        let channels = channels.clamp(3, 4);
        let mut data = vec![0u8; width as usize * height as usize * channels as usize];
        for px in data.chunks_exact_mut(channels as usize) {
            color.write_to(px);
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Wrap raw bytes.
    ///
    /// # Errors
    ///
    /// [`RegionError::UnsupportedChannels`] unless `channels` is 3 or 4, and
    /// [`RegionError::SizeMismatch`] when `data` is not exactly
    /// `width * height * channels` bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, RegionError> {
        if !matches!(channels, 3 | 4) {
            return Err(RegionError::UnsupportedChannels { channels });
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            let px = channels as usize;
            return Err(RegionError::SizeMismatch {
                width,
                height,
                got_width: u32::try_from(data.len() / px / height.max(1) as usize)
                    .unwrap_or(u32::MAX),
                got_height: height,
            });
        }
        Ok(Self::from_parts(width, height, channels, data))
    }

    pub(crate) fn from_parts(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels as usize
        );
        Self {
            width,
            height,
            channels,
            data,
        }
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

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgb::from_bytes(&self.data[self.index(x, y)..]))
    }

    /// Write one pixel; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        let channels = self.channels as usize;
        color.write_to(&mut self.data[idx..idx + channels]);
        true
    }

    /// Bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of range");
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize * self.channels as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_and_pixel() {
        let img = Image::filled(3, 2, 3, Rgb::new(5, 6, 7));
        assert_eq!(img.pixel(2, 1), Some(Rgb::new(5, 6, 7)));
        assert_eq!(img.pixel(3, 0), None);
        assert_eq!(img.as_bytes().len(), 18);
    }

    #[test]
    fn from_raw_validates_length() {
        assert!(Image::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            Image::from_raw(2, 2, 3, vec![0; 11]),
            Err(RegionError::SizeMismatch { .. })
        ));
        assert!(matches!(
            Image::from_raw(2, 2, 1, vec![0; 4]),
            Err(RegionError::UnsupportedChannels { channels: 1 })
        ));
    }

    #[test]
    fn set_pixel_and_row() {
        let mut img = Image::new(2, 2, 3);
        assert!(img.set_pixel(1, 1, Rgb::WHITE));
        assert!(!img.set_pixel(2, 1, Rgb::WHITE));
        assert_eq!(img.row(1), &[0, 0, 0, 255, 255, 255]);
    }
}
