#![forbid(unsafe_code)]

//! RGB colour values and per-channel interpolation.

/// An opaque 8-bit-per-channel colour.
///
/// Pixels are stored in `R, G, B` byte order; a fourth channel, when the
/// canvas has one, is always written as fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `0x00RRGGBB`, the layout software framebuffers expect.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Read a colour from the first three bytes of a pixel.
    #[inline]
    pub fn from_bytes(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Write this colour into one pixel's bytes.
    #[inline]
    pub fn write_to(self, px: &mut [u8]) {
        px[0] = self.r;
        px[1] = self.g;
        px[2] = self.b;
        if let Some(alpha) = px.get_mut(3) {
            *alpha = u8::MAX;
        }
    }

    /// Interpolate each channel independently: `self + (to - self) * num / den`,
    /// rounded to the nearest integer.
    ///
    /// `den == 0` returns `self`.
    pub fn lerp(self, to: Rgb, num: u32, den: u32) -> Rgb {
        Rgb::new(
            lerp_channel(self.r, to.r, num, den),
            lerp_channel(self.g, to.g, num, den),
            lerp_channel(self.b, to.b, num, den),
        )
    }
}

#[inline]
fn lerp_channel(from: u8, to: u8, num: u32, den: u32) -> u8 {
    if den == 0 {
        return from;
    }
    let t = num as f32 / den as f32;
    let value = from as f32 + (to as f32 - from as f32) * t;
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_as_xrgb() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).to_u32(), 0x0012_3456);
        assert_eq!(Rgb::WHITE.to_u32(), 0x00FF_FFFF);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(100, 0, 200);
        assert_eq!(a.lerp(b, 0, 10), a);
        assert_eq!(a.lerp(b, 10, 10), b);
        assert_eq!(a.lerp(b, 5, 10), Rgb::new(50, 50, 200));
    }

    #[test]
    fn lerp_rounds_per_channel() {
        // 127 * 1/3 = 42.33 -> 42, 255 * 1/3 = 85
        let violet = Rgb::new(127, 0, 255);
        assert_eq!(violet.lerp(Rgb::BLACK, 2, 3), Rgb::new(42, 0, 85));
    }

    #[test]
    fn lerp_zero_denominator_is_identity() {
        assert_eq!(Rgb::RED.lerp(Rgb::BLUE, 3, 0), Rgb::RED);
    }

    #[test]
    fn write_to_sets_alpha_when_present() {
        let mut px = [0u8; 4];
        Rgb::new(1, 2, 3).write_to(&mut px);
        assert_eq!(px, [1, 2, 3, 255]);
        let mut rgb = [0u8; 3];
        Rgb::new(4, 5, 6).write_to(&mut rgb);
        assert_eq!(rgb, [4, 5, 6]);
    }
}
