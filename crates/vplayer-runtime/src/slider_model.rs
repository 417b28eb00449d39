#![forbid(unsafe_code)]

//! Pixel ↔ frame mapping for the slider.
//!
//! Both directions round up, so the mapping is not an exact inverse: a pixel
//! taken to a frame and back lands within one knob width (plus one step's
//! worth of pixels) of where it started. Every frame the model hands out is
//! a multiple of `step` inside `[0, max_frame - 1]`.

/// Slider geometry plus the quantization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderModel {
    start_frame: u64,
    max_frame: u64,
    step: u64,
    knob_width: u32,
    track_width: u32,
}

impl SliderModel {
    /// A model for a stream of `max_frame` frames on a `track_width` pixel
    /// track. Zero sizes are bumped to one and the knob is clamped to the
    /// track.
    pub fn new(max_frame: u64, track_width: u32, knob_width: u32) -> Self {
        let track_width = track_width.max(1);
        Self {
            start_frame: 0,
            max_frame: max_frame.max(1),
            step: 1,
            knob_width: knob_width.min(track_width),
            track_width,
        }
    }

    #[must_use]
    pub fn with_start(mut self, start_frame: u64) -> Self {
        self.start_frame = start_frame.min(self.last_frame());
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: u64) -> Self {
        self.set_step(step);
        self
    }

    /// Set the quantization step. Zero is treated as one.
    pub fn set_step(&mut self, step: u64) {
        self.step = step.max(1);
    }

    pub const fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub const fn max_frame(&self) -> u64 {
        self.max_frame
    }

    pub const fn last_frame(&self) -> u64 {
        self.max_frame - 1
    }

    pub const fn step(&self) -> u64 {
        self.step
    }

    pub const fn knob_width(&self) -> u32 {
        self.knob_width
    }

    pub const fn track_width(&self) -> u32 {
        self.track_width
    }

    /// Pixels the knob's left edge can travel.
    pub const fn knob_span(&self) -> u32 {
        self.track_width - self.knob_width
    }

    /// Round `frame` down to a multiple of `step`.
    #[inline]
    pub const fn quantize(&self, frame: u64) -> u64 {
        frame / self.step * self.step
    }

    /// The frame under track pixel `pixel`.
    pub fn frame_at(&self, pixel: u32) -> u64 {
        let raw = ceil_div(u128::from(pixel) * u128::from(self.max_frame), self.track_width.into());
        let raw = u64::try_from(raw).unwrap_or(u64::MAX);
        self.quantize(raw.min(self.last_frame()))
    }

    /// The knob's left edge for `frame`. The frame is mapped as is; only
    /// the displayed number is quantized.
    pub fn pixel_for(&self, frame: u64) -> u32 {
        let frame = frame.min(self.last_frame());
        let px = ceil_div(
            u128::from(frame) * u128::from(self.knob_span()),
            self.max_frame.into(),
        );
        u32::try_from(px).unwrap_or(u32::MAX).min(self.knob_span())
    }
}

#[inline]
fn ceil_div(num: u128, den: u128) -> u128 {
    num.div_ceil(den)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_to_frame_rounds_up() {
        let m = SliderModel::new(100, 840, 15);
        assert_eq!(m.frame_at(0), 0);
        // 1 * 100 / 840 = 0.119 -> 1
        assert_eq!(m.frame_at(1), 1);
        assert_eq!(m.frame_at(420), 50);
    }

    #[test]
    fn pixel_to_frame_clamps_to_last_frame() {
        let m = SliderModel::new(100, 840, 15);
        assert_eq!(m.frame_at(839), 99);
        assert_eq!(m.frame_at(5_000), 99);
    }

    #[test]
    fn frame_to_pixel_rounds_up() {
        let m = SliderModel::new(100, 840, 15);
        // 10 * 825 / 100 = 82.5 -> 83
        assert_eq!(m.pixel_for(10), 83);
        assert_eq!(m.pixel_for(0), 0);
        assert_eq!(m.pixel_for(99), 817);
    }

    #[test]
    fn knob_never_leaves_track() {
        let m = SliderModel::new(3, 100, 15);
        for f in 0..10 {
            assert!(m.pixel_for(f) <= m.knob_span());
        }
    }

    #[test]
    fn pixel_to_frame_is_quantized() {
        let m = SliderModel::new(50, 500, 10).with_step(5);
        assert_eq!(m.quantize(13), 10);
        assert_eq!(m.frame_at(135), 10); // ceil(13.5) = 14 -> 10
    }

    #[test]
    fn knob_follows_the_raw_frame() {
        let m = SliderModel::new(50, 500, 10).with_step(5);
        // 13 * 490 / 50 = 127.4 -> 128
        assert_eq!(m.pixel_for(13), 128);
        assert!(m.pixel_for(13) > m.pixel_for(10));
    }

    #[test]
    fn zero_step_means_one() {
        let mut m = SliderModel::new(10, 100, 10);
        m.set_step(0);
        assert_eq!(m.step(), 1);
        assert_eq!(m.quantize(7), 7);
    }

    #[test]
    fn degenerate_sizes_are_bumped() {
        let m = SliderModel::new(0, 0, 20);
        assert_eq!(m.max_frame(), 1);
        assert_eq!(m.track_width(), 1);
        assert_eq!(m.knob_width(), 1);
        assert_eq!(m.frame_at(0), 0);
        assert_eq!(m.pixel_for(0), 0);
    }

    #[test]
    fn start_is_clamped_into_stream() {
        let m = SliderModel::new(10, 100, 10).with_start(50);
        assert_eq!(m.start_frame(), 9);
    }
}
