#![forbid(unsafe_code)]

//! Slider track and knob.
//!
//! The track keeps a deep copy of its clean pixels. Moving the knob always
//! restores that copy first and then stamps the knob sprite at the new
//! position, so the previous knob never leaves a trail.

use vplayer_render::{Canvas, Image, Region, RegionError};

use crate::{Draw, DrawContext};

#[derive(Debug, Clone)]
pub struct SliderTrack {
    region: Region,
    clean: Option<Image>,
}

impl SliderTrack {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            clean: None,
        }
    }

    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Track width in pixels.
    pub const fn width(&self) -> u32 {
        self.region.width()
    }

    /// Paint the bare track and capture it as the clean snapshot.
    pub fn paint(&mut self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        canvas.view_mut(&self.region).fill(ctx.theme.slider_track);
        self.clean = Some(canvas.view(&self.region).snapshot());
    }

    /// The captured clean track, once [`paint`](Self::paint) has run.
    pub fn snapshot(&self) -> Option<&Image> {
        self.clean.as_ref()
    }

    /// Copy the clean snapshot back over the track. No-op before `paint`.
    pub fn restore(&self, canvas: &mut Canvas) -> Result<(), RegionError> {
        match &self.clean {
            Some(clean) => canvas.view_mut(&self.region).restore(clean),
            None => Ok(()),
        }
    }
}

impl Draw for SliderTrack {
    fn draw(&self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        let mut view = canvas.view_mut(&self.region);
        match &self.clean {
            Some(clean) if view.restore(clean).is_ok() => {}
            _ => view.fill(ctx.theme.slider_track),
        }
    }
}

/// The draggable knob: a solid sprite the full height of the track.
#[derive(Debug, Clone)]
pub struct SliderKnob {
    track: Region,
    sprite: Image,
    x: u32,
}

impl SliderKnob {
    /// A knob `width` pixels wide on `track`, coloured from `ctx`'s theme.
    pub fn new(track: Region, width: u32, ctx: DrawContext<'_>) -> Self {
        let width = width.clamp(1, track.width());
        let sprite = Image::filled(width, track.height(), track.channels(), ctx.theme.knob);
        Self {
            track,
            sprite,
            x: 0,
        }
    }

    pub const fn track_region(&self) -> &Region {
        &self.track
    }

    pub fn width(&self) -> u32 {
        self.sprite.width()
    }

    /// Left edge of the knob, in track pixels.
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Largest valid left edge.
    pub fn max_x(&self) -> u32 {
        self.track.width() - self.sprite.width()
    }

    /// The knob's current rectangle as a region of the track.
    pub fn region(&self) -> Result<Region, RegionError> {
        self.track
            .sub(self.x, 0, self.sprite.width(), self.sprite.height())
    }

    /// Erase the knob by restoring the clean track, then stamp it at `x`
    /// (clamped so the knob stays on the track).
    pub fn place(
        &mut self,
        canvas: &mut Canvas,
        track: &SliderTrack,
        x: u32,
    ) -> Result<(), RegionError> {
        track.restore(canvas)?;
        self.stamp_at(canvas, x)
    }

    /// Stamp the knob at `x` without erasing the old one. Callers restore
    /// the track first.
    pub fn stamp_at(&mut self, canvas: &mut Canvas, x: u32) -> Result<(), RegionError> {
        self.x = x.min(self.max_x());
        let at = self.region()?;
        canvas.view_mut(&at).restore(&self.sprite)
    }
}

impl Draw for SliderKnob {
    fn draw(&self, canvas: &mut Canvas, _ctx: DrawContext<'_>) {
        if let Ok(at) = self.region() {
            // The region always matches the sprite size.
            let _ = canvas.view_mut(&at).restore(&self.sprite);
        }
    }
}
