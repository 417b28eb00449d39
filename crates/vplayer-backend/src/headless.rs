#![forbid(unsafe_code)]

//! In-memory backends for tests and scripted runs.
//!
//! [`MemorySource`] synthesises distinguishable frames so a test can tell
//! which frame ended up on the canvas. [`HeadlessDisplay`] replays a script
//! of input events and idle periods against a shared [`ManualClock`], so a
//! whole player session runs deterministically without a window.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use tracing::debug;
use vplayer_core::event::Event;
use vplayer_render::{Canvas, Image, Rgb};

use crate::clock::ManualClock;
use crate::display::Display;
use crate::source::{SourceError, VideoProperty, VideoSource, fourcc_code};

/// Path prefix [`MemorySource::open`] understands:
/// `memory://<frames>` or `memory://<frames>@<fps>`.
pub const MEMORY_SCHEME: &str = "memory://";

/// A synthetic video of numbered solid-colour frames.
///
/// Pixel `(0, 0)` of frame `n` encodes `n` in its three channels (low byte in
/// red); see [`MemorySource::frame_index`].
#[derive(Debug, Clone)]
pub struct MemorySource {
    width: u32,
    height: u32,
    frames: u64,
    reported_frames: f64,
    fps: f64,
    fourcc: [u8; 4],
    pos: u64,
    fail_decode_at: Option<u64>,
    closed: bool,
}

impl MemorySource {
    pub const DEFAULT_WIDTH: u32 = 64;
    pub const DEFAULT_HEIGHT: u32 = 48;
    pub const FOURCC: [u8; 4] = *b"MEM ";

    /// A source with `frames` decodable frames played at `fps`.
    pub fn new(frames: u64, fps: f64) -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            frames,
            reported_frames: frames as f64,
            fps,
            fourcc: Self::FOURCC,
            pos: 0,
            fail_decode_at: None,
            closed: false,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Start with the read position at `frame`.
    #[must_use]
    pub fn with_start(mut self, frame: u64) -> Self {
        self.pos = frame.min(self.frames);
        self
    }

    /// Report a frame count different from the number of decodable frames.
    #[must_use]
    pub fn with_reported_frame_count(mut self, count: f64) -> Self {
        self.reported_frames = count;
        self
    }

    #[must_use]
    pub fn with_fourcc(mut self, tag: [u8; 4]) -> Self {
        self.fourcc = tag;
        self
    }

    /// Make `query_frame` fail when it would return frame `frame`.
    #[must_use]
    pub fn with_decode_failure_at(mut self, frame: u64) -> Self {
        self.fail_decode_at = Some(frame);
        self
    }

    /// Index of the next frame to be read.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// The image frame `index` decodes to.
    pub fn frame_image(&self, index: u64) -> Image {
        let shade = (index.wrapping_mul(37) % 256) as u8;
        let mut image = Image::filled(
            self.width,
            self.height,
            3,
            Rgb::new(shade, 255 - shade, 128),
        );
        image.set_pixel(0, 0, Self::marker(index));
        image
    }

    /// Recover the frame index from an image produced by this source.
    pub fn frame_index(image: &Image) -> Option<u64> {
        image.pixel(0, 0).map(Self::decode_marker)
    }

    /// Recover a frame index from the marker colour.
    pub fn decode_marker(color: Rgb) -> u64 {
        u64::from(color.r) | (u64::from(color.g) << 8) | (u64::from(color.b) << 16)
    }

    fn marker(index: u64) -> Rgb {
        Rgb::new(
            (index & 0xFF) as u8,
            ((index >> 8) & 0xFF) as u8,
            ((index >> 16) & 0xFF) as u8,
        )
    }

    fn parse(spec: &str) -> Option<(u64, f64)> {
        let (frames, fps) = match spec.split_once('@') {
            Some((frames, fps)) => (frames, fps.parse().ok()?),
            None => (spec, 25.0),
        };
        Some((frames.parse().ok()?, fps))
    }
}

impl VideoSource for MemorySource {
    fn open(path: &Path) -> Result<Self, SourceError> {
        let Some(spec) = path.to_str().and_then(|s| s.strip_prefix(MEMORY_SCHEME)) else {
            return Err(SourceError::not_found(path));
        };
        let (frames, fps) = Self::parse(spec)
            .ok_or_else(|| SourceError::unsupported(path, "expected memory://<frames>[@<fps>]"))?;
        debug!(frames, fps, "opened memory source");
        Ok(Self::new(frames, fps))
    }

    fn grab(&mut self) -> bool {
        if self.closed || self.pos >= self.frames {
            return false;
        }
        self.pos += 1;
        true
    }

    fn query_frame(&mut self) -> Option<Image> {
        if self.closed || self.pos >= self.frames || self.fail_decode_at == Some(self.pos) {
            return None;
        }
        let image = self.frame_image(self.pos);
        self.pos += 1;
        Some(image)
    }

    fn property(&self, prop: VideoProperty) -> f64 {
        match prop {
            VideoProperty::Fps => self.fps,
            VideoProperty::PosFrames => self.pos as f64,
            VideoProperty::FourCc => fourcc_code(self.fourcc),
            VideoProperty::FrameCount => self.reported_frames,
        }
    }

    fn set_property(&mut self, prop: VideoProperty, value: f64) -> bool {
        match prop {
            VideoProperty::PosFrames if value.is_finite() => {
                self.pos = (value.max(0.0) as u64).min(self.frames);
                true
            }
            _ => false,
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// One entry of a [`HeadlessDisplay`] script.
#[derive(Debug, Clone, PartialEq)]
pub enum Scripted {
    /// Deliver this event immediately.
    Event(Event),
    /// Let the whole poll timeout elapse with no input.
    Idle,
    /// Let `Duration` pass (capped at the poll timeout) with no input.
    Wait(Duration),
}

/// A display that replays a script and records what was presented.
///
/// When the script runs out, every further poll reports [`Event::Quit`].
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    script: VecDeque<Scripted>,
    clock: ManualClock,
    presents: usize,
    polls: Vec<Duration>,
    last_present: Option<Vec<u8>>,
}

impl HeadlessDisplay {
    /// A display whose idle periods advance `clock`.
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn event(mut self, event: Event) -> Self {
        self.push(Scripted::Event(event));
        self
    }

    #[must_use]
    pub fn events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.script.extend(events.into_iter().map(Scripted::Event));
        self
    }

    /// Append `count` idle polls.
    #[must_use]
    pub fn idle(mut self, count: usize) -> Self {
        self.script
            .extend(std::iter::repeat_n(Scripted::Idle, count));
        self
    }

    pub fn push(&mut self, step: Scripted) {
        self.script.push_back(step);
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Number of `show_canvas` calls so far.
    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Timeouts passed to each `poll_event` call, in order.
    pub fn poll_timeouts(&self) -> &[Duration] {
        &self.polls
    }

    /// Script entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Bytes of the most recently presented canvas.
    pub fn last_present(&self) -> Option<&[u8]> {
        self.last_present.as_deref()
    }
}

impl Display for HeadlessDisplay {
    type Error = std::convert::Infallible;

    fn show_canvas(&mut self, canvas: &Canvas) -> Result<(), Self::Error> {
        self.presents += 1;
        match &mut self.last_present {
            Some(buf) => {
                buf.clear();
                buf.extend_from_slice(canvas.as_bytes());
            }
            None => self.last_present = Some(canvas.as_bytes().to_vec()),
        }
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, Self::Error> {
        self.polls.push(timeout);
        match self.script.pop_front() {
            Some(Scripted::Event(event)) => Ok(Some(event)),
            Some(Scripted::Idle) => {
                self.clock.advance(timeout);
                Ok(None)
            }
            Some(Scripted::Wait(d)) => {
                self.clock.advance(d.min(timeout));
                Ok(None)
            }
            None => Ok(Some(Event::Quit)),
        }
    }
}
