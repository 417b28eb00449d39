#![forbid(unsafe_code)]

//! Playback state machine over a [`VideoSource`].
//!
//! # States
//!
//! `Stopped → Playing ⇄ Paused`, with Stop reachable from both and running
//! off the end of the stream dropping back to `Paused` with
//! [`Status::EndReached`]. The controller tracks the 0-based index of the
//! last decoded frame; after any decode the source's read position is that
//! index plus one, so a playback tick skips `step - 1` frames and decodes
//! the next.
//!
//! # Busy guard
//!
//! Every seek runs with `busy` set. While it is set, playback ticks and
//! further seeks are refused, so a slider drag and a tick can never issue
//! interleaved seeks from the same call stack. [`PlaybackController::with_busy`]
//! exposes the guard to callers that need to bracket several operations.

use tracing::{debug, info, trace, warn};
use vplayer_backend::{VideoProperty, VideoSource, fourcc_string};
use vplayer_render::Image;

use crate::error::{PlayerError, Result};
use crate::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Facts read from the source at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Reported frames per second; may be `<= 0` if the container does not
    /// know.
    pub fps: f64,
    pub start_frame: u64,
    pub frame_count: u64,
    pub fourcc: String,
}

impl StreamInfo {
    /// FPS rounded for display.
    pub fn fps_rounded(&self) -> i64 {
        if self.fps.is_finite() {
            self.fps.round() as i64
        } else {
            0
        }
    }
}

/// What a playback tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing.
    Idle,
    /// A seek was in progress; nothing happened.
    Busy,
    /// Advanced to this frame.
    Advanced(u64),
    /// Playback stopped at the end of the stream. The current frame may
    /// have advanced to the last frame first.
    EndReached,
}

pub struct PlaybackController<S> {
    source: S,
    info: StreamInfo,
    step: u64,
    current: u64,
    state: PlaybackState,
    status: Status,
    busy: bool,
    frame: Image,
}

impl<S: VideoSource> PlaybackController<S> {
    /// Read the stream's properties, seek to its start, and decode the
    /// first frame.
    ///
    /// # Errors
    ///
    /// [`PlayerError::NoFrames`] if the source reports fewer than one frame
    /// and [`PlayerError::FirstFrame`] if the first frame does not decode.
    pub fn new(mut source: S) -> Result<Self> {
        let fps = source.property(VideoProperty::Fps);
        let start = source.property(VideoProperty::PosFrames);
        let fourcc = fourcc_string(source.property(VideoProperty::FourCc));
        let count = source.property(VideoProperty::FrameCount);

        // NaN fails this comparison too.
        if !(count >= 1.0) {
            return Err(PlayerError::NoFrames { count });
        }
        let frame_count = count as u64;
        let start_frame = if start.is_finite() && start > 0.0 {
            (start as u64).min(frame_count - 1)
        } else {
            0
        };

        source.set_property(VideoProperty::PosFrames, start_frame as f64);
        let Some(frame) = source.query_frame() else {
            return Err(PlayerError::FirstFrame { fourcc });
        };

        info!(frame_count, fps, start_frame, fourcc = %fourcc, "stream opened");
        Ok(Self {
            source,
            info: StreamInfo {
                fps,
                start_frame,
                frame_count,
                fourcc,
            },
            step: 1,
            current: start_frame,
            state: PlaybackState::Stopped,
            status: Status::Stopped,
            busy: false,
            frame,
        })
    }

    pub fn info(&self) -> &StreamInfo {
        &self.info
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Index of the frame on screen.
    pub const fn current_frame(&self) -> u64 {
        self.current
    }

    pub const fn start_frame(&self) -> u64 {
        self.info.start_frame
    }

    pub const fn frame_count(&self) -> u64 {
        self.info.frame_count
    }

    pub const fn last_frame(&self) -> u64 {
        self.info.frame_count - 1
    }

    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Set the frames advanced per tick and per step. Zero becomes one.
    pub fn set_step(&mut self, step: u64) -> u64 {
        self.step = step.max(1);
        debug!(step = self.step, "step committed");
        self.step
    }

    /// The last successfully decoded frame.
    pub fn frame(&self) -> &Image {
        &self.frame
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run `f` with the busy flag held. Returns `None` without calling `f`
    /// if the flag is already held.
    pub fn with_busy<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if self.busy {
            return None;
        }
        self.busy = true;
        let out = f(self);
        self.busy = false;
        Some(out)
    }

    /// Show `status` unless playing. Used for the slider and step notices.
    pub fn note(&mut self, status: Status) {
        if !self.is_playing() {
            self.status = status;
        }
    }

    pub fn toggle_play(&mut self) -> PlaybackState {
        match self.state {
            PlaybackState::Playing => self.transition(PlaybackState::Paused, Status::Paused),
            PlaybackState::Stopped | PlaybackState::Paused => {
                self.transition(PlaybackState::Playing, Status::Playing);
            }
        }
        self.state
    }

    /// Stop and rewind to the start frame.
    pub fn stop(&mut self) {
        self.transition(PlaybackState::Stopped, Status::Stopped);
        self.seek_to(self.info.start_frame);
    }

    /// Move `step` frames forward. Returns `false`, changing nothing, if
    /// that would pass the last frame or a seek is in progress.
    pub fn step_up(&mut self) -> bool {
        let target = match self.current.checked_add(self.step) {
            Some(t) if t <= self.last_frame() => t,
            _ => return false,
        };
        if !self.seek_to(target) {
            return false;
        }
        self.note(Status::SteppedUp);
        true
    }

    /// Move `step` frames back. Returns `false`, changing nothing, if that
    /// would pass the start frame or a seek is in progress.
    pub fn step_down(&mut self) -> bool {
        let target = match self.current.checked_sub(self.step) {
            Some(t) if t >= self.info.start_frame => t,
            _ => return false,
        };
        if !self.seek_to(target) {
            return false;
        }
        self.note(Status::SteppedDown);
        true
    }

    /// Jump to `frame`, clamped to the stream. Returns `false` if a seek is
    /// in progress.
    pub fn seek(&mut self, frame: u64) -> bool {
        self.seek_to(frame.min(self.last_frame()))
    }

    /// Advance playback by one step if playing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Idle;
        }
        if self.busy {
            return TickOutcome::Busy;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("playback_tick", from = self.current, step = self.step)
            .entered();

        let target = match self.current.checked_add(self.step) {
            Some(t) if t <= self.last_frame() => t,
            _ => return self.end_reached(),
        };
        for _ in 1..self.step {
            if !self.source.grab() {
                return self.end_reached();
            }
        }
        let Some(frame) = self.source.query_frame() else {
            return self.end_reached();
        };
        self.frame = frame;
        self.current = target;
        trace!(frame = target, "advanced");

        if target == self.last_frame() {
            return self.end_reached();
        }
        TickOutcome::Advanced(target)
    }

    /// Release the source.
    pub fn close(&mut self) {
        self.source.close();
    }

    fn end_reached(&mut self) -> TickOutcome {
        self.transition(PlaybackState::Paused, Status::EndReached);
        TickOutcome::EndReached
    }

    fn transition(&mut self, state: PlaybackState, status: Status) {
        debug!(from = ?self.state, to = ?state, status = %status, "playback transition");
        self.state = state;
        self.status = status;
    }

    /// Seek the source to `frame` and decode it. A decode miss keeps the
    /// previous image but still moves the position.
    fn seek_to(&mut self, frame: u64) -> bool {
        self.with_busy(|c| {
            #[cfg(feature = "tracing")]
            let _span = tracing::debug_span!("seek", frame).entered();

            c.source.set_property(VideoProperty::PosFrames, frame as f64);
            match c.source.query_frame() {
                Some(image) => c.frame = image,
                None => warn!(frame, "decode miss during seek; keeping last frame"),
            }
            c.current = frame;
            debug!(frame, "seek");
        })
        .is_some()
    }
}

impl<S> std::fmt::Debug for PlaybackController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("info", &self.info)
            .field("step", &self.step)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vplayer_backend::headless::MemorySource;

    fn controller(frames: u64) -> PlaybackController<MemorySource> {
        PlaybackController::new(MemorySource::new(frames, 25.0)).unwrap()
    }

    fn shown(c: &PlaybackController<MemorySource>) -> Option<u64> {
        MemorySource::frame_index(c.frame())
    }

    #[test]
    fn starts_stopped_on_first_frame() {
        let c = controller(10);
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.status(), Status::Stopped);
        assert_eq!(c.current_frame(), 0);
        assert_eq!(shown(&c), Some(0));
        assert_eq!(c.info().fourcc, "MEM ");
        assert_eq!(c.info().fps_rounded(), 25);
    }

    #[test]
    fn honours_reported_start_position() {
        let c = PlaybackController::new(MemorySource::new(10, 25.0).with_start(4)).unwrap();
        assert_eq!(c.start_frame(), 4);
        assert_eq!(shown(&c), Some(4));
    }

    #[test]
    fn rejects_empty_streams() {
        let err = PlaybackController::new(MemorySource::new(0, 25.0)).unwrap_err();
        assert!(matches!(err, PlayerError::NoFrames { .. }));
        let err =
            PlaybackController::new(MemorySource::new(5, 25.0).with_reported_frame_count(f64::NAN))
                .unwrap_err();
        assert!(matches!(err, PlayerError::NoFrames { .. }));
    }

    #[test]
    fn first_frame_failure_names_fourcc() {
        let src = MemorySource::new(5, 25.0)
            .with_fourcc(*b"H264")
            .with_decode_failure_at(0);
        match PlaybackController::new(src) {
            Err(PlayerError::FirstFrame { fourcc }) => assert_eq!(fourcc, "H264"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn toggle_cycles_playing_and_paused() {
        let mut c = controller(10);
        assert_eq!(c.toggle_play(), PlaybackState::Playing);
        assert_eq!(c.status(), Status::Playing);
        assert_eq!(c.toggle_play(), PlaybackState::Paused);
        assert_eq!(c.status(), Status::Paused);
        assert_eq!(c.toggle_play(), PlaybackState::Playing);
    }

    #[test]
    fn tick_advances_by_step() {
        let mut c = controller(20);
        c.set_step(3);
        assert_eq!(c.tick(), TickOutcome::Idle);
        c.toggle_play();
        assert_eq!(c.tick(), TickOutcome::Advanced(3));
        assert_eq!(c.tick(), TickOutcome::Advanced(6));
        assert_eq!(shown(&c), Some(6));
    }

    #[test]
    fn reaching_last_frame_pauses_with_end_status() {
        let mut c = controller(3);
        c.toggle_play();
        assert_eq!(c.tick(), TickOutcome::Advanced(1));
        assert_eq!(c.tick(), TickOutcome::EndReached);
        assert_eq!(c.current_frame(), 2);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.status(), Status::EndReached);
        assert!(!c.is_playing());
    }

    #[test]
    fn short_stream_ends_on_decode_miss() {
        // Claims 10 frames but only 4 decode.
        let src = MemorySource::new(4, 25.0).with_reported_frame_count(10.0);
        let mut c = PlaybackController::new(src).unwrap();
        c.toggle_play();
        for _ in 0..3 {
            assert!(matches!(c.tick(), TickOutcome::Advanced(_)));
        }
        assert_eq!(c.tick(), TickOutcome::EndReached);
        assert_eq!(c.current_frame(), 3);
        assert_eq!(shown(&c), Some(3));
    }

    #[test]
    fn step_down_below_start_is_a_no_op() {
        let mut c = controller(50);
        c.set_step(5);
        c.seek(3);
        let before = c.status();
        assert!(!c.step_down());
        assert_eq!(c.current_frame(), 3);
        assert_eq!(c.status(), before);
    }

    #[test]
    fn steps_stay_inside_stream() {
        let mut c = controller(10);
        c.set_step(4);
        assert!(c.step_up());
        assert!(c.step_up());
        assert_eq!(c.current_frame(), 8);
        assert!(!c.step_up());
        assert_eq!(c.status(), Status::SteppedUp);
        assert!(c.step_down());
        assert_eq!(c.current_frame(), 4);
        assert_eq!(c.status(), Status::SteppedDown);
        assert_eq!(shown(&c), Some(4));
    }

    #[test]
    fn step_status_is_hidden_while_playing() {
        let mut c = controller(10);
        c.toggle_play();
        assert!(c.step_up());
        assert_eq!(c.status(), Status::Playing);
    }

    #[test]
    fn stop_rewinds_to_start() {
        let mut c = controller(10);
        c.toggle_play();
        c.tick();
        c.tick();
        c.stop();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.status(), Status::Stopped);
        assert_eq!(c.current_frame(), 0);
        assert_eq!(shown(&c), Some(0));
    }

    #[test]
    fn seek_clamps_and_keeps_frame_on_decode_miss() {
        let src = MemorySource::new(10, 25.0).with_decode_failure_at(6);
        let mut c = PlaybackController::new(src).unwrap();
        assert!(c.seek(100));
        assert_eq!(c.current_frame(), 9);
        assert!(c.seek(6));
        assert_eq!(c.current_frame(), 6);
        assert_eq!(shown(&c), Some(9));
    }

    #[test]
    fn busy_guard_blocks_reentrant_ticks_and_seeks() {
        let mut c = controller(10);
        c.toggle_play();
        let inner = c.with_busy(|c| (c.is_busy(), c.tick(), c.step_up(), c.seek(5)));
        assert_eq!(inner, Some((true, TickOutcome::Busy, false, false)));
        assert!(!c.is_busy());
        assert_eq!(c.current_frame(), 0);
        assert_eq!(c.tick(), TickOutcome::Advanced(1));
    }

    #[test]
    fn nested_guard_is_refused() {
        let mut c = controller(2);
        assert_eq!(c.with_busy(|c| c.with_busy(|_| ())), Some(None));
    }

    #[test]
    fn note_only_applies_when_not_playing() {
        let mut c = controller(10);
        c.note(Status::SliderMoved);
        assert_eq!(c.status(), Status::SliderMoved);
        c.toggle_play();
        c.note(Status::SliderMoved);
        assert_eq!(c.status(), Status::Playing);
    }
}
