#![forbid(unsafe_code)]

//! Presentation and input surface.

use std::time::Duration;

use vplayer_core::event::Event;
use vplayer_render::Canvas;

/// A window (or stand-in) that shows the canvas and yields input.
///
/// This is both halves of the platform boundary: the runtime hands the whole
/// canvas to [`show_canvas`](Display::show_canvas) once per loop iteration and
/// asks [`poll_event`](Display::poll_event) for at most one event.
pub trait Display {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Present the full canvas.
    fn show_canvas(&mut self, canvas: &Canvas) -> Result<(), Self::Error>;

    /// Wait up to `timeout` for one input event.
    ///
    /// Returns `Ok(None)` when the timeout elapses with nothing to report.
    /// A closed window reports [`Event::Quit`].
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, Self::Error>;
}
