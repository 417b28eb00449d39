#![forbid(unsafe_code)]

//! Playback runtime.
//!
//! # Role in vplayer
//! `vplayer-runtime` is the orchestrator. It owns the [`Player`] aggregate
//! (canvas, widgets, hit map, controllers) and drives it from the
//! [`Program`] loop: poll one event from the display, route it, advance
//! playback when a frame interval has passed, refresh the canvas, present.
//!
//! # Key components
//! - [`SliderModel`]: pixel ↔ frame mapping with step quantization.
//! - [`PlaybackController`]: the Stopped/Playing/Paused state machine over a
//!   video source, with the busy guard around seeks.
//! - [`StepEditor`]: the step field's line editor.
//! - [`InputDispatcher`]: pointer events to [`Action`]s.
//! - [`Player`]: everything above, wired to the canvas.
//! - [`Program`]: the loop, generic over source, display, and clock.
//!
//! # How it fits in the system
//! Widgets come from `vplayer-widgets`, pixels from `vplayer-render`, and
//! every outside dependency (decoder, window, clock) through the traits in
//! `vplayer-backend`. The facade crate picks concrete backends and calls
//! [`Program::run`].

pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod player;
pub mod program;
pub mod slider_model;
pub mod status;
pub mod step_editor;

pub use controller::{PlaybackController, PlaybackState, StreamInfo, TickOutcome};
pub use dispatcher::{Action, Actions, InputDispatcher, Pointer};
pub use error::PlayerError;
pub use player::Player;
pub use program::{Program, ProgramConfig};
pub use slider_model::SliderModel;
pub use status::Status;
pub use step_editor::StepEditor;
