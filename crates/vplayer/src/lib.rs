#![forbid(unsafe_code)]

//! vplayer: a video player whose whole interface lives in one pixel canvas.
//!
//! The video frame, the seek slider, and the control panel are regions of a
//! single RGB buffer. Widgets draw into their regions in place, input is
//! routed through a hit map, and the result is presented once per loop
//! iteration.
//!
//! # Role in vplayer
//! This is the facade crate. It re-exports the working surface of the
//! internal crates and ships the concrete collaborators the binary needs:
//! [`GifSource`] (frames decoded with the `image` crate) and, behind the
//! `window` feature, [`WindowDisplay`].
//!
//! # Example
//!
//! ```
//! use vplayer::{HeadlessDisplay, ManualClock, MemorySource, Player, Program, ProgramConfig};
//!
//! let clock = ManualClock::new();
//! let player = Player::new(MemorySource::new(30, 25.0), "memory://30").unwrap();
//! let display = HeadlessDisplay::new(clock.clone()).idle(2);
//! Program::new(player, display, clock, ProgramConfig::default())
//!     .run()
//!     .unwrap();
//! ```

pub mod cli;
pub mod gif_source;
pub mod logging;
#[cfg(feature = "window")]
pub mod window;

pub use gif_source::GifSource;
#[cfg(feature = "window")]
pub use window::{WindowDisplay, WindowError};

// --- Core re-exports -------------------------------------------------------

pub use vplayer_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use vplayer_core::geometry::{Point, Rect};

// --- Render re-exports -----------------------------------------------------

pub use vplayer_render::bitmap::BitmapRenderer;
pub use vplayer_render::{Canvas, Image, Region, RegionError, Renderer, Rgb};

// --- Backend re-exports ----------------------------------------------------

pub use vplayer_backend::headless::{HeadlessDisplay, MemorySource};
pub use vplayer_backend::{
    BackendClock, Display, ManualClock, SourceError, SystemClock, VideoProperty, VideoSource,
};

// --- Widget re-exports -----------------------------------------------------

pub use vplayer_widgets::{ButtonKind, HitMap, PlayerLayout, Theme, WidgetId};

// --- Runtime re-exports ----------------------------------------------------

pub use vplayer_runtime::{
    PlaybackController, PlaybackState, Player, PlayerError, Program, ProgramConfig, SliderModel,
    Status, StepEditor,
};
