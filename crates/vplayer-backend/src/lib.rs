#![forbid(unsafe_code)]
#![doc = "Backend traits for vplayer: video sources, display surfaces, and time."]
#![doc = ""]
#![doc = "This crate defines the boundary between the player runtime and the things it"]
#![doc = "cannot do itself: decode video, put pixels on a screen, and read a clock."]
#![doc = "The runtime is generic over these traits; `headless` provides in-memory"]
#![doc = "implementations for tests and scripted runs."]

pub mod clock;
pub mod display;
pub mod headless;
pub mod source;

pub use clock::{BackendClock, ManualClock, SystemClock};
pub use display::Display;
pub use source::{SourceError, VideoProperty, VideoSource, fourcc_code, fourcc_string};
