#![forbid(unsafe_code)]

//! The video source boundary.
//!
//! A [`VideoSource`] is a sequential decoder with a seekable read position.
//! Properties are reported as `f64`, as container metadata usually is; the
//! runtime rounds and validates them.

use std::path::{Path, PathBuf};

use thiserror::Error;
use vplayer_render::Image;

/// Why a source could not be opened.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open {}: file not found", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot decode {}: {reason}", path.display())]
    UnsupportedCodec { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SourceError {
    #[must_use]
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn unsupported(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::UnsupportedCodec {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Properties a source reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoProperty {
    /// Frames per second; `<= 0` when unknown.
    Fps,
    /// 0-based index of the next frame `query_frame` will return.
    PosFrames,
    /// Codec identifier, four bytes packed little-endian.
    FourCc,
    /// Total number of frames.
    FrameCount,
}

/// A decoded video stream.
pub trait VideoSource {
    /// Open the stream at `path`.
    fn open(path: &Path) -> Result<Self, SourceError>
    where
        Self: Sized;

    /// Skip one frame without decoding it. Returns `false` at end of stream.
    fn grab(&mut self) -> bool;

    /// Decode the next frame, or `None` at end of stream.
    fn query_frame(&mut self) -> Option<Image>;

    fn property(&self, prop: VideoProperty) -> f64;

    /// Set a property. Only [`VideoProperty::PosFrames`] is required to be
    /// writable; returns whether the value was accepted.
    fn set_property(&mut self, prop: VideoProperty, value: f64) -> bool;

    /// Release decoder resources. Further reads return end of stream.
    fn close(&mut self) {}
}

/// Render a packed FOURCC as its four characters.
///
/// Bytes outside printable ASCII become `?`.
pub fn fourcc_string(code: f64) -> String {
    let packed = if code.is_finite() && code >= 0.0 {
        code as u32
    } else {
        0
    };
    packed
        .to_le_bytes()
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

/// Pack four bytes the way [`VideoProperty::FourCc`] reports them.
pub fn fourcc_code(tag: [u8; 4]) -> f64 {
    f64::from(u32::from_le_bytes(tag))
}
