#![forbid(unsafe_code)]

//! Fatal startup errors.
//!
//! Anything that reaches [`PlayerError`] ends the process with exit code 1.
//! Running out of frames and rejected input are not errors; they surface as
//! status changes and `bool` returns.

use thiserror::Error;
use vplayer_backend::SourceError;
use vplayer_render::RegionError;
use vplayer_widgets::HitMapError;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Open(#[from] SourceError),

    #[error("Number of frames < 1. Cannot continue (reported {count})")]
    NoFrames { count: f64 },

    #[error("Cannot load video. Missing Codec : {fourcc}")]
    FirstFrame { fourcc: String },

    #[error("invalid layout: {0}")]
    Layout(#[from] RegionError),

    #[error("invalid hit map: {0}")]
    HitMap(#[from] HitMapError),

    #[error("display error: {0}")]
    Display(String),
}

impl PlayerError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }

    #[must_use]
    pub fn display(error: impl std::fmt::Display) -> Self {
        Self::Display(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerError;
    use vplayer_backend::SourceError;

    #[test]
    fn every_variant_exits_with_one() {
        let errors = [
            PlayerError::from(SourceError::not_found("nope.avi")),
            PlayerError::NoFrames { count: 0.0 },
            PlayerError::FirstFrame {
                fourcc: "XVID".to_string(),
            },
            PlayerError::display("window closed"),
        ];
        for error in errors {
            assert_eq!(error.exit_code(), 1, "{error}");
        }
    }

    #[test]
    fn first_frame_message_names_the_codec() {
        let error = PlayerError::FirstFrame {
            fourcc: "H264".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot load video. Missing Codec : H264");
    }
}
