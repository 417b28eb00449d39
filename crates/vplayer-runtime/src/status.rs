#![forbid(unsafe_code)]

//! Status line values.

/// What the status field says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Stopped,
    Playing,
    Paused,
    SliderMoved,
    SteppedUp,
    SteppedDown,
    EndReached,
}

impl Status {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::SliderMoved => "Slider moved",
            Self::SteppedUp => "Stepped Up",
            Self::SteppedDown => "Stepped Down",
            Self::EndReached => "End reached",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
