#![forbid(unsafe_code)]

//! Widget identity and the closed set of widget variants.

use vplayer_render::{Canvas, Region};

use crate::button::{Button, ButtonKind};
use crate::slider::{SliderKnob, SliderTrack};
use crate::text_field::{TextField, TextKind};
use crate::{Draw, DrawContext};

/// Stable name of every widget on the player surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetId {
    CurrentFrame,
    TotalFrames,
    Step,
    Fps,
    FourCc,
    Status,
    StepDown,
    PlayPause,
    Stop,
    StepUp,
    SliderTrack,
    SliderKnob,
}

impl WidgetId {
    pub const ALL: [WidgetId; 12] = [
        WidgetId::CurrentFrame,
        WidgetId::TotalFrames,
        WidgetId::Step,
        WidgetId::Fps,
        WidgetId::FourCc,
        WidgetId::Status,
        WidgetId::StepDown,
        WidgetId::PlayPause,
        WidgetId::Stop,
        WidgetId::StepUp,
        WidgetId::SliderTrack,
        WidgetId::SliderKnob,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::CurrentFrame => "current_frame",
            Self::TotalFrames => "total_frames",
            Self::Step => "step",
            Self::Fps => "fps",
            Self::FourCc => "fourcc",
            Self::Status => "status",
            Self::StepDown => "step_down",
            Self::PlayPause => "play_pause",
            Self::Stop => "stop",
            Self::StepUp => "step_up",
            Self::SliderTrack => "slider_track",
            Self::SliderKnob => "slider_knob",
        }
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic role of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    StaticText,
    EditableText,
    Button(ButtonKind),
    SliderTrack,
    SliderKnob,
}

/// Any widget on the player surface.
#[derive(Debug, Clone)]
pub enum Widget {
    Text(TextField),
    Button(Button),
    SliderTrack(SliderTrack),
    SliderKnob(SliderKnob),
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Text(field) => match field.kind() {
                TextKind::Static => WidgetKind::StaticText,
                TextKind::Editable => WidgetKind::EditableText,
            },
            Self::Button(button) => WidgetKind::Button(button.kind()),
            Self::SliderTrack(_) => WidgetKind::SliderTrack,
            Self::SliderKnob(_) => WidgetKind::SliderKnob,
        }
    }

    pub fn region(&self) -> &Region {
        match self {
            Self::Text(field) => field.region(),
            Self::Button(button) => button.region(),
            Self::SliderTrack(track) => track.region(),
            Self::SliderKnob(knob) => knob.track_region(),
        }
    }

    pub fn as_text(&self) -> Option<&TextField> {
        match self {
            Self::Text(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextField> {
        match self {
            Self::Text(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }
}

impl Draw for Widget {
    fn draw(&self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        match self {
            Self::Text(field) => field.draw(canvas, ctx),
            Self::Button(button) => button.draw(canvas, ctx),
            Self::SliderTrack(track) => track.draw(canvas, ctx),
            Self::SliderKnob(knob) => knob.draw(canvas, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_named() {
        let mut names: Vec<_> = WidgetId::ALL.iter().map(|id| id.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WidgetId::ALL.len());
        assert_eq!(WidgetId::PlayPause.to_string(), "play_pause");
    }
}
