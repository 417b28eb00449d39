#![forbid(unsafe_code)]

//! Fixed player geometry.
//!
//! The player surface is three stacked bands: the video frame, the slider
//! track, and the control panel. Widget rectangles are panel-local; label
//! origins are panel-local text baselines.

use vplayer_core::geometry::{Point, Rect};
use vplayer_render::FontStyle;

use crate::button::ButtonKind;
use crate::text_field::TextKind;
use crate::widget::WidgetId;

/// A text field placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: WidgetId,
    pub kind: TextKind,
    pub rect: Rect,
    pub baseline_inset: u32,
}

/// A button placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    pub id: WidgetId,
    pub kind: ButtonKind,
    pub rect: Rect,
}

/// Fixed panel text, drawn once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: &'static str,
    pub at: Point,
    pub style: FontStyle,
}

impl Label {
    pub const fn new(text: &'static str, x: i32, y: i32) -> Self {
        Self {
            text,
            at: Point::new(x, y),
            style: FontStyle::Regular,
        }
    }

    pub const fn styled(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

/// Sizes and widget placements for the whole surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLayout {
    pub display_width: u32,
    pub frame_height: u32,
    pub slider_height: u32,
    pub panel_height: u32,
    pub knob_width: u32,
    pub channels: u8,
    pub fields: Vec<FieldSpec>,
    pub buttons: Vec<ButtonSpec>,
    pub labels: Vec<Label>,
    /// Baseline of the opened file's path.
    pub file_label_at: Point,
}

impl PlayerLayout {
    /// Controls in hit-test priority order.
    pub const HIT_PRIORITY: [WidgetId; 6] = [
        WidgetId::SliderTrack,
        WidgetId::PlayPause,
        WidgetId::Stop,
        WidgetId::StepUp,
        WidgetId::StepDown,
        WidgetId::Step,
    ];

    #[must_use]
    pub fn with_display_width(mut self, width: u32) -> Self {
        self.display_width = width;
        self
    }

    #[must_use]
    pub fn with_frame_height(mut self, height: u32) -> Self {
        self.frame_height = height;
        self
    }

    #[must_use]
    pub fn with_knob_width(mut self, width: u32) -> Self {
        self.knob_width = width;
        self
    }

    #[must_use]
    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    pub fn canvas_height(&self) -> u32 {
        self.frame_height + self.slider_height + self.panel_height
    }

    /// The video band, in canvas coordinates.
    pub fn frame_rect(&self) -> Rect {
        rect(0, 0, self.display_width, self.frame_height)
    }

    /// The slider band, in canvas coordinates.
    pub fn slider_rect(&self) -> Rect {
        rect(0, self.frame_height, self.display_width, self.slider_height)
    }

    /// The control panel, in canvas coordinates.
    pub fn panel_rect(&self) -> Rect {
        rect(
            0,
            self.frame_height + self.slider_height,
            self.display_width,
            self.panel_height,
        )
    }

    pub fn field(&self, id: WidgetId) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn button(&self, id: WidgetId) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.id == id)
    }
}

fn rect(x: u32, y: u32, w: u32, h: u32) -> Rect {
    let c = |v: u32| u16::try_from(v).unwrap_or(u16::MAX);
    Rect::new(c(x), c(y), c(w), c(h))
}

const fn field(id: WidgetId, kind: TextKind, x: u16, y: u16, w: u16, h: u16, inset: u32) -> FieldSpec {
    FieldSpec {
        id,
        kind,
        rect: Rect::new(x, y, w, h),
        baseline_inset: inset,
    }
}

const fn button(id: WidgetId, kind: ButtonKind, x: u16) -> ButtonSpec {
    ButtonSpec {
        id,
        kind,
        rect: Rect::new(x, 48, 60, 18),
    }
}

impl Default for PlayerLayout {
    fn default() -> Self {
        use TextKind::{Editable, Static};
        Self {
            display_width: 840,
            frame_height: 480,
            slider_height: 10,
            panel_height: 200,
            knob_width: 15,
            channels: 3,
            fields: vec![
                field(WidgetId::CurrentFrame, Static, 150, 88, 120, 18, 4),
                field(WidgetId::TotalFrames, Static, 430, 88, 120, 18, 4),
                field(WidgetId::Step, Editable, 65, 48, 50, 18, 4),
                field(WidgetId::Fps, Static, 755, 88, 50, 18, 4),
                field(WidgetId::FourCc, Static, 755, 48, 50, 22, 8),
                field(WidgetId::Status, Static, 395, 18, 130, 22, 8),
            ],
            buttons: vec![
                button(WidgetId::StepDown, ButtonKind::StepDown, 285),
                button(WidgetId::PlayPause, ButtonKind::Play, 350),
                button(WidgetId::Stop, ButtonKind::Stop, 415),
                button(WidgetId::StepUp, ButtonKind::StepUp, 480),
            ],
            labels: vec![
                Label::new("Control Panel", 3, 15).styled(FontStyle::BoldItalic),
                Label::new("Status : ", 325, 30),
                Label::new("Step : ", 3, 60),
                Label::new("FOURCC : ", 668, 60),
                Label::new("Current Frame : ", 3, 100),
                Label::new("Total Frames : ", 300, 100),
                Label::new("FPS : ", 700, 100),
                Label::new("File : ", 3, 140),
            ],
            file_label_at: Point::new(65, 140),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_stack() {
        let l = PlayerLayout::default();
        assert_eq!(l.canvas_height(), 690);
        assert_eq!(l.frame_rect(), Rect::new(0, 0, 840, 480));
        assert_eq!(l.slider_rect(), Rect::new(0, 480, 840, 10));
        assert_eq!(l.panel_rect(), Rect::new(0, 490, 840, 200));
    }

    #[test]
    fn widgets_fit_inside_panel() {
        let l = PlayerLayout::default();
        let panel = Rect::from_size(l.display_width as u16, l.panel_height as u16);
        let rects = l
            .fields
            .iter()
            .map(|f| f.rect)
            .chain(l.buttons.iter().map(|b| b.rect));
        for r in rects {
            assert_eq!(panel.intersection(&r), r, "{r:?}");
        }
    }

    #[test]
    fn every_hit_target_has_a_placement() {
        let l = PlayerLayout::default();
        for id in PlayerLayout::HIT_PRIORITY {
            let placed = id == WidgetId::SliderTrack
                || l.field(id).is_some()
                || l.button(id).is_some();
            assert!(placed, "{id}");
        }
    }

    #[test]
    fn builders_override_defaults() {
        let l = PlayerLayout::default()
            .with_frame_height(240)
            .with_knob_width(9)
            .with_channels(4);
        assert_eq!(l.slider_rect().y, 240);
        assert_eq!(l.knob_width, 9);
        assert_eq!(l.channels, 4);
        assert_eq!(l.with_display_width(900).frame_rect().width, 900);
    }
}
