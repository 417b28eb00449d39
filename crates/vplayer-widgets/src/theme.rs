#![forbid(unsafe_code)]

//! Colour theme.

use vplayer_render::Rgb;

/// Immutable colours for every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Control panel and static text background.
    pub panel_bg: Rgb,
    pub slider_track: Rgb,
    pub knob: Rgb,
    /// Button gradient, top row.
    pub button_top: Rgb,
    /// Button gradient, approached by the bottom row.
    pub button_bottom: Rgb,
    /// Button glyph foreground.
    pub glyph: Rgb,
    pub text: Rgb,
    pub edit_bg: Rgb,
    pub edit_border: Rgb,
}

impl Theme {
    pub const CLASSIC: Theme = Theme {
        panel_bg: Rgb::new(240, 235, 226),
        slider_track: Rgb::new(254, 118, 94),
        knob: Rgb::new(100, 150, 100),
        button_top: Rgb::new(127, 0, 255),
        button_bottom: Rgb::BLACK,
        glyph: Rgb::GREEN,
        text: Rgb::BLACK,
        edit_bg: Rgb::WHITE,
        edit_border: Rgb::BLACK,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::CLASSIC
    }
}
