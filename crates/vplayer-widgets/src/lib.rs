#![forbid(unsafe_code)]

//! Widgets for the player surface.
//!
//! Every widget is a [`Region`](vplayer_render::Region) of the shared canvas
//! plus a role and a draw routine. Widgets never own pixels; they paint
//! through the canvas they are handed.

pub mod button;
pub mod hit_map;
pub mod layout;
pub mod panel;
pub mod slider;
pub mod text_field;
pub mod theme;
pub mod widget;

pub use button::{Button, ButtonKind};
pub use hit_map::{HitArea, HitMap, HitMapError};
pub use layout::{ButtonSpec, FieldSpec, Label, PlayerLayout};
pub use panel::Panel;
pub use slider::{SliderKnob, SliderTrack};
pub use text_field::{TextField, TextKind};
pub use theme::Theme;
pub use widget::{Widget, WidgetId, WidgetKind};

use vplayer_render::{Canvas, Renderer};

/// What a widget needs besides the canvas to draw itself.
#[derive(Clone, Copy)]
pub struct DrawContext<'a> {
    pub renderer: &'a dyn Renderer,
    pub theme: &'a Theme,
}

impl<'a> DrawContext<'a> {
    pub fn new(renderer: &'a dyn Renderer, theme: &'a Theme) -> Self {
        Self { renderer, theme }
    }
}

impl std::fmt::Debug for DrawContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawContext")
            .field("theme", self.theme)
            .finish_non_exhaustive()
    }
}

/// A widget that can repaint its whole region.
pub trait Draw {
    fn draw(&self, canvas: &mut Canvas, ctx: DrawContext<'_>);
}
