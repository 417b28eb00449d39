#![forbid(unsafe_code)]

//! Static and editable text fields.
//!
//! A field is only ever repainted whole: [`TextField::reset`] restores the
//! idle background, and [`TextField::set_text`] always resets before drawing,
//! so a shorter string never leaves pieces of a longer one behind.

use vplayer_core::geometry::Point;
use vplayer_render::{Canvas, FontStyle, Region};

use crate::{Draw, DrawContext};

/// Background style of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Flat panel colour.
    Static,
    /// White interior with a one-pixel black border.
    Editable,
}

/// A one-line text field.
#[derive(Debug, Clone)]
pub struct TextField {
    kind: TextKind,
    region: Region,
    text: String,
    baseline_inset: u32,
}

impl TextField {
    /// Longest string a field holds; longer input is truncated.
    pub const MAX_CHARS: usize = 20;
    /// Left padding before the first glyph.
    pub const MARGIN: i32 = 3;

    /// A field whose text baseline sits `baseline_inset` pixels above the
    /// region's bottom edge.
    pub fn new(kind: TextKind, region: Region, baseline_inset: u32) -> Self {
        Self {
            kind,
            region,
            text: String::new(),
            baseline_inset,
        }
    }

    pub const fn kind(&self) -> TextKind {
        self.kind
    }

    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// The string currently displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Repaint the idle background over the whole field.
    pub fn reset(&self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        let theme = ctx.theme;
        let mut view = canvas.view_mut(&self.region);
        match self.kind {
            TextKind::Static => view.fill(theme.panel_bg),
            TextKind::Editable => {
                view.fill(theme.edit_border);
                let (w, h) = (self.region.width(), self.region.height());
                if w > 2 && h > 2 {
                    if let Ok(mut inner) = view.sub_mut(1, 1, w - 2, h - 2) {
                        inner.fill(theme.edit_bg);
                    }
                }
            }
        }
    }

    /// Reset the field, then draw `text` (truncated to [`Self::MAX_CHARS`]).
    pub fn set_text(&mut self, canvas: &mut Canvas, ctx: DrawContext<'_>, text: &str) {
        self.text.clear();
        self.text.extend(text.chars().take(Self::MAX_CHARS));
        self.draw(canvas, ctx);
    }

    fn baseline(&self) -> Point {
        let y = self.region.height().saturating_sub(self.baseline_inset);
        Point::new(Self::MARGIN, y as i32)
    }
}

impl Draw for TextField {
    fn draw(&self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        self.reset(canvas, ctx);
        if self.text.is_empty() {
            return;
        }
        let mut view = canvas.view_mut(&self.region);
        ctx.renderer.put_text(
            &mut view,
            &self.text,
            self.baseline(),
            FontStyle::Regular,
            ctx.theme.text,
        );
    }
}
