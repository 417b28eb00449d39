#![forbid(unsafe_code)]

//! Gradient buttons with vector glyphs.
//!
//! A button paints a vertical gradient, then its glyph in the theme's glyph
//! colour. Closed glyphs (play triangle, stop square) are filled with the
//! scan-line fill, so their outlines must cross each row exactly twice.

use vplayer_core::geometry::Point;
use vplayer_render::drawing::{fill_closed_glyph, gradient_vertical};
use vplayer_render::{Canvas, Region, RegionMut, Rgb};

use crate::{Draw, DrawContext};

/// Glyph shown on a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Play,
    Pause,
    Stop,
    StepUp,
    StepDown,
}

/// Top/bottom inset of every glyph.
const GLYPH_INSET: i32 = 3;
/// Gap between the pause bars and the centre line.
const PAUSE_GAP: i32 = 3;
/// Width of each pause bar.
const PAUSE_BAR: i32 = 5;

#[derive(Debug, Clone)]
pub struct Button {
    kind: ButtonKind,
    region: Region,
}

impl Button {
    pub fn new(kind: ButtonKind, region: Region) -> Self {
        Self { kind, region }
    }

    pub const fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Switch glyph. Returns `true` if it changed; the caller redraws.
    pub fn set_kind(&mut self, kind: ButtonKind) -> bool {
        let changed = self.kind != kind;
        self.kind = kind;
        changed
    }

    fn draw_glyph(&self, view: &mut RegionMut<'_>, ctx: DrawContext<'_>) {
        let color = ctx.theme.glyph;
        let w = self.region.width() as i32;
        let h = self.region.height() as i32;
        let r = ctx.renderer;
        match self.kind {
            ButtonKind::Play => {
                let a = Point::new(w / 3, GLYPH_INSET);
                let b = Point::new(a.x, h - GLYPH_INSET);
                let c = Point::new(2 * a.x, h / 2);
                r.line(view, a, b, color);
                r.line(view, c, b, color);
                r.line(view, a, c, color);
                fill_closed_glyph(view, color);
            }
            ButtonKind::Stop => {
                let tl = Point::new(3 * w / 8, GLYPH_INSET);
                let br = Point::new(5 * w / 8, h - GLYPH_INSET);
                r.rectangle(view, tl, br, color);
                fill_closed_glyph(view, color);
            }
            ButtonKind::Pause => {
                let mid = w / 2;
                let (top, bottom) = (GLYPH_INSET, h - GLYPH_INSET);
                for col in 0..PAUSE_BAR {
                    for x in [mid + PAUSE_GAP + col, mid - PAUSE_GAP - col] {
                        r.line(view, Point::new(x, top), Point::new(x, bottom), color);
                    }
                }
            }
            ButtonKind::StepUp => chevrons(view, ctx, 2 * w / 8, 4 * w / 8, 1, color),
            ButtonKind::StepDown => chevrons(view, ctx, 4 * w / 8, 6 * w / 8, -1, color),
        }
    }
}

/// Mirrored pair of horizontal strokes that drift by an increasing amount
/// each row, from the top inset down to the middle row.
fn chevrons(
    view: &mut RegionMut<'_>,
    ctx: DrawContext<'_>,
    mut x1: i32,
    mut x2: i32,
    direction: i32,
    color: Rgb,
) {
    let h = view.height() as i32;
    for row in GLYPH_INSET..=h / 2 {
        let shift = direction * (row - GLYPH_INSET);
        x1 += shift;
        x2 += shift;
        let mirror = h - row;
        ctx.renderer
            .line(view, Point::new(x1, row), Point::new(x2, row), color);
        ctx.renderer
            .line(view, Point::new(x1, mirror), Point::new(x2, mirror), color);
    }
}

impl Draw for Button {
    fn draw(&self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("widget_render", widget = "Button", kind = ?self.kind).entered();

        let mut view = canvas.view_mut(&self.region);
        gradient_vertical(&mut view, ctx.theme.button_top, ctx.theme.button_bottom);
        self.draw_glyph(&mut view, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use vplayer_render::bitmap::BitmapRenderer;

    const W: u32 = 60;
    const H: u32 = 18;

    fn render(kind: ButtonKind) -> (Canvas, Region) {
        let mut canvas = Canvas::new(W, H, 3).unwrap();
        let region = canvas.root();
        let theme = Theme::CLASSIC;
        Button::new(kind, region).draw(&mut canvas, DrawContext::new(&BitmapRenderer, &theme));
        (canvas, region)
    }

    fn green_in_row(canvas: &Canvas, y: u32) -> Vec<u32> {
        (0..W).filter(|&x| canvas.pixel(x, y) == Some(Rgb::GREEN)).collect()
    }

    #[test]
    fn background_is_violet_to_black_gradient() {
        let (canvas, _) = render(ButtonKind::Pause);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(127, 0, 255)));
        // row 9 of 18: halfway, 63.5 rounds to 64 and 127.5 to 128
        assert_eq!(canvas.pixel(0, 9), Some(Rgb::new(64, 0, 128)));
        let last = canvas.pixel(0, H - 1).unwrap();
        assert!(last.r < 10 && last.b < 20);
    }

    #[test]
    fn play_triangle_is_filled_solid() {
        let (canvas, _) = render(ButtonKind::Play);
        // middle row runs from the vertical edge at x = 20 to the apex at x = 40
        let row = green_in_row(&canvas, 9);
        assert_eq!(row.first(), Some(&20));
        assert_eq!(row.last(), Some(&40));
        assert_eq!(row.len(), 21);
        // a row near the top is narrow but contiguous
        let row = green_in_row(&canvas, 5);
        assert!(row.windows(2).all(|w| w[1] == w[0] + 1), "{row:?}");
        assert_eq!(row.first(), Some(&20));
    }

    #[test]
    fn stop_square_is_filled_solid() {
        let (canvas, _) = render(ButtonKind::Stop);
        for y in 3..=15 {
            let row = green_in_row(&canvas, y);
            assert_eq!(row, (22..=37).collect::<Vec<_>>(), "row {y}");
        }
        assert!(green_in_row(&canvas, 2).is_empty());
        assert!(green_in_row(&canvas, 16).is_empty());
    }

    #[test]
    fn pause_has_two_bars_with_gap() {
        let (canvas, _) = render(ButtonKind::Pause);
        let row = green_in_row(&canvas, 9);
        let expected: Vec<u32> = (23..=27).chain(33..=37).collect();
        assert_eq!(row, expected);
    }

    #[test]
    fn step_up_drifts_right_step_down_drifts_left() {
        let (up, _) = render(ButtonKind::StepUp);
        let (down, _) = render(ButtonKind::StepDown);

        // first stroke starts at the glyph's base columns
        assert_eq!(green_in_row(&up, 3).first(), Some(&15));
        assert_eq!(green_in_row(&down, 3).first(), Some(&30));

        // accumulated drift of 0+1+2+3+4+5+6 = 21 by the middle row
        assert_eq!(green_in_row(&up, 9).first(), Some(&36));
        assert_eq!(green_in_row(&down, 9).first(), Some(&9));

        // mirrored below the middle
        assert_eq!(green_in_row(&up, 14), green_in_row(&up, 4));
        assert_eq!(green_in_row(&down, 14), green_in_row(&down, 4));
    }

    #[test]
    fn set_kind_reports_change() {
        let canvas = Canvas::new(W, H, 3).unwrap();
        let mut b = Button::new(ButtonKind::Play, canvas.root());
        assert!(b.set_kind(ButtonKind::Pause));
        assert!(!b.set_kind(ButtonKind::Pause));
        assert_eq!(b.kind(), ButtonKind::Pause);
    }
}
