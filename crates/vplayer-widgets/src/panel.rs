#![forbid(unsafe_code)]

//! The control panel background and its fixed labels.

use vplayer_core::geometry::Point;
use vplayer_render::{Canvas, FontStyle, Region};

use crate::layout::Label;
use crate::{Draw, DrawContext};

#[derive(Debug, Clone)]
pub struct Panel {
    region: Region,
    labels: Vec<Label>,
    file: Option<(Point, String)>,
}

impl Panel {
    pub fn new(region: Region, labels: Vec<Label>) -> Self {
        Self {
            region,
            labels,
            file: None,
        }
    }

    /// Show the opened file's path at `at`.
    #[must_use]
    pub fn with_file(mut self, at: Point, path: impl Into<String>) -> Self {
        self.file = Some((at, path.into()));
        self
    }

    pub const fn region(&self) -> &Region {
        &self.region
    }
}

impl Draw for Panel {
    fn draw(&self, canvas: &mut Canvas, ctx: DrawContext<'_>) {
        let mut view = canvas.view_mut(&self.region);
        view.fill(ctx.theme.panel_bg);
        for label in &self.labels {
            ctx.renderer
                .put_text(&mut view, label.text, label.at, label.style, ctx.theme.text);
        }
        if let Some((at, path)) = &self.file {
            ctx.renderer
                .put_text(&mut view, path, *at, FontStyle::Regular, ctx.theme.text);
        }
    }
}
