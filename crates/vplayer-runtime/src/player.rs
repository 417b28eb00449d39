#![forbid(unsafe_code)]

//! The player aggregate.
//!
//! [`Player`] owns the canvas, every widget (keyed by [`WidgetId`]), the hit
//! map, the slider model, the playback controller, and the step editor.
//! Input goes in through [`Player::handle_event`], playback through
//! [`Player::advance`], and [`Player::refresh`] brings the canvas in line
//! with the controller once per loop iteration.

use ahash::AHashMap;
use tracing::{debug, warn};
use vplayer_backend::VideoSource;
use vplayer_core::event::{Event, KeyCode, KeyEvent, MouseEvent};
use vplayer_core::geometry::Rect;
use vplayer_render::bitmap::BitmapRenderer;
use vplayer_render::{Canvas, Region, RegionError, Renderer};
use vplayer_widgets::{
    Button, ButtonKind, Draw, DrawContext, HitArea, HitMap, Panel, PlayerLayout, SliderKnob,
    SliderTrack, TextField, Theme, Widget, WidgetId,
};

use crate::controller::{PlaybackController, TickOutcome};
use crate::dispatcher::{Action, InputDispatcher};
use crate::error::Result;
use crate::slider_model::SliderModel;
use crate::status::Status;
use crate::step_editor::StepEditor;

pub struct Player<S> {
    canvas: Canvas,
    layout: PlayerLayout,
    theme: Theme,
    renderer: Box<dyn Renderer>,
    frame_area: Region,
    slider_band: Rect,
    panel: Panel,
    widgets: AHashMap<WidgetId, Widget>,
    hit_map: HitMap,
    slider: SliderModel,
    controller: PlaybackController<S>,
    editor: StepEditor,
    dispatcher: InputDispatcher,
    shown_status: Option<Status>,
}

impl<S: VideoSource> Player<S> {
    /// Build the default surface around `source`. `file` is shown in the
    /// panel.
    pub fn new(source: S, file: &str) -> Result<Self> {
        Self::with_layout(source, file, PlayerLayout::default(), Theme::CLASSIC)
    }

    /// Build the surface, read the stream, and paint the first frame.
    ///
    /// # Errors
    ///
    /// Layout errors if a widget does not fit its parent or hit areas
    /// overlap, then the controller's startup errors.
    pub fn with_layout(source: S, file: &str, layout: PlayerLayout, theme: Theme) -> Result<Self> {
        let canvas = Canvas::new(layout.display_width, layout.canvas_height(), layout.channels)?;
        let root = canvas.root();
        let frame_area = sub_region(&root, layout.frame_rect())?;
        let track_region = sub_region(&root, layout.slider_rect())?;
        let panel_rect = layout.panel_rect();
        let panel_region = sub_region(&root, panel_rect)?;

        let renderer: Box<dyn Renderer> = Box::new(BitmapRenderer::new());
        let mut widgets = AHashMap::with_capacity(WidgetId::ALL.len());
        for spec in &layout.fields {
            let region = sub_region(&panel_region, spec.rect)?;
            let field = TextField::new(spec.kind, region, spec.baseline_inset);
            widgets.insert(spec.id, Widget::Text(field));
        }
        for spec in &layout.buttons {
            let region = sub_region(&panel_region, spec.rect)?;
            widgets.insert(spec.id, Widget::Button(Button::new(spec.kind, region)));
        }
        let knob = SliderKnob::new(
            track_region,
            layout.knob_width,
            DrawContext::new(&*renderer, &theme),
        );
        widgets.insert(WidgetId::SliderTrack, Widget::SliderTrack(SliderTrack::new(track_region)));
        widgets.insert(WidgetId::SliderKnob, Widget::SliderKnob(knob));

        let mut hit_map = HitMap::new();
        for id in PlayerLayout::HIT_PRIORITY {
            let rect = match id {
                WidgetId::SliderTrack => Some(layout.slider_rect()),
                _ => layout
                    .field(id)
                    .map(|f| f.rect)
                    .or_else(|| layout.button(id).map(|b| b.rect))
                    .map(|r| r.offset(panel_rect.x, panel_rect.y)),
            };
            if let Some(rect) = rect {
                hit_map.register(id, HitArea::new(rect))?;
            }
        }

        let panel =
            Panel::new(panel_region, layout.labels.clone()).with_file(layout.file_label_at, file);

        let controller = PlaybackController::new(source)?;
        let slider = SliderModel::new(
            controller.frame_count(),
            track_region.width(),
            layout.knob_width,
        )
        .with_start(controller.start_frame());

        let mut player = Self {
            canvas,
            slider_band: layout.slider_rect(),
            layout,
            theme,
            renderer,
            frame_area,
            panel,
            widgets,
            hit_map,
            slider,
            controller,
            editor: StepEditor::default(),
            dispatcher: InputDispatcher::new(),
            shown_status: None,
        };
        player.fill_fields();
        player.redraw_all();
        Ok(player)
    }

    /// Swap the text and line renderer and repaint everything with it.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self.redraw_all();
        self
    }

    /// Change the caret blink period. Ignored while editing.
    pub fn set_blink_period(&mut self, ticks: u32) {
        if !self.editor.is_editing() {
            self.editor = StepEditor::new(ticks);
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn layout(&self) -> &PlayerLayout {
        &self.layout
    }

    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    pub fn editor(&self) -> &StepEditor {
        &self.editor
    }

    pub fn slider(&self) -> &SliderModel {
        &self.slider
    }

    pub fn hit_map(&self) -> &HitMap {
        &self.hit_map
    }

    pub fn is_dragging(&self) -> bool {
        self.dispatcher.is_dragging()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Text currently shown in a text field.
    pub fn field_text(&self, id: WidgetId) -> Option<&str> {
        self.widgets.get(&id)?.as_text().map(TextField::text)
    }

    pub fn button_kind(&self, id: WidgetId) -> Option<ButtonKind> {
        match self.widgets.get(&id)? {
            Widget::Button(button) => Some(button.kind()),
            _ => None,
        }
    }

    /// Left edge of the slider knob, in track pixels.
    pub fn knob_x(&self) -> Option<u32> {
        match self.widgets.get(&WidgetId::SliderKnob)? {
            Widget::SliderKnob(knob) => Some(knob.x()),
            _ => None,
        }
    }

    /// Apply one input event. Quit handling belongs to the loop.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Quit => {}
        }
    }

    /// Run one playback tick.
    pub fn advance(&mut self) -> TickOutcome {
        self.controller.tick()
    }

    /// Bring the canvas in line with the current state.
    pub fn refresh(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("player_refresh").entered();

        if self.editor.tick() {
            self.draw_step_editor();
        }
        self.sync_play_button();
        self.sync_status();
        self.blit_frame();
        self.sync_slider();
    }

    /// Release the video source.
    pub fn close(&mut self) {
        self.controller.close();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if !self.editor.is_editing() {
            return;
        }
        let changed = match key.code {
            KeyCode::Char(c) => self.editor.push_digit(
                c,
                self.controller.current_frame(),
                self.controller.frame_count(),
            ),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Enter => {
                self.commit_edit();
                return;
            }
            _ => false,
        };
        if changed {
            self.draw_step_editor();
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let actions = self.dispatcher.dispatch_mouse(
            mouse,
            &self.hit_map,
            self.slider_band,
            self.editor.is_editing(),
        );
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::CommitEdit => self.commit_edit(),
            Action::SeekSlider { x, preview } => {
                let frame = self.slider.frame_at(u32::from(x));
                if self.controller.seek(frame) && !preview {
                    self.controller.note(Status::SliderMoved);
                }
            }
            Action::Press(WidgetId::PlayPause) => {
                self.controller.toggle_play();
            }
            Action::Press(WidgetId::Stop) => self.controller.stop(),
            Action::Press(WidgetId::StepUp) => {
                self.controller.step_up();
            }
            Action::Press(WidgetId::StepDown) => {
                self.controller.step_down();
            }
            Action::Press(id) => debug!(widget = %id, "press ignored"),
            Action::BeginEdit => {
                self.editor.begin();
                self.draw_step_editor();
            }
        }
    }

    fn commit_edit(&mut self) {
        let step = self.editor.commit(self.controller.step());
        let step = self.controller.set_step(step);
        self.slider.set_step(step);
        self.set_field(WidgetId::Step, &step.to_string());
    }

    fn fill_fields(&mut self) {
        let info = self.controller.info().clone();
        self.set_field(WidgetId::TotalFrames, &info.frame_count.to_string());
        self.set_field(WidgetId::Fps, &info.fps_rounded().to_string());
        self.set_field(WidgetId::FourCc, &info.fourcc);
        self.set_field(WidgetId::Step, &self.controller.step().to_string());
    }

    /// Paint every widget from its stored state.
    fn redraw_all(&mut self) {
        let ctx = DrawContext::new(&*self.renderer, &self.theme);
        self.panel.draw(&mut self.canvas, ctx);
        for id in WidgetId::ALL {
            match self.widgets.get_mut(&id) {
                Some(Widget::SliderTrack(track)) => track.paint(&mut self.canvas, ctx),
                Some(Widget::SliderKnob(_)) | None => {}
                Some(widget) => widget.draw(&mut self.canvas, ctx),
            }
        }
        self.shown_status = None;
        self.sync_status();
        self.blit_frame();
        self.sync_slider();
    }

    fn set_field(&mut self, id: WidgetId, text: &str) {
        let ctx = DrawContext::new(&*self.renderer, &self.theme);
        if let Some(field) = self.widgets.get_mut(&id).and_then(Widget::as_text_mut) {
            field.set_text(&mut self.canvas, ctx, text);
        }
    }

    fn draw_step_editor(&mut self) {
        let text = self.editor.display_text();
        self.set_field(WidgetId::Step, &text);
    }

    fn sync_play_button(&mut self) {
        let kind = if self.controller.is_playing() {
            ButtonKind::Pause
        } else {
            ButtonKind::Play
        };
        let ctx = DrawContext::new(&*self.renderer, &self.theme);
        if let Some(button) = self
            .widgets
            .get_mut(&WidgetId::PlayPause)
            .and_then(Widget::as_button_mut)
        {
            if button.set_kind(kind) {
                button.draw(&mut self.canvas, ctx);
            }
        }
    }

    fn sync_status(&mut self) {
        let status = self.controller.status();
        if self.shown_status != Some(status) {
            self.shown_status = Some(status);
            self.set_field(WidgetId::Status, status.label());
        }
    }

    fn blit_frame(&mut self) {
        self.canvas
            .view_mut(&self.frame_area)
            .blit_scaled(self.controller.frame());
    }

    /// Current-frame field and knob. The field shows the frame rounded down
    /// to the step; the knob sits at the frame actually decoded. The knob is
    /// erased by restoring the clean track before it is stamped again.
    fn sync_slider(&mut self) {
        let frame = self.controller.current_frame();
        let text = self.slider.quantize(frame).to_string();
        if self.field_text(WidgetId::CurrentFrame) != Some(text.as_str()) {
            self.set_field(WidgetId::CurrentFrame, &text);
        }

        let px = self.slider.pixel_for(frame);
        if let Some(Widget::SliderTrack(track)) = self.widgets.get(&WidgetId::SliderTrack) {
            if let Err(error) = track.restore(&mut self.canvas) {
                warn!(%error, "slider track restore failed");
            }
        }
        if let Some(Widget::SliderKnob(knob)) = self.widgets.get_mut(&WidgetId::SliderKnob) {
            if let Err(error) = knob.stamp_at(&mut self.canvas, px) {
                warn!(%error, "slider knob stamp failed");
            }
        }
    }
}

impl<S> std::fmt::Debug for Player<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("layout", &self.layout)
            .field("controller", &self.controller)
            .field("editor", &self.editor)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

fn sub_region(parent: &Region, rect: Rect) -> std::result::Result<Region, RegionError> {
    parent.sub(
        rect.x.into(),
        rect.y.into(),
        rect.width.into(),
        rect.height.into(),
    )
}
