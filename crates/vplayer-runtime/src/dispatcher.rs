#![forbid(unsafe_code)]

//! Pointer routing.
//!
//! The dispatcher turns raw pointer events into [`Action`]s and owns the
//! only piece of pointer state, the drag flag. It never touches the canvas
//! or the controller; the player applies the actions in order.
//!
//! | pointer | state | hit | actions |
//! |---|---|---|---|
//! | down | editing | any | `CommitEdit`, then as below (a step field hit ends there) |
//! | down | – | slider | `SeekSlider { preview: false }`, start drag |
//! | down | – | button | `Press(id)` |
//! | down | idle | step field | `BeginEdit` |
//! | move | dragging | slider band | `SeekSlider { preview: true }` |
//! | up | – | – | end drag |

use smallvec::SmallVec;
use vplayer_core::event::{MouseButton, MouseEvent, MouseEventKind};
use vplayer_core::geometry::Rect;
use vplayer_widgets::{HitMap, WidgetId};

/// Pointer phase, left button only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pointer {
    Down,
    Move,
    Up,
}

impl Pointer {
    /// Map a mouse event kind; other buttons are ignored.
    pub fn from_kind(kind: MouseEventKind) -> Option<Self> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::Down),
            MouseEventKind::Up(MouseButton::Left) => Some(Self::Up),
            MouseEventKind::Moved => Some(Self::Move),
            _ => None,
        }
    }
}

/// Something the player should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Commit the step field's pending text.
    CommitEdit,
    /// Seek to the frame under track pixel `x`.
    SeekSlider { x: u16, preview: bool },
    /// A button was clicked.
    Press(WidgetId),
    /// Start editing the step field.
    BeginEdit,
}

pub type Actions = SmallVec<[Action; 2]>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputDispatcher {
    dragging: bool,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Route a mouse event. `slider_band` is the track's rectangle in canvas
    /// coordinates.
    pub fn dispatch_mouse(
        &mut self,
        event: MouseEvent,
        hit_map: &HitMap,
        slider_band: Rect,
        editing: bool,
    ) -> Actions {
        match Pointer::from_kind(event.kind) {
            Some(pointer) => self.dispatch(pointer, event.x, event.y, hit_map, slider_band, editing),
            None => Actions::new(),
        }
    }

    pub fn dispatch(
        &mut self,
        pointer: Pointer,
        x: u16,
        y: u16,
        hit_map: &HitMap,
        slider_band: Rect,
        editing: bool,
    ) -> Actions {
        let mut actions = Actions::new();
        match pointer {
            Pointer::Down => {
                if editing {
                    actions.push(Action::CommitEdit);
                }
                match hit_map.hit_test(x, y) {
                    Some(WidgetId::SliderTrack) => {
                        self.dragging = true;
                        actions.push(Action::SeekSlider {
                            x: x.saturating_sub(slider_band.x),
                            preview: false,
                        });
                    }
                    Some(WidgetId::Step) if !editing => actions.push(Action::BeginEdit),
                    Some(WidgetId::Step) | None => {}
                    Some(id) => actions.push(Action::Press(id)),
                }
            }
            Pointer::Move => {
                if self.dragging && slider_band.contains_row(y) {
                    actions.push(Action::SeekSlider {
                        x: x.saturating_sub(slider_band.x),
                        preview: true,
                    });
                }
            }
            Pointer::Up => self.dragging = false,
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vplayer_widgets::HitArea;

    const BAND: Rect = Rect::new(0, 100, 200, 10);

    fn map() -> HitMap {
        let mut map = HitMap::new();
        map.register(WidgetId::SliderTrack, HitArea::new(BAND)).unwrap();
        map.register(WidgetId::PlayPause, HitArea::from_corners(10, 120, 40, 140))
            .unwrap();
        map.register(WidgetId::Step, HitArea::from_corners(50, 120, 80, 140))
            .unwrap();
        map
    }

    fn down(d: &mut InputDispatcher, x: u16, y: u16, editing: bool) -> Vec<Action> {
        d.dispatch(Pointer::Down, x, y, &map(), BAND, editing).to_vec()
    }

    #[test]
    fn slider_down_seeks_and_starts_drag() {
        let mut d = InputDispatcher::new();
        assert_eq!(
            down(&mut d, 42, 105, false),
            vec![Action::SeekSlider { x: 42, preview: false }]
        );
        assert!(d.is_dragging());
    }

    #[test]
    fn drag_previews_only_inside_band() {
        let mut d = InputDispatcher::new();
        down(&mut d, 0, 100, false);
        let inside = d.dispatch(Pointer::Move, 90, 109, &map(), BAND, false);
        assert_eq!(inside.as_slice(), &[Action::SeekSlider { x: 90, preview: true }]);
        let outside = d.dispatch(Pointer::Move, 90, 110, &map(), BAND, false);
        assert!(outside.is_empty());
        assert!(d.is_dragging());
    }

    #[test]
    fn move_without_drag_does_nothing() {
        let mut d = InputDispatcher::new();
        assert!(d.dispatch(Pointer::Move, 5, 105, &map(), BAND, false).is_empty());
    }

    #[test]
    fn up_ends_drag_anywhere() {
        let mut d = InputDispatcher::new();
        down(&mut d, 10, 101, false);
        let out = d.dispatch(Pointer::Up, 500, 500, &map(), BAND, false);
        assert!(out.is_empty());
        assert!(!d.is_dragging());
    }

    #[test]
    fn down_outside_slider_does_not_start_drag() {
        let mut d = InputDispatcher::new();
        assert_eq!(
            down(&mut d, 20, 130, false),
            vec![Action::Press(WidgetId::PlayPause)]
        );
        assert!(!d.is_dragging());
        assert!(down(&mut d, 150, 150, false).is_empty());
    }

    #[test]
    fn press_off_slider_then_move_into_band_does_not_seek() {
        let mut d = InputDispatcher::new();
        down(&mut d, 20, 130, false);
        let moved = d.dispatch(Pointer::Move, 60, 105, &map(), BAND, false);
        assert!(moved.is_empty());
        assert!(!d.is_dragging());

        down(&mut d, 150, 150, false);
        let moved = d.dispatch(Pointer::Move, 60, 105, &map(), BAND, false);
        assert!(moved.is_empty());
    }

    #[test]
    fn step_field_toggles_edit_mode() {
        let mut d = InputDispatcher::new();
        assert_eq!(down(&mut d, 60, 130, false), vec![Action::BeginEdit]);
        assert_eq!(down(&mut d, 60, 130, true), vec![Action::CommitEdit]);
    }

    #[test]
    fn any_click_while_editing_commits_first() {
        let mut d = InputDispatcher::new();
        assert_eq!(
            down(&mut d, 20, 130, true),
            vec![Action::CommitEdit, Action::Press(WidgetId::PlayPause)]
        );
        assert_eq!(down(&mut d, 150, 150, true), vec![Action::CommitEdit]);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut d = InputDispatcher::new();
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 20, 130);
        assert!(d.dispatch_mouse(event, &map(), BAND, false).is_empty());
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 20, 130);
        assert_eq!(
            d.dispatch_mouse(event, &map(), BAND, false).as_slice(),
            &[Action::Press(WidgetId::PlayPause)]
        );
    }
}
