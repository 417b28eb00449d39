#![forbid(unsafe_code)]

//! Native window display.
//!
//! A fixed-size `winit` window presenting the canvas through a `softbuffer`
//! surface. The event loop is pumped from [`Display::poll_event`] rather
//! than run, so the player keeps its own loop and its own pacing.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use softbuffer::{Context, SoftBufferError, Surface};
use thiserror::Error;
use tracing::{debug, warn};
use vplayer_backend::Display;
use vplayer_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
use vplayer_render::Canvas;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("cannot create window: {0}")]
    Os(#[from] OsError),

    #[error("surface: {0}")]
    Surface(#[from] SoftBufferError),
}

pub struct WindowDisplay {
    event_loop: EventLoop<()>,
    app: WindowApp,
}

struct WindowApp {
    title: String,
    size: PhysicalSize<u32>,
    window: Option<Rc<Window>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    pending: VecDeque<Event>,
    cursor: (u16, u16),
    modifiers: Modifiers,
    error: Option<WindowError>,
}

impl WindowDisplay {
    /// Open a `width × height` window. The window itself appears on the
    /// first pump.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Result<Self, WindowError> {
        let event_loop = EventLoop::new()?;
        let mut display = Self {
            event_loop,
            app: WindowApp {
                title: title.into(),
                size: PhysicalSize::new(width.max(1), height.max(1)),
                window: None,
                surface: None,
                pending: VecDeque::new(),
                cursor: (0, 0),
                modifiers: Modifiers::NONE,
                error: None,
            },
        };
        display.pump(Duration::ZERO)?;
        Ok(display)
    }

    fn pump(&mut self, timeout: Duration) -> Result<bool, WindowError> {
        let status = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.app);
        if let Some(error) = self.app.error.take() {
            return Err(error);
        }
        Ok(matches!(status, PumpStatus::Continue))
    }
}

impl Display for WindowDisplay {
    type Error = WindowError;

    fn show_canvas(&mut self, canvas: &Canvas) -> Result<(), WindowError> {
        let Some(surface) = self.app.surface.as_mut() else {
            return Ok(());
        };
        let mut buffer = surface.buffer_mut()?;
        canvas.write_xrgb(&mut buffer);
        buffer.present()?;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, WindowError> {
        if let Some(event) = self.app.pending.pop_front() {
            return Ok(Some(event));
        }
        if !self.pump(timeout)? {
            return Ok(Some(Event::Quit));
        }
        Ok(self.app.pending.pop_front())
    }
}

impl WindowApp {
    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WindowError> {
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size)
            .with_resizable(false);
        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = Context::new(Rc::clone(&window))?;
        let mut surface = Surface::new(&context, Rc::clone(&window))?;
        let (w, h) = (non_zero(self.size.width), non_zero(self.size.height));
        surface.resize(w, h)?;
        debug!(width = self.size.width, height = self.size.height, "window created");
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn push_mouse(&mut self, kind: MouseEventKind) {
        let (x, y) = self.cursor;
        self.pending.push_back(Event::Mouse(MouseEvent::new(kind, x, y)));
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.create(event_loop) {
            warn!(%error, "window setup failed");
            self.error = Some(error);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.pending.push_back(Event::Quit),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (clamp_coord(position.x), clamp_coord(position.y));
                self.push_mouse(MouseEventKind::Moved);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_button(button) else {
                    return;
                };
                let kind = match state {
                    ElementState::Pressed => MouseEventKind::Down(button),
                    ElementState::Released => MouseEventKind::Up(button),
                };
                self.push_mouse(kind);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let code = map_key(&event.logical_key);
                self.pending
                    .push_back(Event::Key(KeyEvent::new(code).with_modifiers(self.modifiers)));
            }
            WindowEvent::RedrawRequested => {
                if let Some(window) = &self.window {
                    window.pre_present_notify();
                }
            }
            _ => {}
        }
    }
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

fn clamp_coord(v: f64) -> u16 {
    if v.is_finite() {
        v.clamp(0.0, f64::from(u16::MAX)) as u16
    } else {
        0
    }
}

fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn map_modifiers(state: ModifiersState) -> Modifiers {
    let mut out = Modifiers::NONE;
    if state.shift_key() {
        out |= Modifiers::SHIFT;
    }
    if state.alt_key() {
        out |= Modifiers::ALT;
    }
    if state.control_key() {
        out |= Modifiers::CTRL;
    }
    if state.super_key() {
        out |= Modifiers::SUPER;
    }
    out
}

fn map_key(key: &Key) -> KeyCode {
    match key {
        Key::Named(NamedKey::Escape) => KeyCode::Escape,
        Key::Named(NamedKey::Enter) => KeyCode::Enter,
        Key::Named(NamedKey::Backspace) => KeyCode::Backspace,
        Key::Named(NamedKey::Tab) => KeyCode::Tab,
        Key::Character(text) => text.chars().next().map_or(KeyCode::Other, KeyCode::Char),
        _ => KeyCode::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_map() {
        assert_eq!(map_key(&Key::Named(NamedKey::Escape)), KeyCode::Escape);
        assert_eq!(map_key(&Key::Named(NamedKey::Enter)), KeyCode::Enter);
        assert_eq!(map_key(&Key::Named(NamedKey::Backspace)), KeyCode::Backspace);
        assert_eq!(map_key(&Key::Named(NamedKey::F1)), KeyCode::Other);
    }

    #[test]
    fn character_keys_map() {
        assert_eq!(map_key(&Key::Character("7".into())), KeyCode::Char('7'));
    }

    #[test]
    fn coordinates_clamp() {
        assert_eq!(clamp_coord(-4.0), 0);
        assert_eq!(clamp_coord(12.7), 12);
        assert_eq!(clamp_coord(1e9), u16::MAX);
        assert_eq!(clamp_coord(f64::NAN), 0);
    }

    #[test]
    fn modifiers_map() {
        let state = ModifiersState::SHIFT | ModifiersState::CONTROL;
        assert_eq!(map_modifiers(state), Modifiers::SHIFT | Modifiers::CTRL);
    }
}
