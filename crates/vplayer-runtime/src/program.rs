#![forbid(unsafe_code)]

//! The main loop.
//!
//! One iteration waits for at most one input event (bounded by the frame
//! interval), applies it, runs at most one playback tick, refreshes the
//! canvas, and presents it. Playback ticks are paced by the backend clock,
//! not by the number of iterations, so a burst of pointer events does not
//! speed playback up.
//!
//! # Example
//!
//! ```
//! use vplayer_backend::headless::{HeadlessDisplay, MemorySource};
//! use vplayer_backend::ManualClock;
//! use vplayer_runtime::{Player, Program, ProgramConfig};
//!
//! let clock = ManualClock::new();
//! let display = HeadlessDisplay::new(clock.clone()).idle(3);
//! let player = Player::new(MemorySource::new(10, 25.0), "memory://10").unwrap();
//! let mut program = Program::new(player, display, clock, ProgramConfig::default());
//! program.run().unwrap();
//! assert_eq!(program.display().presents(), 4);
//! ```

use std::time::Duration;

use tracing::{debug, info};
use vplayer_backend::{BackendClock, Display, VideoSource};
use vplayer_core::event::{Event, KeyCode};

use crate::error::{PlayerError, Result};
use crate::player::Player;
use crate::step_editor::StepEditor;

/// Loop tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramConfig {
    /// Key that ends the loop.
    pub quit_key: KeyCode,
    /// Redraw ticks between caret toggles.
    pub blink_period: u32,
    /// FPS used when the source reports none.
    pub fallback_fps: f64,
    /// Upper bound on a single poll.
    pub max_poll: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            quit_key: KeyCode::Escape,
            blink_period: StepEditor::DEFAULT_BLINK_PERIOD,
            fallback_fps: 25.0,
            max_poll: Duration::from_secs(1),
        }
    }
}

impl ProgramConfig {
    #[must_use]
    pub fn with_quit_key(mut self, key: KeyCode) -> Self {
        self.quit_key = key;
        self
    }

    #[must_use]
    pub fn with_blink_period(mut self, ticks: u32) -> Self {
        self.blink_period = ticks;
        self
    }

    #[must_use]
    pub fn with_fallback_fps(mut self, fps: f64) -> Self {
        self.fallback_fps = fps;
        self
    }

    #[must_use]
    pub fn with_max_poll(mut self, max: Duration) -> Self {
        self.max_poll = max;
        self
    }

    /// Whole milliseconds per frame at `fps`, at least one.
    pub fn frame_interval(&self, fps: f64) -> Duration {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else if self.fallback_fps.is_finite() && self.fallback_fps > 0.0 {
            self.fallback_fps
        } else {
            25.0
        };
        let millis = (1000.0 / fps) as u64;
        Duration::from_millis(millis.max(1))
    }
}

pub struct Program<S, D, C> {
    player: Player<S>,
    display: D,
    clock: C,
    config: ProgramConfig,
    frame_interval: Duration,
    last_advance: Duration,
}

impl<S: VideoSource, D: Display, C: BackendClock> Program<S, D, C> {
    pub fn new(mut player: Player<S>, display: D, clock: C, config: ProgramConfig) -> Self {
        player.set_blink_period(config.blink_period);
        let frame_interval = config.frame_interval(player.controller().info().fps);
        let last_advance = clock.now_mono();
        Self {
            player,
            display,
            clock,
            config,
            frame_interval,
            last_advance,
        }
    }

    pub fn player(&self) -> &Player<S> {
        &self.player
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn into_parts(self) -> (Player<S>, D) {
        (self.player, self.display)
    }

    /// Run until the quit key or a quit event, then release the source.
    ///
    /// # Errors
    ///
    /// Only display failures end the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("program_run").entered();

        info!(interval_ms = self.frame_interval.as_millis() as u64, "entering loop");
        self.present()?;
        loop {
            let timeout = self.effective_timeout();
            let event = self
                .display
                .poll_event(timeout)
                .map_err(PlayerError::display)?;
            match event {
                Some(Event::Quit) => break,
                Some(Event::Key(key)) if key.code == self.config.quit_key => break,
                Some(event) => self.player.handle_event(&event),
                None => {}
            }
            if self.should_advance() {
                self.player.advance();
            }
            self.player.refresh();
            self.present()?;
        }
        debug!("loop finished");
        self.player.close();
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.display
            .show_canvas(self.player.canvas())
            .map_err(PlayerError::display)
    }

    fn effective_timeout(&self) -> Duration {
        self.frame_interval.min(self.config.max_poll)
    }

    /// True once a full frame interval has passed since the last advance.
    fn should_advance(&mut self) -> bool {
        let now = self.clock.now_mono();
        if now.saturating_sub(self.last_advance) >= self.frame_interval {
            self.last_advance = now;
            true
        } else {
            false
        }
    }
}

impl<S, D, C> std::fmt::Debug for Program<S, D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("player", &self.player)
            .field("config", &self.config)
            .field("frame_interval", &self.frame_interval)
            .field("last_advance", &self.last_advance)
            .finish_non_exhaustive()
    }
}
