#![forbid(unsafe_code)]

//! Line editor for the step field.
//!
//! Digits are validated as they are typed: a digit is kept only if the
//! resulting step is non-zero and, added to the current frame, stays within
//! the stream. Committing parses the buffer; an empty buffer keeps the
//! previous step.

use tracing::trace;

/// Caret glyph while visible.
pub const CARET: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEditor {
    editing: bool,
    pending: String,
    caret_visible: bool,
    caret_ticks: u32,
    blink_period: u32,
}

impl Default for StepEditor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLINK_PERIOD)
    }
}

impl StepEditor {
    /// Redraw ticks between caret toggles.
    pub const DEFAULT_BLINK_PERIOD: u32 = 5;

    pub fn new(blink_period: u32) -> Self {
        Self {
            editing: false,
            pending: String::new(),
            caret_visible: false,
            caret_ticks: 0,
            blink_period: blink_period.max(1),
        }
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Digits typed so far.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub const fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    /// Start editing with an empty buffer.
    pub fn begin(&mut self) {
        self.editing = true;
        self.pending.clear();
        self.caret_visible = true;
        self.caret_ticks = 0;
    }

    /// Append `c` if it is a digit and the resulting step keeps
    /// `frame + step` within `[0, max_frame]`. Returns whether it was kept.
    pub fn push_digit(&mut self, c: char, frame: u64, max_frame: u64) -> bool {
        if !self.editing || !c.is_ascii_digit() {
            return false;
        }
        self.pending.push(c);
        let accepted = match self.pending.parse::<u64>() {
            Ok(candidate) => {
                candidate != 0 && frame.checked_add(candidate).is_some_and(|f| f <= max_frame)
            }
            Err(_) => false,
        };
        if !accepted {
            self.pending.pop();
            trace!(digit = %c, "step digit rejected");
        }
        accepted
    }

    /// Drop the last character. Returns `false` on an empty buffer.
    pub fn backspace(&mut self) -> bool {
        self.editing && self.pending.pop().is_some()
    }

    /// Stop editing and return the new step, or `prior` if the buffer is
    /// empty or does not parse to a positive value.
    pub fn commit(&mut self, prior: u64) -> u64 {
        self.editing = false;
        self.caret_visible = false;
        let step = match self.pending.parse::<u64>() {
            Ok(step) if step > 0 => step,
            _ => prior,
        };
        self.pending.clear();
        step
    }

    /// Count one redraw tick. Returns `true` when the caret toggled.
    pub fn tick(&mut self) -> bool {
        if !self.editing {
            return false;
        }
        self.caret_ticks += 1;
        if self.caret_ticks < self.blink_period {
            return false;
        }
        self.caret_ticks = 0;
        self.caret_visible = !self.caret_visible;
        true
    }

    /// Pending digits followed by the caret, or a space where the caret is
    /// hidden.
    pub fn display_text(&self) -> String {
        let mut text = self.pending.clone();
        text.push(if self.caret_visible { CARET } else { ' ' });
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing() -> StepEditor {
        let mut e = StepEditor::default();
        e.begin();
        e
    }

    #[test]
    fn typing_five_commits_five() {
        let mut e = editing();
        assert!(e.push_digit('5', 0, 100));
        assert_eq!(e.commit(1), 5);
        assert!(!e.is_editing());
    }

    #[test]
    fn lone_zero_is_rejected() {
        let mut e = editing();
        assert!(!e.push_digit('0', 0, 100));
        assert_eq!(e.pending(), "");
        assert_eq!(e.commit(3), 3);
    }

    #[test]
    fn zero_after_nonzero_is_kept() {
        let mut e = editing();
        assert!(e.push_digit('1', 0, 100));
        assert!(e.push_digit('0', 0, 100));
        assert_eq!(e.commit(1), 10);
    }

    #[test]
    fn digit_that_overruns_stream_is_rejected() {
        let mut e = editing();
        assert!(e.push_digit('4', 90, 100));
        assert!(!e.push_digit('0', 90, 100));
        assert_eq!(e.pending(), "4");
    }

    #[test]
    fn boundary_is_inclusive() {
        let mut e = editing();
        assert!(e.push_digit('9', 91, 100));
        assert!(!e.push_digit('9', 92, 100));
        assert_eq!(e.pending(), "9");
    }

    #[test]
    fn overflow_is_rejected() {
        let mut e = editing();
        for _ in 0..19 {
            e.push_digit('9', 0, u64::MAX);
        }
        let len = e.pending().len();
        assert!(!e.push_digit('9', 0, u64::MAX));
        assert_eq!(e.pending().len(), len);
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut e = editing();
        assert!(!e.push_digit('a', 0, 100));
        assert!(!e.push_digit('-', 0, 100));
        assert_eq!(e.pending(), "");
    }

    #[test]
    fn backspace_on_empty_is_a_no_op() {
        let mut e = editing();
        assert!(!e.backspace());
        e.push_digit('2', 0, 100);
        e.push_digit('3', 0, 100);
        assert!(e.backspace());
        assert_eq!(e.pending(), "2");
    }

    #[test]
    fn input_is_ignored_when_not_editing() {
        let mut e = StepEditor::default();
        assert!(!e.push_digit('5', 0, 100));
        assert!(!e.backspace());
        assert!(!e.tick());
    }

    #[test]
    fn begin_clears_previous_buffer() {
        let mut e = editing();
        e.push_digit('7', 0, 100);
        e.begin();
        assert_eq!(e.pending(), "");
    }

    #[test]
    fn caret_blinks_every_period() {
        let mut e = StepEditor::new(3);
        e.begin();
        e.push_digit('4', 0, 100);
        assert_eq!(e.display_text(), "4|");
        assert!(!e.tick());
        assert!(!e.tick());
        assert!(e.tick());
        assert_eq!(e.display_text(), "4 ");
        for _ in 0..3 {
            e.tick();
        }
        assert_eq!(e.display_text(), "4|");
    }

    #[test]
    fn caret_is_not_committed() {
        let mut e = editing();
        e.push_digit('8', 0, 100);
        assert_eq!(e.commit(1), 8);
        assert_eq!(e.display_text(), " ");
    }
}
