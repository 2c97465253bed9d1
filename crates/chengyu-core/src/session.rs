//! Per-session quiz state.

use serde::Serialize;

use crate::model::{DisplayMode, QuizVariant};

/// Score, mode, and answer state for one drill session.
///
/// Counters only move through [`SessionState::record_answer`] and
/// [`SessionState::reset_counters`], which keeps `correct <= total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    correct_count: u32,
    total_count: u32,
    display_mode: DisplayMode,
    quiz_variant: QuizVariant,
    pending_answer: String,
    answer_revealed: bool,
}

impl SessionState {
    pub fn new(display_mode: DisplayMode, quiz_variant: QuizVariant) -> Self {
        Self {
            display_mode,
            quiz_variant,
            ..Self::default()
        }
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn quiz_variant(&self) -> QuizVariant {
        self.quiz_variant
    }

    pub fn pending_answer(&self) -> &str {
        &self.pending_answer
    }

    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    /// Accuracy as a whole percentage, rounded half away from zero.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_count == 0 {
            0
        } else {
            (f64::from(self.correct_count) / f64::from(self.total_count) * 100.0).round() as u32
        }
    }

    pub(crate) fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub(crate) fn set_quiz_variant(&mut self, variant: QuizVariant) {
        self.quiz_variant = variant;
    }

    /// Score one answer and reveal the solution.
    pub(crate) fn record_answer(&mut self, answer: &str, correct: bool) {
        if correct {
            self.correct_count += 1;
        }
        self.total_count += 1;
        self.pending_answer = answer.to_string();
        self.answer_revealed = true;
    }

    /// Forget the answer to the previous question.
    pub(crate) fn clear_answer(&mut self) {
        self.pending_answer.clear();
        self.answer_revealed = false;
    }

    pub(crate) fn reset_counters(&mut self) {
        self.correct_count = 0;
        self.total_count = 0;
    }
}
