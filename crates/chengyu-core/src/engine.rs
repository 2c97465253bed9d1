//! Quiz engine.
//!
//! Owns the current idiom and the session state, and drives the study/quiz
//! state machine. No operation returns an error: source failures fall back to
//! the built-in idiom and invalid submissions are ignored.
//!
//! Advancing is split into [`QuizEngine::begin_advance`] and
//! [`QuizEngine::complete_advance`] so a driver can keep rendering while a
//! fetch is in flight. [`QuizEngine::advance`] runs both halves in one call.
//! The loading flag clears when the fetch finishes or the pending advance is
//! dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::SourceError;
use crate::model::{DifficultyTier, DisplayIdiom, DisplayMode, IdiomRecord, QuizVariant};
use crate::prompt::{render_prompt, Clue};
use crate::report::SessionReport;
use crate::session::SessionState;
use crate::traits::IdiomSource;

/// Shown while no idiom has been loaded yet.
pub const LOADING_PLACEHOLDER: &str = "加载中...";
/// Advisory notice set when a fetch falls back to the built-in idiom.
pub const FALLBACK_NOTICE: &str = "无法加载新成语，显示默认成语";

/// Configuration for the quiz engine.
#[derive(Debug, Clone, Default)]
pub struct QuizEngineConfig {
    /// Mode the session starts in.
    pub display_mode: DisplayMode,
    /// Prompt variant the session starts with.
    pub quiz_variant: QuizVariant,
    /// Draw the `Mixed` coin once per question instead of on every read.
    pub stable_mixed_prompt: bool,
}

/// What an advance request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A fresh idiom from the source is now current.
    Loaded,
    /// The source failed; the built-in idiom is now current.
    Fallback,
    /// Another advance is in flight; nothing changed.
    Busy,
    /// Not valid in the current state; nothing changed.
    Ignored,
}

/// Result of a scored submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub correct: bool,
    /// The expected word, for feedback.
    pub expected: String,
}

/// A fetch started by [`QuizEngine::begin_advance`].
///
/// Holds its own handle on the source so the engine is not borrowed while
/// the request is awaited.
pub struct PendingAdvance {
    source: Arc<dyn IdiomSource>,
    _loading: LoadingGuard,
}

/// Clears the engine's loading flag on drop.
struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PendingAdvance {
    /// Fetch one record and validate it.
    pub async fn fetch(self) -> Result<IdiomRecord, SourceError> {
        let record = self
            .source
            .fetch_idioms(1)
            .await?
            .into_iter()
            .next()
            .ok_or(SourceError::EmptyDataset)?;
        record.validate()?;
        Ok(record)
    }
}

/// The quiz/session engine.
pub struct QuizEngine {
    source: Arc<dyn IdiomSource>,
    config: QuizEngineConfig,
    state: SessionState,
    current: Option<DisplayIdiom>,
    /// Clue drawn at advance time, used when `stable_mixed_prompt` is set.
    question_clue: Clue,
    loading: Arc<AtomicBool>,
    notice: Option<String>,
    session_id: Uuid,
    started_at: DateTime<Utc>,
}

impl QuizEngine {
    pub fn new(source: Arc<dyn IdiomSource>, config: QuizEngineConfig) -> Self {
        let state = SessionState::new(config.display_mode, config.quiz_variant);
        Self {
            source,
            config,
            state,
            current: None,
            question_clue: Clue::Meaning,
            loading: Arc::new(AtomicBool::new(false)),
            notice: None,
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current idiom, or `None` before the first advance completes.
    pub fn current(&self) -> Option<&DisplayIdiom> {
        self.current.as_ref()
    }

    /// The current word, or the loading placeholder.
    pub fn current_word(&self) -> &str {
        self.current
            .as_ref()
            .map(DisplayIdiom::word)
            .unwrap_or(LOADING_PLACEHOLDER)
    }

    /// `true` while an advance is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Advisory notice from the last advance, if it fell back.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Start fetching a new idiom. Returns `None` if a fetch is already in flight.
    pub fn begin_advance(&mut self) -> Option<PendingAdvance> {
        if self.loading.swap(true, Ordering::AcqRel) {
            debug!("advance requested while loading, ignoring");
            return None;
        }
        Some(PendingAdvance {
            source: Arc::clone(&self.source),
            _loading: LoadingGuard(Arc::clone(&self.loading)),
        })
    }

    /// Install the result of a fetch as the current idiom.
    pub fn complete_advance(&mut self, fetched: Result<IdiomRecord, SourceError>) -> AdvanceOutcome {
        self.complete_advance_with(fetched, &mut rand::thread_rng())
    }

    fn complete_advance_with<R: Rng + ?Sized>(
        &mut self,
        fetched: Result<IdiomRecord, SourceError>,
        rng: &mut R,
    ) -> AdvanceOutcome {
        self.loading.store(false, Ordering::Release);

        let (idiom, outcome) = match fetched {
            Ok(record) => {
                self.notice = None;
                (DisplayIdiom::from_record(record), AdvanceOutcome::Loaded)
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    transient = e.is_transient(),
                    "idiom fetch failed, using default idiom: {e}"
                );
                self.notice = Some(FALLBACK_NOTICE.to_string());
                (DisplayIdiom::default_idiom(), AdvanceOutcome::Fallback)
            }
        };

        debug!(word = idiom.word(), tier = %idiom.difficulty(), "advanced");
        self.current = Some(idiom);
        self.question_clue = Clue::draw(rng);
        self.state.clear_answer();
        outcome
    }

    /// Replace the current idiom with a fresh one from the source.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        let Some(pending) = self.begin_advance() else {
            return AdvanceOutcome::Busy;
        };
        let fetched = pending.fetch().await;
        self.complete_advance(fetched)
    }

    /// Move on after an answer has been revealed in quiz mode.
    pub async fn next_question(&mut self) -> AdvanceOutcome {
        if self.state.display_mode() != DisplayMode::Quiz || !self.state.answer_revealed() {
            debug!("next_question outside a revealed quiz question, ignoring");
            return AdvanceOutcome::Ignored;
        }
        self.advance().await
    }

    /// Zero the score and load a new idiom.
    pub async fn reset(&mut self) -> AdvanceOutcome {
        self.state.reset_counters();
        self.advance().await
    }

    /// Switch between study and quiz view. Answer state is untouched.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.state.display_mode() != mode {
            debug!(%mode, "display mode changed");
        }
        self.state.set_display_mode(mode);
    }

    pub fn set_quiz_variant(&mut self, variant: QuizVariant) {
        if self.state.quiz_variant() != variant {
            debug!(%variant, "quiz variant changed");
        }
        self.state.set_quiz_variant(variant);
    }

    /// Score an answer against the current idiom.
    ///
    /// Returns `None` without touching the score when not in quiz mode, when
    /// the answer is already revealed, when no idiom is loaded, or when
    /// `text` is blank.
    pub fn submit_answer(&mut self, text: &str) -> Option<SubmitOutcome> {
        if self.state.display_mode() != DisplayMode::Quiz {
            debug!("submission in study mode, ignoring");
            return None;
        }
        if self.state.answer_revealed() {
            debug!("answer already revealed, ignoring submission");
            return None;
        }
        if text.trim().is_empty() {
            debug!("blank submission, ignoring");
            return None;
        }
        let idiom = self.current.as_ref()?;

        let correct = idiom.matches(text);
        let expected = idiom.word().to_string();
        self.state.record_answer(text, correct);
        debug!(
            correct,
            score = self.state.correct_count(),
            total = self.state.total_count(),
            "answer submitted"
        );
        Some(SubmitOutcome { correct, expected })
    }

    /// The quiz prompt for the current idiom, or `None` before the first load.
    ///
    /// In `Mixed` mode each call flips a new coin unless
    /// `stable_mixed_prompt` is configured.
    pub fn prompt(&self) -> Option<String> {
        self.prompt_with(&mut rand::thread_rng())
    }

    pub fn prompt_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let idiom = self.current.as_ref()?;
        let variant = self.state.quiz_variant();
        let clue = if variant == QuizVariant::Mixed && self.config.stable_mixed_prompt {
            self.question_clue
        } else {
            Clue::for_variant(variant, rng)
        };
        Some(render_prompt(idiom, clue))
    }

    /// Difficulty of the current idiom.
    pub fn difficulty(&self) -> Option<DifficultyTier> {
        self.current.as_ref().map(DisplayIdiom::difficulty)
    }

    /// Summarize the session so far.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            session_id: self.session_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            correct: self.state.correct_count(),
            total: self.state.total_count(),
            accuracy_percent: self.state.accuracy_percent(),
            display_mode: self.state.display_mode(),
            quiz_variant: self.state.quiz_variant(),
        }
    }
}
