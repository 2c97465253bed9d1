//! End-of-session summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{DisplayMode, QuizVariant};

/// Snapshot of a drill session's score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub correct: u32,
    pub total: u32,
    /// `round(correct / total * 100)`, or 0 before the first answer.
    pub accuracy_percent: u32,
    pub display_mode: DisplayMode,
    pub quiz_variant: QuizVariant,
}

impl SessionReport {
    /// Pretty-printed JSON for `--json-summary`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One-line human summary.
    pub fn summary_line(&self) -> String {
        format!(
            "正确 {} / 总题数 {}，正确率 {}%",
            self.correct, self.total, self.accuracy_percent
        )
    }
}
