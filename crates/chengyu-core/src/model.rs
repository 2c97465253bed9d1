//! Core data model types for chengyu.
//!
//! These are the fundamental types the whole system uses to represent idiom
//! records as they arrive from a source, the normalized idiom the engine
//! displays, and the learner-selectable modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::difficulty::classify_difficulty;
use crate::error::SourceError;

/// Shown in place of a missing word.
pub const WORD_PLACEHOLDER: &str = "未知";
/// Shown in place of a missing explanation.
pub const MEANING_PLACEHOLDER: &str = "暂无释义";
/// Shown in place of a missing usage example.
pub const EXAMPLE_PLACEHOLDER: &str = "暂无例句";

/// The idiom shown whenever no usable record is available.
///
/// Shared by normalization and every source failure path.
pub const DEFAULT_IDIOM: IdiomSeed = IdiomSeed {
    word: "画蛇添足",
    pinyin: "huà shé tiān zú",
    explanation: "画蛇时给蛇添上脚。比喻做了多余的事，非但无益，反而不合适。",
    example: "这幅画已经很完美了，你再加些装饰就是画蛇添足了。",
};

/// Static idiom text, used for compiled-in records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdiomSeed {
    pub word: &'static str,
    pub pinyin: &'static str,
    pub explanation: &'static str,
    pub example: &'static str,
}

impl IdiomSeed {
    /// Materialize this seed as an owned record.
    pub fn to_record(&self) -> IdiomRecord {
        IdiomRecord {
            word: self.word.to_string(),
            pinyin: self.pinyin.to_string(),
            explanation: self.explanation.to_string(),
            example: self.example.to_string(),
            derivation: None,
            abbreviation: None,
        }
    }
}

/// A single idiom record as delivered by an idiom source.
///
/// `word` is required on the wire; every other field tolerates absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomRecord {
    /// The idiom itself, and the quiz answer.
    pub word: String,
    /// Pronunciation guide (pinyin with tone marks).
    #[serde(default)]
    pub pinyin: String,
    /// Explanation of the idiom's meaning.
    #[serde(default)]
    pub explanation: String,
    /// A sentence using the idiom.
    #[serde(default)]
    pub example: String,
    /// Historical origin of the idiom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation: Option<String>,
    /// Abbreviated form (usually the initials of the pinyin).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

impl IdiomRecord {
    /// Check the fields required to quiz on this record.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.word.trim().is_empty() {
            return Err(SourceError::MalformedRecord(
                "record has an empty `word` field".into(),
            ));
        }
        Ok(())
    }
}

/// Advisory difficulty label derived from text lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// The label shown on the difficulty badge.
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "初级",
            DifficultyTier::Intermediate => "中级",
            DifficultyTier::Advanced => "高级",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Beginner => write!(f, "beginner"),
            DifficultyTier::Intermediate => write!(f, "intermediate"),
            DifficultyTier::Advanced => write!(f, "advanced"),
        }
    }
}

/// The idiom currently held by the engine.
///
/// Keeps the source text verbatim; placeholders are applied on read so the
/// difficulty tier is always computed from what the source actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIdiom {
    word: String,
    pinyin: String,
    explanation: String,
    example: String,
    derivation: Option<String>,
    abbreviation: Option<String>,
}

impl DisplayIdiom {
    /// Normalize a source record.
    pub fn from_record(record: IdiomRecord) -> Self {
        Self {
            word: record.word.trim().to_string(),
            pinyin: record.pinyin.trim().to_string(),
            explanation: record.explanation.trim().to_string(),
            example: record.example.trim().to_string(),
            derivation: non_blank(record.derivation),
            abbreviation: non_blank(record.abbreviation),
        }
    }

    /// The built-in fallback idiom.
    pub fn default_idiom() -> Self {
        Self::from_record(DEFAULT_IDIOM.to_record())
    }

    pub fn word(&self) -> &str {
        or_placeholder(&self.word, WORD_PLACEHOLDER)
    }

    pub fn pinyin(&self) -> &str {
        &self.pinyin
    }

    pub fn meaning(&self) -> &str {
        or_placeholder(&self.explanation, MEANING_PLACEHOLDER)
    }

    pub fn example(&self) -> &str {
        or_placeholder(&self.example, EXAMPLE_PLACEHOLDER)
    }

    pub fn derivation(&self) -> Option<&str> {
        self.derivation.as_deref()
    }

    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Difficulty tier, recomputed from the source word and explanation.
    pub fn difficulty(&self) -> DifficultyTier {
        classify_difficulty(&self.word, &self.explanation)
    }

    /// Whether `answer` names this idiom: trimmed, case-insensitive, exact.
    pub fn matches(&self, answer: &str) -> bool {
        let answer = answer.trim();
        !answer.is_empty() && answer.to_lowercase() == self.word().to_lowercase()
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'static str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether the answer is shown alongside the idiom or hidden behind a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Study,
    Quiz,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Study => write!(f, "study"),
            DisplayMode::Quiz => write!(f, "quiz"),
        }
    }
}

/// Which clue the quiz prompt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizVariant {
    #[default]
    #[serde(alias = "by_meaning")]
    Meaning,
    #[serde(alias = "by_example")]
    Example,
    Mixed,
}

impl fmt::Display for QuizVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizVariant::Meaning => write!(f, "meaning"),
            QuizVariant::Example => write!(f, "example"),
            QuizVariant::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for QuizVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meaning" | "by_meaning" => Ok(QuizVariant::Meaning),
            "example" | "by_example" => Ok(QuizVariant::Example),
            "mixed" => Ok(QuizVariant::Mixed),
            other => Err(format!("unknown quiz variant: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word: &str, explanation: &str, example: &str) -> IdiomRecord {
        IdiomRecord {
            word: word.into(),
            pinyin: String::new(),
            explanation: explanation.into(),
            example: example.into(),
            derivation: None,
            abbreviation: None,
        }
    }

    #[test]
    fn placeholders_fill_missing_fields() {
        let idiom = DisplayIdiom::from_record(record("", "", "  "));
        assert_eq!(idiom.word(), WORD_PLACEHOLDER);
        assert_eq!(idiom.meaning(), MEANING_PLACEHOLDER);
        assert_eq!(idiom.example(), EXAMPLE_PLACEHOLDER);
    }

    #[test]
    fn difficulty_uses_source_text_not_placeholder() {
        // An empty explanation is Intermediate even though the placeholder is short.
        let idiom = DisplayIdiom::from_record(record("守株待兔", "", "例句"));
        assert_eq!(idiom.difficulty(), DifficultyTier::Intermediate);
    }

    #[test]
    fn default_idiom_fields() {
        let idiom = DisplayIdiom::default_idiom();
        assert_eq!(idiom.word(), "画蛇添足");
        assert_eq!(idiom.pinyin(), "huà shé tiān zú");
        assert!(idiom.meaning().starts_with("画蛇时给蛇添上脚"));
        assert!(idiom.example().contains("画蛇添足"));
    }

    #[test]
    fn matches_trims_and_ignores_case() {
        let idiom = DisplayIdiom::default_idiom();
        assert!(idiom.matches(" 画蛇添足 "));
        assert!(idiom.matches("\t画蛇添足\n"));
        assert!(!idiom.matches("画蛇添"));
        assert!(!idiom.matches("   "));

        let latin = DisplayIdiom::from_record(record("Déjà Vu", "x", "y"));
        assert!(latin.matches("déjà vu"));
    }

    #[test]
    fn optional_fields_trimmed_and_blank_dropped() {
        let mut rec = record("叶公好龙", "x", "y");
        rec.derivation = Some(" 汉·刘向《新序·杂事》 ".into());
        rec.abbreviation = Some("  ".into());
        let idiom = DisplayIdiom::from_record(rec);
        assert_eq!(idiom.derivation(), Some("汉·刘向《新序·杂事》"));
        assert_eq!(idiom.abbreviation(), None);

        let mut rec = record("叶公好龙", "x", "y");
        rec.abbreviation = Some("yghl".into());
        assert_eq!(DisplayIdiom::from_record(rec).abbreviation(), Some("yghl"));
    }

    #[test]
    fn validate_rejects_blank_word() {
        assert!(record("  ", "释义", "例句").validate().is_err());
        assert!(record("刻舟求剑", "", "").validate().is_ok());
    }

    #[test]
    fn record_deserializes_with_missing_optionals() {
        let rec: IdiomRecord = serde_json::from_str(r#"{"word": "叶公好龙"}"#).unwrap();
        assert_eq!(rec.word, "叶公好龙");
        assert!(rec.explanation.is_empty());
        assert!(rec.derivation.is_none());

        let missing_word = serde_json::from_str::<IdiomRecord>(r#"{"pinyin": "x"}"#);
        assert!(missing_word.is_err());
    }

    #[test]
    fn quiz_variant_from_str() {
        assert_eq!("Meaning".parse::<QuizVariant>(), Ok(QuizVariant::Meaning));
        assert_eq!("by_example".parse::<QuizVariant>(), Ok(QuizVariant::Example));
        assert_eq!("mixed".parse::<QuizVariant>(), Ok(QuizVariant::Mixed));
        assert!("random".parse::<QuizVariant>().is_err());
    }

    #[test]
    fn tier_labels() {
        assert_eq!(DifficultyTier::Beginner.label(), "初级");
        assert_eq!(DifficultyTier::Advanced.to_string(), "advanced");
    }
}
