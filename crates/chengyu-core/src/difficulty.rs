//! Difficulty classification.
//!
//! A purely advisory label computed from text lengths. It never affects
//! scoring or idiom selection.

use crate::model::DifficultyTier;

/// Longest word (in characters) that can be rated below Advanced.
pub const MAX_SHORT_WORD_CHARS: usize = 4;
/// Longest explanation (in characters) rated Beginner.
pub const BEGINNER_MAX_EXPLANATION_CHARS: usize = 30;
/// Longest explanation (in characters) rated Intermediate.
pub const INTERMEDIATE_MAX_EXPLANATION_CHARS: usize = 60;

/// Classify an idiom by its word and explanation.
///
/// Rules are applied in order, first match wins:
/// 1. empty word or explanation → Intermediate
/// 2. word ≤ 4 and explanation ≤ 30 characters → Beginner
/// 3. word ≤ 4 and explanation ≤ 60 characters → Intermediate
/// 4. otherwise → Advanced
///
/// Lengths are counted in `char`s. CJK text is three bytes per character in
/// UTF-8, so byte lengths would push almost everything into Advanced.
pub fn classify_difficulty(word: &str, explanation: &str) -> DifficultyTier {
    if word.is_empty() || explanation.is_empty() {
        return DifficultyTier::Intermediate;
    }

    let word_chars = word.chars().count();
    let explanation_chars = explanation.chars().count();

    if word_chars > MAX_SHORT_WORD_CHARS {
        DifficultyTier::Advanced
    } else if explanation_chars <= BEGINNER_MAX_EXPLANATION_CHARS {
        DifficultyTier::Beginner
    } else if explanation_chars <= INTERMEDIATE_MAX_EXPLANATION_CHARS {
        DifficultyTier::Intermediate
    } else {
        DifficultyTier::Advanced
    }
}
