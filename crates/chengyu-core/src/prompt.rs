//! Quiz prompt construction.

use rand::Rng;

use crate::model::{DisplayIdiom, QuizVariant};

/// Prefix for prompts built from the idiom's meaning.
pub const MEANING_PREFIX: &str = "根据释义猜成语：";
/// Prefix for prompts built from the idiom's usage example.
pub const EXAMPLE_PREFIX: &str = "根据例句猜成语：";

/// The clue a single prompt was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clue {
    Meaning,
    Example,
}

impl Clue {
    /// Flip a fair coin between the two clues.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Clue::Meaning
        } else {
            Clue::Example
        }
    }

    /// Resolve a variant to a concrete clue, drawing for `Mixed`.
    pub fn for_variant<R: Rng + ?Sized>(variant: QuizVariant, rng: &mut R) -> Self {
        match variant {
            QuizVariant::Meaning => Clue::Meaning,
            QuizVariant::Example => Clue::Example,
            QuizVariant::Mixed => Clue::draw(rng),
        }
    }
}

/// Render the prompt text for a concrete clue.
pub fn render_prompt(idiom: &DisplayIdiom, clue: Clue) -> String {
    match clue {
        Clue::Meaning => format!("{MEANING_PREFIX}{}", idiom.meaning()),
        Clue::Example => format!("{EXAMPLE_PREFIX}{}", idiom.example()),
    }
}

/// Build a prompt using the supplied random source.
///
/// `Mixed` draws a fresh coin on every call, so two calls for the same idiom
/// may differ.
pub fn build_prompt_with<R: Rng + ?Sized>(
    idiom: &DisplayIdiom,
    variant: QuizVariant,
    rng: &mut R,
) -> String {
    render_prompt(idiom, Clue::for_variant(variant, rng))
}

/// Build a prompt using the thread-local RNG.
pub fn build_prompt(idiom: &DisplayIdiom, variant: QuizVariant) -> String {
    build_prompt_with(idiom, variant, &mut rand::thread_rng())
}
