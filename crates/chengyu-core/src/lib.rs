//! chengyu-core: quiz engine, difficulty classifier, and data model.
//!
//! This crate defines the idiom data model, the `IdiomSource` trait, and the
//! quiz/session engine that the rest of chengyu builds on.

pub mod difficulty;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod report;
pub mod session;
pub mod traits;

pub use difficulty::classify_difficulty;
pub use engine::{AdvanceOutcome, QuizEngine, QuizEngineConfig, SubmitOutcome};
pub use error::SourceError;
pub use model::{DifficultyTier, DisplayIdiom, DisplayMode, IdiomRecord, QuizVariant};
pub use traits::IdiomSource;
