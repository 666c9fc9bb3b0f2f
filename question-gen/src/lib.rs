//! Quiz question generation.
//!
//! Public API:
//! - [`QuizGenerator`]: OCR → prompt → model → normalization for one request.
//! - [`normalize`]: the tiered parser that turns raw model text into [`Question`]s.
//! - [`build_prompt`]: the deterministic instruction sent to the model.
//!
//! Every normalization result carries a [`QuestionOrigin`], so callers can tell
//! model-authored questions from heuristic or placeholder ones.

mod errors;
mod generator;
mod model;
mod options;
mod prompt;

pub mod normalize;

pub use errors::{GenerationError, NormalizationError};
pub use generator::QuizGenerator;
pub use model::{GenerationOutcome, Question, QuestionOrigin, QuestionType};
pub use normalize::normalize;
pub use options::{
    DEFAULT_DIFFICULTY, DEFAULT_PLACEHOLDER_COUNT, DEFAULT_QUESTION_COUNT, DEFAULT_SUBJECT,
    GenerationOptions, MAX_QUESTION_COUNT,
};
pub use prompt::build_prompt;
