//! Typed errors for the question-gen crate.

use services::OcrError;
use thiserror::Error;

/// Why one normalization tier could not produce questions.
///
/// These never reach HTTP callers: [`crate::normalize`] always ends in a
/// terminal tier. They exist so each tier reports a reason the next one can log.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// Neither a `[...]` span nor numbered `N. {...}` objects were found.
    #[error("no JSON array or numbered JSON objects found in model output")]
    NoJsonFound,

    /// The candidate is not well-formed JSON.
    #[error("candidate is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Well-formed JSON that does not match the question schema.
    #[error("candidate does not match the question schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),

    /// Well-formed JSON in a shape no repair strategy understands.
    #[error("unsupported JSON shape: {0}")]
    UnsupportedShape(&'static str),

    /// Plain text held neither list lines nor any non-blank content.
    #[error("no question text found")]
    NoQuestions,
}

impl NormalizationError {
    /// Sorts a serde error into schema mismatch (data) or syntax (everything else).
    pub(crate) fn from_serde(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => NormalizationError::SchemaMismatch(err),
            _ => NormalizationError::Syntax(err),
        }
    }
}

/// Request-level failures that are reported to the caller instead of being
/// papered over with fallback questions.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Required input is missing or empty.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The OCR engine failed.
    #[error("Failed to extract text from image: {0}")]
    Ocr(#[from] OcrError),

    /// OCR succeeded but found no text.
    #[error("Failed to extract text from image")]
    NoTextExtracted,
}
