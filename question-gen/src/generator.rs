//! End-to-end generation for one request: OCR, prompt, model, normalization.

use ai_llm_service::ChatModel;
use services::TextExtractor;
use tracing::{debug, info, instrument, warn};

use crate::errors::GenerationError;
use crate::model::GenerationOutcome;
use crate::normalize::{normalize, placeholder};
use crate::options::GenerationOptions;
use crate::prompt::build_prompt;

/// Request pipeline over a text extractor `E` and a chat model `M`.
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Debug)]
pub struct QuizGenerator<E, M> {
    extractor: E,
    model: M,
}

impl<E, M> QuizGenerator<E, M>
where
    E: TextExtractor,
    M: ChatModel,
{
    pub fn new(extractor: E, model: M) -> Self {
        Self { extractor, model }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whether the model has a usable API key. Without one every request ends
    /// in placeholder questions.
    pub fn api_key_configured(&self) -> bool {
        self.model.is_configured()
    }

    /// Extracts text from `image` and generates questions from it.
    ///
    /// OCR failures are returned as errors; model failures are not (see
    /// [`Self::generate_from_text`]).
    #[instrument(skip_all, fields(bytes = image.len(), subject = %options.subject))]
    pub async fn generate_from_image(
        &self,
        image: &[u8],
        file_name: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome, GenerationError> {
        if image.is_empty() {
            return Err(GenerationError::InvalidInput("Image file is required"));
        }

        let text = self.extractor.extract_text(image, file_name).await?;
        if text.trim().is_empty() {
            warn!("OCR returned no text");
            return Err(GenerationError::NoTextExtracted);
        }

        self.generate_from_text(&text, options).await
    }

    /// Generates questions from already extracted text.
    ///
    /// A failed model call yields placeholder questions (origin `Placeholder`)
    /// rather than an error.
    #[instrument(skip_all, fields(chars = text.len(), subject = %options.subject, difficulty = %options.difficulty))]
    pub async fn generate_from_text(
        &self,
        text: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome, GenerationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::InvalidInput("Text content is required"));
        }

        let prompt = build_prompt(text, options);
        debug!(prompt_len = prompt.len(), "prompt built");

        match self.model.complete(&prompt).await {
            Ok(raw) => {
                info!(response_len = raw.len(), "model responded");
                Ok(normalize(&raw, options.requested_count))
            }
            Err(e) => {
                let count = options.placeholder_count();
                warn!(error = %e, count, "model call failed; returning placeholder questions");
                Ok(placeholder::outcome(count))
            }
        }
    }
}
