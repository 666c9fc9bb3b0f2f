use axum::{body::Bytes, extract::Multipart};
use question_gen::GenerationOptions;
use serde::Deserialize;
use tracing::debug;

use crate::error_handler::{AppError, AppResult};

/// Default text of `/test-text` when the client sends none.
pub const DEFAULT_TEST_TEXT: &str = "The photosynthesis process in plants converts carbon dioxide and water into glucose using sunlight energy. This process occurs in chloroplasts and is essential for plant growth.";
pub const DEFAULT_TEST_SUBJECT: &str = "biology";
pub const DEFAULT_TEST_DIFFICULTY: &str = "medium";
pub const DEFAULT_TEST_QUESTION_COUNT: u32 = 3;

/// Uploaded image as received.
#[derive(Debug)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub file_name: Option<String>,
}

/// Multipart form of `POST /questions`.
///
/// Fields: `image` (file), `subject`, `difficulty`, `questionCount`. Unknown
/// fields are ignored.
#[derive(Debug, Default)]
pub struct GenerateForm {
    pub image: Option<ImageUpload>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    pub question_count: Option<u32>,
}

impl GenerateForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await?;
                    form.image = Some(ImageUpload { bytes, file_name });
                }
                "subject" => form.subject = Some(field.text().await?),
                "difficulty" => form.difficulty = Some(field.text().await?),
                "questionCount" => form.question_count = parse_count(&field.text().await?)?,
                other => debug!(field = other, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(
            self.subject.as_deref(),
            self.difficulty.as_deref(),
            self.question_count,
        )
    }
}

/// Blank means "not given"; anything else must be a non-negative integer.
fn parse_count(raw: &str) -> AppResult<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("questionCount must be a positive integer, got `{raw}`")))
}

/// Query parameters of `POST /test-text`; every one is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestTextQuery {
    pub text: Option<String>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    pub question_count: Option<u32>,
}

impl TestTextQuery {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(DEFAULT_TEST_TEXT)
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(
            Some(self.subject.as_deref().unwrap_or(DEFAULT_TEST_SUBJECT)),
            Some(self.difficulty.as_deref().unwrap_or(DEFAULT_TEST_DIFFICULTY)),
            Some(self.question_count.unwrap_or(DEFAULT_TEST_QUESTION_COUNT)),
        )
    }
}
