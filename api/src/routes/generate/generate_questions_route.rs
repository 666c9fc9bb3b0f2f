//! POST /api/generate/questions: image upload → questions.

use std::sync::Arc;

use axum::extract::{
    Multipart, State,
    multipart::MultipartRejection,
};
use question_gen::GenerationError;
use tracing::info;

use crate::{
    app::{app_state::AppState, http::response_envelope::GenerateResponse},
    error_handler::AppResult,
    routes::generate::generate_request::GenerateForm,
};

/// Handler: POST /api/generate/questions
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:9876/api/generate/questions \
///   -F image=@page.png -F subject=biology -F difficulty=easy -F questionCount=5
/// ```
pub async fn generate_questions(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<GenerateResponse> {
    let form = GenerateForm::from_multipart(multipart?).await?;
    let options = form.options();

    info!(
        subject = %options.subject,
        difficulty = %options.difficulty,
        count = ?options.requested_count,
        "received question generation request"
    );

    let image = form
        .image
        .filter(|img| !img.bytes.is_empty())
        .ok_or(GenerationError::InvalidInput("Image file is required"))?;

    let outcome = state
        .generator
        .generate_from_image(&image.bytes, image.file_name.as_deref(), &options)
        .await?;

    info!(
        count = outcome.questions.len(),
        origin = ?outcome.origin,
        "questions generated"
    );
    Ok(GenerateResponse::success(outcome))
}
