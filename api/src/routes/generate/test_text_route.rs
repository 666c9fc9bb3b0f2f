//! POST /api/generate/test-text: generation from text, skipping OCR.

use std::sync::Arc;

use axum::extract::{Query, State, rejection::QueryRejection};
use tracing::info;

use crate::{
    app::{app_state::AppState, http::response_envelope::GenerateResponse},
    error_handler::AppResult,
    routes::generate::generate_request::TestTextQuery,
};

/// Handler: POST /api/generate/test-text
///
/// # Example
/// ```bash
/// curl -X POST 'http://127.0.0.1:9876/api/generate/test-text?subject=physics&questionCount=2'
/// ```
pub async fn test_text(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TestTextQuery>, QueryRejection>,
) -> AppResult<GenerateResponse> {
    let Query(query) = query?;
    let text = query.text();
    let options = query.options();

    info!(
        preview = %text.chars().take(50).collect::<String>(),
        subject = %options.subject,
        "testing question generation with text"
    );

    let outcome = state.generator.generate_from_text(text, &options).await?;

    info!(
        count = outcome.questions.len(),
        origin = ?outcome.origin,
        "test questions generated"
    );
    Ok(GenerateResponse::success(outcome))
}
