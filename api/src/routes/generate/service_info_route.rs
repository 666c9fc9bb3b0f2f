use std::sync::Arc;

use ai_llm_service::health_service::HealthStatus;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::app::app_state::AppState;

/// Handler: GET /api/generate/health
pub async fn health() -> &'static str {
    "Question Generation Service is running"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfigResponse {
    pub status: &'static str,
    pub api_key_status: &'static str,
    pub ocr_language: String,
    pub ocr_data_path: Option<String>,
}

/// Handler: GET /api/generate/test-config
///
/// Reports whether an API key is set without exposing it.
pub async fn test_config(State(state): State<Arc<AppState>>) -> Json<TestConfigResponse> {
    let ocr = state.ocr_config();
    Json(TestConfigResponse {
        status: "Configuration test",
        api_key_status: if state.generator.api_key_configured() {
            "Configured"
        } else {
            "Not configured"
        },
        ocr_language: ocr.language.clone(),
        ocr_data_path: ocr.data_path.as_ref().map(|p| p.display().to_string()),
    })
}

/// Handler: GET /api/generate/health/llm
pub async fn llm_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.health.check(state.llm_config()).await)
}
