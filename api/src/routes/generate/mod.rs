//! `/api/generate/*`: question generation and service introspection.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::app::app_state::AppState;

pub mod generate_questions_route;
pub mod generate_request;
pub mod service_info_route;
pub mod test_text_route;

use generate_questions_route::generate_questions;
use service_info_route::{health, llm_health, test_config};
use test_text_route::test_text;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", post(generate_questions))
        .route("/test-text", post(test_text))
        .route("/health", get(health))
        .route("/health/llm", get(llm_health))
        .route("/test-config", get(test_config))
}
