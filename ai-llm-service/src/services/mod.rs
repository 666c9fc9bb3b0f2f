use std::future::Future;

use crate::error_handler::AiLlmError;

pub mod open_ai_service;

/// A model that turns a single user prompt into raw completion text.
///
/// This is the seam callers depend on instead of a concrete HTTP client, so
/// the question pipeline can be exercised with canned model output.
pub trait ChatModel: Send + Sync {
    /// Sends `prompt` as a single user message and returns the raw completion text.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AiLlmError>> + Send;

    /// `true` if the model has the credentials it needs to be called.
    fn is_configured(&self) -> bool;
}
