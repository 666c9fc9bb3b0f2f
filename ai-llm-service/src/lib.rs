//! Chat-completion client for OpenAI-compatible APIs.
//!
//! - [`config`]: env-driven [`LlmModelConfig`](config::llm_model_config::LlmModelConfig)
//! - [`services`]: the [`ChatModel`](services::ChatModel) seam and its HTTP implementation
//! - [`health_service`]: resilient `/v1/models` probe
//! - [`telemetry`]: formatting layer and filters shared by the workspace binaries

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod services;
pub mod telemetry;

pub use config::default_config::config_openai_chat;
pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::AiLlmError;
pub use services::{ChatModel, open_ai_service::OpenAiService};
