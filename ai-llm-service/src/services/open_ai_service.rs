//! OpenAI-compatible chat-completion service.
//!
//! Minimal, synchronous (non-streaming) client around the chat-completion REST API.
//! The endpoint is derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions: chat completion (non-streaming)
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//!
//! The API key is checked on every call rather than at construction, so the
//! service can be built (and the server can start) without a key. Calls made
//! without a usable key fail fast with `MissingApiKey` and never touch the network.
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
    services::ChatModel,
};

/// Thin client for an OpenAI-compatible chat-completion API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    timeout: Duration,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// Validates the endpoint scheme and builds an HTTP client with default
    /// headers (content type and vendor routing headers) and a configurable timeout.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::Provider`] with `Decode` if a routing header value is not a valid header
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::OpenAI,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(referer) = cfg.http_referer.as_deref() {
            headers.insert("HTTP-Referer", routing_header(referer)?);
        }
        if let Some(title) = cfg.app_title.as_deref() {
            headers.insert("X-Title", routing_header(title)?);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            api_key_configured = cfg.api_key_configured(),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            timeout,
        })
    }

    /// Returns the config this service was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// `true` if a usable (non-placeholder) API key is configured.
    pub fn api_key_configured(&self) -> bool {
        self.cfg.api_key_configured()
    }

    /// Performs a **non-streaming** chat completion request (`/v1/chat/completions`).
    ///
    /// The `messages` array holds a single user message with `prompt`.
    ///
    /// Mapped options from config: `model`, `temperature`, `max_tokens`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if no usable key is configured
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::Timeout`] if the request exceeded the configured timeout
    /// - [`AiLlmError::HttpTransport`] for other client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no choice carries content
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let Some(api_key) = self.cfg.usable_api_key() else {
            error!(
                model = %self.cfg.model,
                endpoint = %self.cfg.endpoint,
                "API key is not configured; set LLM_API_KEY"
            );
            return Err(ProviderError::new(Provider::OpenAI, ProviderErrorKind::MissingApiKey).into());
        };

        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self
            .client
            .post(&self.url_chat)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::OpenAI,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        let content = extract_completion_text(&text).inspect_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to extract completion text"
            );
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            content_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }

    fn transport_error(&self, e: reqwest::Error) -> AiLlmError {
        if e.is_timeout() {
            warn!(timeout_secs = self.timeout.as_secs(), "chat completion timed out");
            AiLlmError::Timeout(self.timeout)
        } else {
            AiLlmError::HttpTransport(e)
        }
    }
}

impl ChatModel for OpenAiService {
    async fn complete(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.generate(prompt).await
    }

    fn is_configured(&self) -> bool {
        self.api_key_configured()
    }
}

fn routing_header(value: &str) -> Result<header::HeaderValue, AiLlmError> {
    header::HeaderValue::from_str(value).map_err(|e| {
        ProviderError::new(
            Provider::OpenAI,
            ProviderErrorKind::Decode(format!("invalid routing header value: {e}")),
        )
        .into()
    })
}

/// Pulls the first non-blank `choices[i].message.content` out of a raw response body.
///
/// # Errors
/// - `Decode` if the body is not a chat-completion JSON document
/// - `EmptyChoices` if no choice carries textual content
pub fn extract_completion_text(body: &str) -> Result<String, AiLlmError> {
    let out: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::new(
            Provider::OpenAI,
            ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            )),
        )
    })?;

    out.choices
        .into_iter()
        .filter_map(|c| c.message.and_then(|m| m.content))
        .find(|c| !c.trim().is_empty())
        .ok_or_else(|| ProviderError::new(Provider::OpenAI, ProviderErrorKind::EmptyChoices).into())
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds a single-user-message chat request from config and `prompt`.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }
}

/// Chat message for the API.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageOut>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}
