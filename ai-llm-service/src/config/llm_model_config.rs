/// Placeholder value shipped in sample configs; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Configuration for a chat-completion model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// It can be extended as needed to support new backends or features.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gpt-3.5-turbo"`, `"openai/gpt-4o-mini"`).
/// - `endpoint`: API base URL; the chat route `/v1/chat/completions` is appended.
/// - `api_key`: Bearer token. `None`, blank or [`PLACEHOLDER_API_KEY`] means "not configured".
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Controls randomness (0.0 = deterministic, >1.0 = more random).
/// - `timeout_secs`: Optional request timeout in seconds.
/// - `http_referer` / `app_title`: vendor routing headers (`HTTP-Referer`, `X-Title`).
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gpt-3.5-turbo".to_string(),
///     endpoint: "https://openrouter.ai/api".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(2000),
///     temperature: Some(0.7),
///     timeout_secs: Some(60),
///     http_referer: Some("http://localhost:9876".to_string()),
///     app_title: Some("EdTech Question Generator".to_string()),
/// };
/// assert!(cfg.api_key_configured());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// API base URL (remote API or local proxy).
    pub endpoint: String,

    /// Optional API key for bearer authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Value for the `HTTP-Referer` routing header.
    pub http_referer: Option<String>,

    /// Value for the `X-Title` routing header.
    pub app_title: Option<String>,
}

impl LlmModelConfig {
    /// Returns the usable API key, or `None` when it is absent, blank or the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }

    /// `true` if a real API key is configured.
    pub fn api_key_configured(&self) -> bool {
        self.usable_api_key().is_some()
    }
}
