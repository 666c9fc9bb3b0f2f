use ai_llm_service::{
    LlmModelConfig, OpenAiService, config_openai_chat, health_service::HealthService,
};
use question_gen::QuizGenerator;
use services::{OcrConfig, TesseractOcr};
use thiserror::Error;

/// Generator wired to the production OCR engine and chat API.
pub type QuizService = QuizGenerator<TesseractOcr, OpenAiService>;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:9876";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors raised while reading server settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address, e.g. `0.0.0.0:9876`.
    pub address: String,
    /// Single origin allowed by CORS.
    pub cors_origin: String,
    /// Request body limit, applied to uploads.
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_API_ADDRESS.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Reads `API_ADDRESS`, `CORS_ORIGIN` and `MAX_UPLOAD_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |k: &str| {
            std::env::var(k)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let dflt = Self::default();

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
                var: "MAX_UPLOAD_BYTES",
                reason: e.to_string(),
            })?,
            None => dflt.max_upload_bytes,
        };

        Ok(Self {
            address: var("API_ADDRESS").unwrap_or(dflt.address),
            cors_origin: var("CORS_ORIGIN").unwrap_or(dflt.cors_origin),
            max_upload_bytes,
        })
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub config: AppConfig,
    pub generator: QuizService,
    /// Probe for `/health/llm`.
    pub health: HealthService,
}

impl AppState {
    pub fn new(config: AppConfig, generator: QuizService, health: HealthService) -> Self {
        Self {
            config,
            generator,
            health,
        }
    }

    /// Builds the whole state from environment variables.
    pub fn from_env() -> Result<Self, crate::error_handler::AppError> {
        let config = AppConfig::from_env()?;
        let llm_cfg = config_openai_chat()?;
        let health = HealthService::new(llm_cfg.timeout_secs)?;
        let generator = QuizGenerator::new(
            TesseractOcr::new(OcrConfig::from_env()),
            OpenAiService::new(llm_cfg)?,
        );

        Ok(Self::new(config, generator, health))
    }

    pub fn llm_config(&self) -> &LlmModelConfig {
        self.generator.model().config()
    }

    pub fn ocr_config(&self) -> &OcrConfig {
        self.generator.extractor().config()
    }
}
