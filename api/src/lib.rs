//! HTTP surface of the question generator.
//!
//! All routes live under `/api/generate`; see [`router`].

use std::{error::Error, sync::Arc};

mod app;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

pub use crate::app::app_state::{AppConfig, AppState, ConfigError, QuizService};
pub use crate::app::http::response_envelope::{GenerateResponse, ResponseStatus};
pub use crate::error_handler::AppError;
use crate::middleware_layer::json_extractor::json_error_mapper;

/// Builds the application router over shared `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .nest("/api/generate", routes::generate::router())
        .layer(body_limit)
        .layer(middleware::from_fn(json_error_mapper))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin) {
        Ok(v) => layer.allow_origin(v),
        Err(_) => {
            warn!(%origin, "CORS origin is not a valid header value; cross-origin requests disabled");
            layer
        }
    }
}

/// Loads configuration from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), Box<dyn Error>> {
    let state = Arc::new(AppState::from_env()?);
    let addr = state.config.address.clone();

    info!(
        api_key_configured = state.generator.api_key_configured(),
        model = %state.llm_config().model,
        ocr_language = %state.ocr_config().language,
        cors_origin = %state.config.cors_origin,
        "configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "question generation service listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
