use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::app::http::response_envelope::GenerateResponse;

const REQUEST_ID: &str = "X-Request-Id";

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> Option<String> {
    if let Some(v) = parts.headers.get(REQUEST_ID).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return Some(v.to_string());
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    let value = HeaderValue::from_str(&id).ok()?;
    parts.headers.insert(REQUEST_ID, value);
    Some(id)
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Rewrites plain-text extractor rejections (400/413/422) into the JSON
/// envelope and stamps every response with an `X-Request-Id`.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();
    let (mut parts, body) = res.into_parts();
    ensure_request_id(&mut parts);

    let rejection = matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNPROCESSABLE_ENTITY
    );
    if !rejection || is_json(&parts) {
        return Response::from_parts(parts, body);
    }

    let (mut parts, bytes) = take_body(Response::from_parts(parts, body)).await;
    let original = String::from_utf8_lossy(&bytes);
    let message = match original.trim() {
        "" => status.canonical_reason().unwrap_or("Bad request").to_string(),
        text => text.to_string(),
    };

    let body = match serde_json::to_vec(&GenerateResponse::error(message)) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, body.into())
}
