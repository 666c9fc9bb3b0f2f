use std::sync::Arc;

use ai_llm_service::{LlmModelConfig, OpenAiService, health_service::HealthService};
use api::{AppConfig, AppState, router};
use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode, header},
};
use question_gen::QuizGenerator;
use serde_json::Value;
use services::{OcrConfig, TesseractOcr};
use tower::ServiceExt;

const BOUNDARY: &str = "quizgen-test-boundary";

/// State without an API key (every model call falls back to placeholders)
/// and with an OCR binary that does not exist.
fn app() -> axum::Router {
    let llm = LlmModelConfig {
        model: "gpt-3.5-turbo".into(),
        endpoint: "http://127.0.0.1:9".into(),
        api_key: Some("your-api-key-here".into()),
        max_tokens: Some(2000),
        temperature: Some(0.7),
        timeout_secs: Some(1),
        http_referer: None,
        app_title: None,
    };
    let generator = QuizGenerator::new(
        TesseractOcr::new(OcrConfig {
            binary: "definitely-not-a-real-ocr-binary".into(),
            ..OcrConfig::default()
        }),
        OpenAiService::new(llm).expect("service should build"),
    );
    let health = HealthService::new(Some(1)).expect("health service should build");
    let config = AppConfig {
        max_upload_bytes: 4 * 1024,
        ..AppConfig::default()
    };

    router(Arc::new(AppState::new(config, generator, health)))
}

/// Multipart body of `(name, file_name, bytes)` parts.
fn multipart(parts: &[(&str, Option<&str>, &[u8])]) -> Body {
    let mut body = Vec::new();
    for (name, file_name, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

async fn send(req: Request<Body>) -> Response<Body> {
    app().oneshot(req).await.expect("router should respond")
}

async fn json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn post_questions(body: Body) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/generate/questions")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .expect("request build should succeed")
}

#[tokio::test]
async fn health_reports_running() {
    let resp = send(
        Request::get("/api/generate/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Question Generation Service is running".as_slice());
}

#[tokio::test]
async fn test_config_hides_the_key() {
    let resp = send(
        Request::get("/api/generate/test-config")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let v = json(resp).await;
    assert_eq!(v["status"], "Configuration test");
    assert_eq!(v["apiKeyStatus"], "Not configured");
    assert_eq!(v["ocrLanguage"], "eng");
    assert!(v["ocrDataPath"].is_null());
}

#[tokio::test]
async fn llm_health_without_key_is_not_ok() {
    let resp = send(
        Request::get("/api/generate/health/llm")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let v = json(resp).await;
    assert_eq!(v["ok"], false);
    assert_eq!(v["message"], "API key is not configured");
}

#[tokio::test]
async fn test_text_without_key_returns_flagged_placeholders() {
    let resp = send(
        Request::post("/api/generate/test-text")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let v = json(resp).await;
    assert_eq!(v["status"], "success");
    assert_eq!(v["origin"], "placeholder");
    let questions = v["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["type"], "MCQ");
    assert_eq!(questions[0]["answer"], "Option A");
}

#[tokio::test]
async fn test_text_honours_question_count() {
    let resp = send(
        Request::post("/api/generate/test-text?text=Gravity%20pulls&questionCount=5")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let v = json(resp).await;
    assert_eq!(v["questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_text_rejects_blank_text_and_bad_count() {
    let resp = send(
        Request::post("/api/generate/test-text?text=%20%20")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = json(resp).await;
    assert_eq!(v["status"], "error");
    assert!(v["questions"].is_null());
    assert_eq!(v["message"], "Text content is required");

    let resp = send(
        Request::post("/api/generate/test-text?questionCount=many")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["status"], "error");
}

#[tokio::test]
async fn questions_require_a_non_empty_image() {
    let resp = send(post_questions(multipart(&[("subject", None, b"biology".as_slice())]))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = json(resp).await;
    assert_eq!(v["message"], "Image file is required");
    assert!(v.get("origin").is_none());

    let resp = send(post_questions(multipart(&[("image", Some("a.png"), b"".as_slice())]))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn questions_reject_malformed_count() {
    let resp = send(post_questions(multipart(&[
        ("image", Some("a.png"), b"png".as_slice()),
        ("questionCount", None, b"lots".as_slice()),
    ])))
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["status"], "error");
}

#[tokio::test]
async fn ocr_failure_is_a_server_error() {
    let resp = send(post_questions(multipart(&[
        ("image", Some("page.png"), b"\x89PNG not really".as_slice()),
        ("difficulty", None, b"hard".as_slice()),
    ])))
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let v = json(resp).await;
    assert_eq!(v["status"], "error");
    assert!(
        v["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to extract text from image")
    );
}

#[tokio::test]
async fn non_multipart_body_is_rejected_as_json() {
    let req = Request::post("/api/generate/questions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = send(req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(json(resp).await["status"], "error");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let big = vec![b'x'; 16 * 1024];
    let resp = send(post_questions(multipart(&[("image", Some("big.png"), big.as_slice())]))).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json(resp).await["status"], "error");
}
