use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower::util::ServiceExt; // for `oneshot`
use tracing_test::traced_test;

use api_ingress::request_id::XRequestId;
use api_ingress::{ApiIngress, AppError};
use utoipa::openapi::OpenApiBuilder;

#[tokio::test]
async fn generates_request_id_when_missing() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/sample/echo").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let header_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id should be generated");
    assert!(!header_id.is_empty(), "request_id should not be empty");

    // The handler saw the same generated id
    let json = body_json(response).await;
    assert_eq!(json["request_id"], header_id);
}

#[tokio::test]
async fn preserves_incoming_request_id() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/sample/echo")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("abc-123"));
}

#[tokio::test]
async fn error_responses_keep_request_id_header() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/sample/error")
                .header("x-request-id", "error-test-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("error-test-123"));

    let json = body_json(response).await;
    assert_eq!(json, json!({ "status": 400, "message": "Test error" }));
}

#[traced_test]
#[tokio::test]
async fn error_log_carries_request_span() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/sample/error")
                .header("x-request-id", "span-check-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(logs_contain("http_request"));
    assert!(logs_contain("span-check-42"));
    assert!(logs_contain("request failed"));
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// Probe module mounted through the real ingress stack
fn test_app() -> Router {
    let routes = Router::new()
        .route("/echo", get(echo_handler))
        .route("/error", get(error_handler));

    ApiIngress::default()
        .mount("/sample", routes, OpenApiBuilder::new().build())
        .unwrap()
        .build_router()
}

async fn echo_handler(
    Extension(XRequestId(request_id)): Extension<XRequestId>,
) -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "request_id": request_id}))
}

async fn error_handler() -> Result<Json<serde_json::Value>, AppError> {
    Err(AppError::BadRequest("Test error".into()))
}
