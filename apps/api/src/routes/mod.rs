pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/questions/summary",
            get(handlers::handle_catalog_summary),
        )
        .route("/api/v1/recommendations", post(handlers::handle_recommend))
        .route(
            "/api/v1/recommendations/csv",
            post(handlers::handle_recommend_csv),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::QuestionCatalog;
    use crate::config::Config;
    use crate::models::question::QuestionRecord;
    use crate::recommendation::scorer::TfIdfScorer;

    const BOUNDARY: &str = "question-api-test-boundary";

    fn test_state(records: Vec<QuestionRecord>) -> AppState {
        AppState {
            config: Config {
                question_count_min: 3,
                question_count_max: 4,
                ..Config::default()
            },
            catalog: Arc::new(QuestionCatalog::new(records)),
            scorer: Arc::new(TfIdfScorer),
        }
    }

    fn sample_catalog() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new("Explain REST", "Web", "Medium"),
            QuestionRecord::new("What is a mutex?", "OS", "Easy"),
            QuestionRecord::new("What is a deadlock?", "OS", "Medium"),
            QuestionRecord::new("Describe the TCP handshake", "Networking", "Hard"),
            QuestionRecord::new("What is a B-tree index?", "Databases", "Hard"),
        ]
    }

    fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(sample_catalog()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_catalog_summary() {
        let app = build_router(test_state(sample_catalog()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/questions/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total"], 5);
        assert_eq!(body["unique"], 5);
        assert_eq!(body["categories"]["OS"], 2);
    }

    #[tokio::test]
    async fn test_text_upload_returns_ranked_questions() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body(
            "file",
            "cv.txt",
            "text/plain",
            b"Systems engineer. Debugged mutex contention and deadlock issues.",
        );
        let response = app
            .oneshot(upload_request("/api/v1/recommendations?count=3", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["count"], 3);
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 3);
        let top_two: Vec<&str> = questions[..2]
            .iter()
            .map(|q| q["question"].as_str().unwrap())
            .collect();
        assert!(top_two.contains(&"What is a mutex?"));
        assert!(top_two.contains(&"What is a deadlock?"));
        assert_eq!(questions[0]["category"], "OS");
    }

    #[tokio::test]
    async fn test_default_count_comes_from_configured_range() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body("file", "cv.txt", "text/plain", b"Rust engineer");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let count = json_body(response).await["count"].as_u64().unwrap();
        assert!((3..=4).contains(&count));
    }

    #[tokio::test]
    async fn test_csv_download() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body("file", "cv.txt", "text/plain", b"mutex");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations/csv?count=2", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("interview_questions.csv"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Question,Category,Difficulty");
        assert_eq!(lines[1], "What is a mutex?,OS,Easy");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_count_is_bad_request() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body("file", "cv.txt", "text/plain", b"mutex");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations?count=0", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "ARGUMENT_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_utf8_upload_is_input_error() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body("file", "cv.txt", "text/plain", &[0x66, 0xff, 0xfe, 0x67]);
        let response = app
            .oneshot(upload_request("/api/v1/recommendations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_ERROR");
    }

    #[tokio::test]
    async fn test_unsupported_type_is_input_error() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body("file", "cv.png", "image/png", b"\x89PNG");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_ERROR");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_input_error() {
        let app = build_router(test_state(sample_catalog()));
        let body = multipart_body("resume", "cv.txt", "text/plain", b"mutex");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_ERROR");
    }

    #[tokio::test]
    async fn test_empty_catalog_is_config_error() {
        let app = build_router(test_state(vec![]));
        let body = multipart_body("file", "cv.txt", "text/plain", b"mutex");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations?count=2", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_empty_catalog_wins_over_invalid_count() {
        let app = build_router(test_state(vec![]));
        let body = multipart_body("file", "cv.txt", "text/plain", b"mutex");
        let response = app
            .oneshot(upload_request("/api/v1/recommendations?count=0", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "CONFIG_ERROR");
    }
}
