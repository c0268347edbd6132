pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::ats::handlers;
use crate::config::Config;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/test", get(health::ping_handler))
        // ATS API
        .route("/api/ats-score", post(handlers::handle_ats_score))
        .route("/api/ats-check", post(handlers::handle_ats_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// CORS restricted to the configured frontend origins. Unparseable origins are skipped.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread::ThreadId;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::ats::models::ScoreResult;
    use crate::ats::{AtsScorer, FuzzyAtsScorer};
    use crate::extraction::build_docx;

    const BOUNDARY: &str = "portfolio-test-boundary";

    fn test_config() -> Config {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            max_upload_bytes: 1024 * 1024,
            min_resume_chars: 50,
        }
    }

    /// Delegates to the default scorer and records the thread it ran on.
    #[derive(Default)]
    struct ThreadRecordingScorer {
        inner: FuzzyAtsScorer,
        thread: Mutex<Option<ThreadId>>,
    }

    impl AtsScorer for ThreadRecordingScorer {
        fn score(&self, resume_text: &str, job_description: &str) -> ScoreResult {
            *self.thread.lock().unwrap() = Some(std::thread::current().id());
            self.inner.score(resume_text, job_description)
        }
    }

    fn test_app() -> Router {
        build_router(AppState {
            config: test_config(),
            scorer: Arc::new(FuzzyAtsScorer::new()),
        })
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let headers = match file_name {
                Some(file_name) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(headers.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/ats-check")
            .header(
                "content-type",
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
    async fn test_health_ok() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "portfolio-api");
    }

    #[tokio::test]
    async fn test_ping_has_timestamp() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["message"], "Server is running!");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_ats_score_returns_result() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/ats-score")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"resumeText": "Experience with Rust. Contact: a@b.com", "jobDescription": ""}"#,
            ))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["result"]["breakdown"]["keyword_match"], 50);
        assert!(body["result"]["meta"]["totalWords"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_ats_check_scores_uploaded_text() {
        let resume = "Summary: backend engineer. Experience: built Rust services at Acme 2019-2023. \
                      Skills: Rust, Tokio, PostgreSQL. Contact: dev@example.com";
        let body = multipart_body(&[
            (
                "jobDescription",
                None,
                "Rust engineer with Tokio experience".as_bytes(),
            ),
            ("resume", Some("resume.txt"), resume.as_bytes()),
        ]);

        let response = test_app().oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let result = &body["result"];
        assert!(result["score"].as_u64().unwrap() <= 100);
        assert_eq!(result["meta"]["years"][0], "2019");
        let gaps: Vec<&str> = result["keyword_gaps"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(!gaps.contains(&"tokio"));
    }

    #[tokio::test]
    async fn test_ats_check_without_file_is_bad_request() {
        let body = multipart_body(&[("jobDescription", None, "Rust engineer".as_bytes())]);

        let response = test_app().oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_ats_check_rejects_insufficient_text() {
        let body = multipart_body(&[("resume", Some("resume.txt"), "too little".as_bytes())]);

        let response = test_app().oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_ats_check_scores_docx_upload() {
        let docx = build_docx(&[
            "Experience",
            "Built Rust services with Tokio at Acme, 2019 to 2023.",
            "Contact: dev@example.com",
        ]);
        let body = multipart_body(&[
            ("jobDescription", None, "Rust engineer with Tokio".as_bytes()),
            ("resume", Some("resume.docx"), docx.as_slice()),
        ]);

        let response = test_app().oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let result = &body["result"];
        assert_eq!(result["meta"]["years"][0], "2019");
        let gaps: Vec<&str> = result["keyword_gaps"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(gaps.contains(&"engineer"));
        assert!(!gaps.contains(&"tokio"));
    }

    #[tokio::test]
    async fn test_ats_check_rejects_corrupt_docx() {
        let body = multipart_body(&[("resume", Some("resume.docx"), b"PK".as_slice())]);

        let response = test_app().oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_scoring_runs_off_the_request_thread() {
        let scorer = Arc::new(ThreadRecordingScorer::default());
        let app = build_router(AppState {
            config: test_config(),
            scorer: scorer.clone(),
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/ats-score")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"resumeText": "Rust engineer", "jobDescription": "rust"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let scored_on = scorer.thread.lock().unwrap().expect("scorer was not called");
        assert_ne!(scored_on, std::thread::current().id());
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = test_app().layer(cors_layer(&test_config()));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/ats-score")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let app = test_app().layer(cors_layer(&test_config()));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/ats-score")
            .header("origin", "https://evil.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
