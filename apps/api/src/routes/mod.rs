pub mod health;
pub mod review;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/review",
            post(review::handle_review).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::errors::AppError;
    use crate::references::ReferenceLibrary;
    use crate::review::models::{CvReview, Issue};
    use crate::review::CvReviewer;
    use crate::test_support::{pdf_with_lines, write_temp_file};

    /// Records what it was asked to review and answers with a canned review.
    #[derive(Default)]
    struct RecordingReviewer {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CvReviewer for RecordingReviewer {
        async fn review(&self, cv_text: &str, examples_text: &str) -> Result<CvReview, AppError> {
            self.seen
                .lock()
                .unwrap()
                .push((cv_text.to_string(), examples_text.to_string()));
            Ok(CvReview {
                overall_score: Some(78.0),
                issues: vec![Issue {
                    title: "Few metrics".to_string(),
                    description: "Most bullets lack numbers".to_string(),
                    impact: "High".to_string(),
                    ..Issue::default()
                }],
                ..CvReview::default()
            })
        }
    }

    struct FailingReviewer;

    #[async_trait]
    impl CvReviewer for FailingReviewer {
        async fn review(&self, _: &str, _: &str) -> Result<CvReview, AppError> {
            Err(AppError::Llm("upstream returned 503".to_string()))
        }
    }

    fn state_with(reviewer: Arc<dyn CvReviewer>, references: Vec<std::path::PathBuf>) -> AppState {
        AppState {
            reviewer,
            references: ReferenceLibrary::new(references),
            api_key_count: 2,
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let boundary = "cv-review-test-boundary";
        let mut body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/review")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_index_reports_liveness() {
        let app = build_router(state_with(Arc::new(RecordingReviewer::default()), vec![]));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], health::LIVENESS_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn test_health_reports_key_count() {
        let app = build_router(state_with(Arc::new(RecordingReviewer::default()), vec![]));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["api_keys"], 2);
    }

    #[tokio::test]
    async fn test_review_requires_user_cv_field() {
        let app = build_router(state_with(Arc::new(RecordingReviewer::default()), vec![]));
        let response = app
            .oneshot(multipart_request("resume", b"%PDF-1.5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("user_cv"));
    }

    #[tokio::test]
    async fn test_review_rejects_non_multipart_body_with_json_error() {
        let app = build_router(state_with(Arc::new(RecordingReviewer::default()), vec![]));
        let response = app
            .oneshot(Request::post("/review").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("multipart/form-data"));
    }

    #[tokio::test]
    async fn test_review_rejects_unparseable_upload() {
        let app = build_router(state_with(Arc::new(RecordingReviewer::default()), vec![]));
        let response = app
            .oneshot(multipart_request(review::CV_FIELD, b"%PDF-1.4\nnot really a pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_review_rejects_empty_upload() {
        let app = build_router(state_with(Arc::new(RecordingReviewer::default()), vec![]));
        let response = app
            .oneshot(multipart_request(review::CV_FIELD, b""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_returns_structured_review() {
        let dir = tempfile::tempdir().unwrap();
        let reference = write_temp_file(
            &dir,
            "reference.pdf",
            &pdf_with_lines(&["Reference Candidate", "Increased revenue by 40 percent"]),
        );
        let reviewer = Arc::new(RecordingReviewer::default());
        let app = build_router(state_with(reviewer.clone(), vec![reference]));

        let upload = pdf_with_lines(&["Andi Pratama", "Backend Developer"]);
        let response = app
            .oneshot(multipart_request(review::CV_FIELD, &upload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["overall_score"], 78.0);
        assert_eq!(body["issues"][0]["impact"], "High");

        let seen = reviewer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Andi Pratama"));
        assert!(seen[0].1.contains("Reference Candidate"));
    }

    #[tokio::test]
    async fn test_missing_reference_is_server_error() {
        let reviewer = Arc::new(RecordingReviewer::default());
        let app = build_router(state_with(
            reviewer.clone(),
            vec!["missing/reference.pdf".into()],
        ));

        let upload = pdf_with_lines(&["Andi Pratama"]);
        let response = app
            .oneshot(multipart_request(review::CV_FIELD, &upload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "REFERENCE_UNAVAILABLE");
        assert!(reviewer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reviewer_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let reference = write_temp_file(&dir, "reference.pdf", &pdf_with_lines(&["Reference"]));
        let app = build_router(state_with(Arc::new(FailingReviewer), vec![reference]));

        let upload = pdf_with_lines(&["Andi Pratama"]);
        let response = app
            .oneshot(multipart_request(review::CV_FIELD, &upload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected() {
        let mut state = state_with(Arc::new(RecordingReviewer::default()), vec![]);
        state.max_upload_bytes = 64;
        let app = build_router(state);

        let response = app
            .oneshot(multipart_request(review::CV_FIELD, &[b'x'; 4096]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
