//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Transcripts
        .route("/transcript", get(handlers::get_transcript))
        .route("/cache/stats", get(handlers::cache_stats))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use tubelinks_core::error::{Result, TubelinksError};
    use tubelinks_core::traits::TranscriptFetcher;
    use tubelinks_core::types::TranscriptSegment;

    use crate::state::ApiConfig;

    /// Serves "hello <lang> https://example.com/<id>" unless the id says otherwise.
    struct StubFetcher;

    #[async_trait]
    impl TranscriptFetcher for StubFetcher {
        async fn fetch(&self, video_id: &str, lang: &str) -> Result<Vec<TranscriptSegment>> {
            match video_id {
                "disabled" => Err(TubelinksError::TranscriptsDisabled(video_id.into())),
                "broken" => Err(TubelinksError::UpstreamError("upstream exploded".into())),
                _ => Ok(vec![
                    TranscriptSegment::text(format!("hello {}", lang)),
                    TranscriptSegment::text(format!("https://example.com/{}", video_id)),
                ]),
            }
        }
    }

    fn test_app() -> Router {
        let state = Arc::new(AppState::with_fetcher(ApiConfig::default(), Arc::new(StubFetcher)).unwrap());
        create_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_json(test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_transcript_default_lang() {
        let (status, body) = get_json(test_app(), "/transcript?video_id=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transcript"], "hello en https://example.com/abc");
        assert_eq!(body["links"], serde_json::json!(["https://example.com/abc"]));
    }

    #[tokio::test]
    async fn test_transcript_explicit_lang() {
        let (status, body) = get_json(test_app(), "/transcript?video_id=abc&lang=fr").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transcript"], "hello fr https://example.com/abc");
    }

    #[tokio::test]
    async fn test_transcript_not_available() {
        let (status, body) = get_json(test_app(), "/transcript?video_id=disabled").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "detail": "Transcript not available" }));
    }

    #[tokio::test]
    async fn test_transcript_upstream_failure() {
        let (status, body) = get_json(test_app(), "/transcript?video_id=broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Upstream error: upstream exploded");
    }

    #[tokio::test]
    async fn test_transcript_requires_video_id() {
        let response = test_app()
            .oneshot(Request::builder().uri("/transcript?lang=en").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("video_id"));
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let state = Arc::new(AppState::with_fetcher(ApiConfig::default(), Arc::new(StubFetcher)).unwrap());
        let app = create_router(state.clone());

        let (status, _) = get_json(app.clone(), "/transcript?video_id=abc").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(app, "/cache/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_entries"], 1);
        assert_eq!(body["valid_entries"], 1);
    }
}
