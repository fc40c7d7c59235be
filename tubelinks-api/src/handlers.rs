//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use tubelinks_cache::CacheStats;
use tubelinks_core::types::ResponseData;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /transcript
///
/// A malformed query (missing `video_id`) is a 422 with a `detail` body.
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<TranscriptQuery>, QueryRejection>,
) -> Result<Json<ResponseData>> {
    let Query(query) = query?;
    let response = state
        .service
        .get_transcript(&query.video_id, &query.lang)
        .await?;

    info!(
        video_id = %query.video_id,
        lang = %query.lang,
        links = response.links.len(),
        "Served transcript"
    );

    Ok(Json(ResponseData::clone(&response)))
}

/// GET /cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.service.cache().stats())
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cached_entries: state.service.cache().len(),
    })
}
