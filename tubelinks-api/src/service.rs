//! Request flow: lazy cleanup, cache lookup, fetch on miss, extract, store.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use tubelinks_cache::TranscriptCache;
use tubelinks_core::constants::NOT_AVAILABLE_DETAIL;
use tubelinks_core::error::TubelinksError;
use tubelinks_core::traits::TranscriptFetcher;
use tubelinks_core::types::{join_segments, CacheKey, ResponseData};
use tubelinks_links::extract_links;

/// The two outcomes a failed request can have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No transcript for this video in this language.
    #[error("{}", NOT_AVAILABLE_DETAIL)]
    NotFound,
    /// Anything else; carries the upstream failure message.
    #[error("{0}")]
    Upstream(String),
}

impl From<TubelinksError> for ServiceError {
    fn from(err: TubelinksError) -> Self {
        if err.is_not_available() {
            ServiceError::NotFound
        } else {
            ServiceError::Upstream(err.to_string())
        }
    }
}

/// Serves transcripts, going upstream only on a cache miss.
///
/// Cheap to clone; clones share the cache and the fetcher.
#[derive(Clone)]
pub struct TranscriptService {
    cache: Arc<TranscriptCache>,
    fetcher: Arc<dyn TranscriptFetcher>,
}

impl TranscriptService {
    /// Creates a service over an existing cache and fetcher.
    pub fn new(cache: Arc<TranscriptCache>, fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        Self { cache, fetcher }
    }

    /// Returns the cache this service reads and writes.
    pub fn cache(&self) -> &TranscriptCache {
        &self.cache
    }

    /// Returns the transcript of `video_id` in `lang` and the links in it.
    ///
    /// Nothing is cached when the fetch fails.
    pub async fn get_transcript(
        &self,
        video_id: &str,
        lang: &str,
    ) -> Result<Arc<ResponseData>, ServiceError> {
        self.cache.maybe_cleanup();

        let key = CacheKey::new(video_id, lang);
        if let Some(hit) = self.cache.lookup(&key) {
            debug!(%key, "Cache hit");
            return Ok(hit);
        }
        debug!(%key, fetcher = self.fetcher.name(), "Cache miss");

        let segments = self.fetcher.fetch(video_id, lang).await.map_err(|err| {
            if err.is_not_available() {
                debug!(%key, error = %err, "Transcript not available");
            } else {
                warn!(%key, error = %err, "Transcript fetch failed");
            }
            ServiceError::from(err)
        })?;

        let transcript = join_segments(&segments);
        let links = extract_links(&transcript);
        let response = Arc::new(ResponseData::new(transcript, links));

        debug!(%key, segments = segments.len(), links = response.links.len(), "Caching transcript");
        self.cache.store(key, Arc::clone(&response));
        Ok(response)
    }
}
