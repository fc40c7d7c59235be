//! Common traits for tubelinks.
//!
//! The fetcher is the only collaborator the request flow suspends on, so it
//! sits behind a trait that tests can replace.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::TranscriptSegment;

// ═══════════════════════════════════════════════════════════════════════════════
// FETCHER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of transcripts.
///
/// Implementations return segments in playback order. A video with
/// transcripts disabled, or without one in `lang`, must fail with an error
/// for which [`TubelinksError::is_not_available`](crate::TubelinksError::is_not_available)
/// is true. Every other failure is reported as-is. Timeouts are the
/// implementation's own business; callers never retry.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetches the transcript of `video_id` in language `lang`.
    async fn fetch(&self, video_id: &str, lang: &str) -> Result<Vec<TranscriptSegment>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "fetcher"
    }
}
