//! Error types for tubelinks.
//!
//! Upstream failures fall into two families: "not available" (the video has
//! no transcript in the requested language) and everything else. Callers at
//! the HTTP boundary only ever need [`TubelinksError::is_not_available`] to
//! tell them apart.

use thiserror::Error;

/// Result type alias using `TubelinksError`.
pub type Result<T> = std::result::Result<T, TubelinksError>;

/// Main error type for all tubelinks operations.
#[derive(Debug, Error)]
pub enum TubelinksError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NOT AVAILABLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Transcripts are turned off for the video.
    #[error("Transcripts are disabled for video: {0}")]
    TranscriptsDisabled(String),

    /// The video has transcripts, just not in the requested language.
    #[error("No transcript found for video '{video_id}' in language '{lang}'")]
    NoTranscriptFound {
        /// Requested video
        video_id: String,
        /// Requested language code
        lang: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM FAILURES
    // ═══════════════════════════════════════════════════════════════════════════

    /// The video itself cannot be played (removed, private, bad id).
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    /// Upstream refused to serve us (bot check, rate limit).
    #[error("Request blocked by upstream for video: {0}")]
    RequestBlocked(String),

    /// Any other upstream-reported failure.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream payload could not be understood.
    #[error("Failed to parse upstream data: {0}")]
    ParseError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERVICE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TubelinksError {
    /// Returns true if upstream has no transcript to give for this request.
    ///
    /// Disabled transcripts and a missing language are deliberately not
    /// distinguished past this point.
    pub fn is_not_available(&self) -> bool {
        matches!(
            self,
            TubelinksError::TranscriptsDisabled(_) | TubelinksError::NoTranscriptFound { .. }
        )
    }

    /// Returns true if this error originated upstream or on the wire.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            TubelinksError::VideoUnavailable(_)
                | TubelinksError::RequestBlocked(_)
                | TubelinksError::UpstreamError(_)
                | TubelinksError::HttpError(_)
                | TubelinksError::ParseError(_)
                | TubelinksError::JsonError(_)
        )
    }
}
