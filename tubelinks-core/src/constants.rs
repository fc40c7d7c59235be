//! Process-wide defaults for tubelinks.
//!
//! These are only defaults; the effective values are read once at startup
//! and stay fixed for the life of the process.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live for cached transcripts, in seconds (1 hour).
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

/// Default probability that a request triggers a lazy cleanup pass.
pub const DEFAULT_CLEANUP_PROBABILITY: f64 = 0.10;

// ═══════════════════════════════════════════════════════════════════════════════
// REQUESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Language code used when a request does not name one.
pub const DEFAULT_LANG: &str = "en";

/// Port the transcript service listens on by default.
pub const DEFAULT_PORT: u16 = 8001;

/// Fixed detail returned to callers when no transcript can be served.
pub const NOT_AVAILABLE_DETAIL: &str = "Transcript not available";

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the YouTube web frontend.
pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

/// Default timeout for a single upstream HTTP request, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;
