//! TTL cache for tubelinks transcripts.
//!
//! In-memory mapping from (video id, language) to the computed response,
//! with expiry checked on every read and a per-request coin flip that
//! occasionally sweeps out stale entries.

mod cache;
mod clock;
mod config;

pub use cache::{CacheStats, TranscriptCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
