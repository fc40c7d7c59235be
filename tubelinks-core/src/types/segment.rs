//! Transcript segments as delivered by a fetcher.

use serde::{Deserialize, Serialize};

/// One caption cue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Spoken text of the cue.
    pub text: String,
    /// Start offset in seconds.
    #[serde(default)]
    pub start: f64,
    /// Cue length in seconds.
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptSegment {
    /// Creates a segment with only text, no timing.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }
}

/// Joins segment texts with a single space, in the order given.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
