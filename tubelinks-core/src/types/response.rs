//! Cached response payload.

use std::collections::BTreeSet;

use serde::Serialize;

/// Transcript text and the links found in it.
///
/// Never mutated after construction, so the cache hands it out behind an
/// `Arc` to any number of callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResponseData {
    /// Segment texts joined by single spaces.
    pub transcript: String,
    /// Distinct http(s) URLs appearing in the transcript.
    pub links: BTreeSet<String>,
}

impl ResponseData {
    /// Creates a response payload.
    pub fn new(transcript: impl Into<String>, links: BTreeSet<String>) -> Self {
        Self {
            transcript: transcript.into(),
            links,
        }
    }
}
