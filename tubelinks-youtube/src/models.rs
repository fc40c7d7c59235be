//! Wire shapes of the YouTube responses we read.
//!
//! Only the fields we use are modelled; everything else is ignored.

use serde::Deserialize;

/// Innertube `player` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayabilityStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    pub renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TracklistRenderer {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` for auto-generated tracks.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Timed text in `fmt=json3`.
#[derive(Debug, Deserialize)]
pub(crate) struct Json3Transcript {
    #[serde(default)]
    pub events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Json3Event {
    #[serde(default)]
    pub t_start_ms: Option<u64>,
    #[serde(default)]
    pub d_duration_ms: Option<u64>,
    #[serde(default)]
    pub segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Json3Seg {
    #[serde(default)]
    pub utf8: String,
}
