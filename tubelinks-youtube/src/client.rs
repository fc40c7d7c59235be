//! HTTP client that pulls caption tracks from YouTube.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, instrument, warn};

use tubelinks_core::error::{Result, TubelinksError};
use tubelinks_core::traits::TranscriptFetcher;
use tubelinks_core::types::TranscriptSegment;

use crate::config::YouTubeConfig;
use crate::models::{CaptionTrack, Json3Transcript, PlayerResponse};

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
        .expect("Innertube key pattern is valid")
});

/// Transcript fetcher for YouTube videos.
pub struct YouTubeFetcher {
    config: YouTubeConfig,
    http_client: reqwest::Client,
}

impl YouTubeFetcher {
    /// Creates a fetcher with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(YouTubeConfig::default())
    }

    /// Creates a fetcher with custom configuration.
    pub fn with_config(config: YouTubeConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TubelinksError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &YouTubeConfig {
        &self.config
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let url = format!("{}/watch", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("v", video_id)])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .send()
            .await
            .map_err(|e| TubelinksError::HttpError(format!("Failed to fetch watch page: {}", e)))?;

        check_status(&response, video_id)?;

        response
            .text()
            .await
            .map_err(|e| TubelinksError::HttpError(format!("Failed to read watch page: {}", e)))
    }

    async fn fetch_player(&self, video_id: &str, api_key: &str) -> Result<PlayerResponse> {
        let url = format!("{}/youtubei/v1/player", self.config.base_url);
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": "20.10.38"
                }
            },
            "videoId": video_id
        });

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| TubelinksError::HttpError(format!("Failed to fetch player data: {}", e)))?;

        check_status(&response, video_id)?;

        response
            .json()
            .await
            .map_err(|e| TubelinksError::ParseError(format!("Invalid player response: {}", e)))
    }

    async fn fetch_track(&self, video_id: &str, track: &CaptionTrack) -> Result<Vec<TranscriptSegment>> {
        if track.base_url.contains("&exp=xpe") {
            return Err(TubelinksError::UpstreamError(format!(
                "Caption track for {} requires a proof-of-origin token",
                video_id
            )));
        }

        let url = format!("{}&fmt=json3", track.base_url.replace("&fmt=srv3", ""));
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| TubelinksError::HttpError(format!("Failed to fetch captions: {}", e)))?;

        check_status(&response, video_id)?;

        let transcript: Json3Transcript = response
            .json()
            .await
            .map_err(|e| TubelinksError::ParseError(format!("Invalid caption payload: {}", e)))?;

        Ok(to_segments(transcript))
    }
}

#[async_trait]
impl TranscriptFetcher for YouTubeFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str, lang: &str) -> Result<Vec<TranscriptSegment>> {
        let html = self.fetch_watch_page(video_id).await?;
        let api_key = extract_api_key(&html, video_id)?;

        let player = self.fetch_player(video_id, &api_key).await?;
        let track = select_track(video_id, lang, player)?;
        debug!(
            lang = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let segments = self.fetch_track(video_id, &track).await?;
        debug!(segments = segments.len(), "Fetched transcript");
        Ok(segments)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

fn check_status(response: &reqwest::Response, video_id: &str) -> Result<()> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        warn!(video_id, "Rate limited by upstream");
        return Err(TubelinksError::RequestBlocked(video_id.to_string()));
    }
    if !status.is_success() {
        return Err(TubelinksError::HttpError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )));
    }
    Ok(())
}

fn extract_api_key(html: &str, video_id: &str) -> Result<String> {
    if html.contains("g-recaptcha") {
        return Err(TubelinksError::RequestBlocked(video_id.to_string()));
    }

    INNERTUBE_API_KEY
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            TubelinksError::ParseError(format!("No Innertube API key on watch page for {}", video_id))
        })
}

fn assert_playable(video_id: &str, player: &PlayerResponse) -> Result<()> {
    let Some(status) = &player.playability_status else {
        return Ok(());
    };
    if status.status == "OK" {
        return Ok(());
    }

    let reason = status.reason.as_deref().unwrap_or("");
    match status.status.as_str() {
        "LOGIN_REQUIRED" if reason.contains("not a bot") => {
            Err(TubelinksError::RequestBlocked(video_id.to_string()))
        }
        "ERROR" if reason.contains("unavailable") => {
            Err(TubelinksError::VideoUnavailable(video_id.to_string()))
        }
        other => Err(TubelinksError::UpstreamError(format!(
            "Video {} is unplayable ({}): {}",
            video_id, other, reason
        ))),
    }
}

/// Picks the track in exactly `lang`, manual captions before generated ones.
fn select_track(video_id: &str, lang: &str, player: PlayerResponse) -> Result<CaptionTrack> {
    assert_playable(video_id, &player)?;

    let tracks = player
        .captions
        .and_then(|c| c.renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(TubelinksError::TranscriptsDisabled(video_id.to_string()));
    }

    let mut matching: Vec<CaptionTrack> = tracks
        .into_iter()
        .filter(|t| t.language_code == lang)
        .collect();
    matching.sort_by_key(CaptionTrack::is_generated);

    matching
        .into_iter()
        .next()
        .ok_or_else(|| TubelinksError::NoTranscriptFound {
            video_id: video_id.to_string(),
            lang: lang.to_string(),
        })
}

fn to_segments(transcript: Json3Transcript) -> Vec<TranscriptSegment> {
    transcript
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = html_escape::decode_html_entities(&raw)
                .replace('\n', " ")
                .trim()
                .to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start: event.t_start_ms.unwrap_or(0) as f64 / 1000.0,
                duration: event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
            })
        })
        .collect()
}
