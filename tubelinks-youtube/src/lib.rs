//! # tubelinks YouTube
//!
//! [`TranscriptFetcher`](tubelinks_core::TranscriptFetcher) backed by
//! YouTube's public web endpoints.
//!
//! The flow is: watch page (for the Innertube API key), Innertube player
//! call (for the caption track list), then the chosen track in `json3`
//! format.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;
mod models;

pub use client::YouTubeFetcher;
pub use config::YouTubeConfig;
