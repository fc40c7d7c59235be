//! # tubelinks API Server
//!
//! HTTP front for the transcript service.
//!
//! ## Endpoints
//!
//! - `GET /transcript?video_id=..&lang=..` - Transcript text plus extracted links
//! - `GET /cache/stats` - Cache occupancy
//! - `GET /health` - Liveness
//!
//! ## Example
//!
//! ```rust,ignore
//! use tubelinks_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 8001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod service;
mod state;

pub use dto::{HealthResponse, TranscriptQuery};
pub use error::ApiError;
pub use routes::create_router;
pub use service::{ServiceError, TranscriptService};
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use tubelinks_core::error::Result;
use tubelinks_core::traits::TranscriptFetcher;

/// API server for tubelinks.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server that fetches from YouTube.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates a server backed by the given fetcher.
    pub fn with_fetcher(config: ApiConfig, fetcher: Arc<dyn TranscriptFetcher>) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::with_fetcher(config, fetcher)?),
        })
    }

    /// Returns the shared application state.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Creates the router with all routes configured.
    ///
    /// CORS is wide open: any origin, method and header, with credentials.
    /// A literal `*` cannot be combined with credentials, so the request's
    /// own values are echoed back instead.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            ttl_seconds = self.state.config.cache.ttl_seconds,
            cleanup_probability = self.state.config.cache.cleanup_probability,
            "tubelinks API server listening on {}",
            addr
        );

        axum::serve(listener, self.router()).await
    }
}

