//! tubelinks CLI
//!
//! Runs the transcript service, or fetches a single transcript from the shell.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tubelinks_api::{ApiConfig, ApiServer, ServiceError, TranscriptService};
use tubelinks_cache::TranscriptCache;
use tubelinks_core::constants::{DEFAULT_LANG, DEFAULT_PORT};
use tubelinks_youtube::YouTubeFetcher;

/// tubelinks - cached YouTube transcripts with link extraction
#[derive(Parser)]
#[command(name = "tubelinks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT, env = "TUBELINKS_PORT")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0", env = "TUBELINKS_BIND")]
        bind: IpAddr,
        /// Cache TTL in seconds (overrides TUBELINKS_CACHE_TTL_SECONDS)
        #[arg(long)]
        ttl_seconds: Option<u64>,
        /// Per-request cleanup probability (overrides TUBELINKS_CLEANUP_PROBABILITY)
        #[arg(long)]
        cleanup_probability: Option<f64>,
    },

    /// Fetch one transcript and print it as JSON
    Fetch {
        /// Video id
        video_id: String,
        /// Language code
        #[arg(short, long, default_value = DEFAULT_LANG)]
        lang: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "tubelinks=debug,info"
    } else {
        "tubelinks=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    match cli.command {
        Commands::Serve {
            port,
            bind,
            ttl_seconds,
            cleanup_probability,
        } => cmd_serve(bind, port, ttl_seconds, cleanup_probability).await,
        Commands::Fetch { video_id, lang } => cmd_fetch(&video_id, &lang).await,
    }
}

/// Run the API server
async fn cmd_serve(
    bind: IpAddr,
    port: u16,
    ttl_seconds: Option<u64>,
    cleanup_probability: Option<f64>,
) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if let Some(ttl) = ttl_seconds {
        config.cache.ttl_seconds = ttl;
    }
    if let Some(p) = cleanup_probability {
        config.cache.cleanup_probability = p;
    }

    let addr = SocketAddr::new(bind, port);
    println!("{} http://{}", "Starting tubelinks server on".cyan().bold(), addr);
    println!(
        "   {} {}s, {} {}",
        "cache TTL:".dimmed(),
        config.cache.ttl_seconds,
        "cleanup probability:".dimmed(),
        config.cache.cleanup_probability
    );

    let server = ApiServer::new(config).context("Invalid server configuration")?;
    server.run(addr).await.context("Server failed")?;

    Ok(())
}

/// Fetch one transcript
async fn cmd_fetch(video_id: &str, lang: &str) -> Result<()> {
    let config = ApiConfig::from_env();
    config.cache.validate().context("Invalid cache configuration")?;
    let fetcher = YouTubeFetcher::with_config(config.youtube.clone())
        .context("Failed to build YouTube client")?;
    let cache = Arc::new(TranscriptCache::with_config(config.cache));
    let service = TranscriptService::new(cache, Arc::new(fetcher));

    info!(video_id, lang, "Fetching transcript");

    let response = service
        .get_transcript(video_id, lang)
        .await
        .map_err(|e| fetch_error(e, video_id, lang))?;

    println!("{}", serde_json::to_string_pretty(response.as_ref())?);
    eprintln!(
        "{} {} links",
        "Found".green().bold(),
        response.links.len()
    );
    Ok(())
}

fn fetch_error(err: ServiceError, video_id: &str, lang: &str) -> anyhow::Error {
    match err {
        ServiceError::NotFound => {
            anyhow::anyhow!("Transcript not available for {} in language {}", video_id, lang)
        }
        ServiceError::Upstream(detail) => anyhow::anyhow!("Failed to fetch transcript: {}", detail),
    }
}
