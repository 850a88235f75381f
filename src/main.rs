use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gsr::api::{AppState, create_router};
use gsr::config::Config;
use gsr::searcher::Searcher;
use tracing_subscriber::EnvFilter;

/// Paginated web front end for the Google Custom Search API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the JSON config file
    config: PathBuf,

    /// Listen on this port instead of the configured one
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let searcher = Searcher::new(&config.api_key, &config.engine_id, config.timeout()?)?;
    let app = create_router(Arc::new(AppState::new(searcher)), &config.public_dir);

    let addr = SocketAddr::new(config.listen_addr, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Starting server at {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
