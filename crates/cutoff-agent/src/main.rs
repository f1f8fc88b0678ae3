//! Ranked LP cutoff tracker
//!
//! Polls the Challenger, Grandmaster and Master ladders of every configured
//! platform and publishes the LP needed for Challenger and Grandmaster.
//!
//! # Usage
//!
//! ```bash
//! # Poll every minute with the built-in region table
//! RIOT_API_KEY=RGAPI-... cutoff-agent
//!
//! # Single run with a custom table and output root
//! RIOT_API_KEY=RGAPI-... cutoff-agent --once --config ./cutoffs.toml --output-dir ./cdn
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cutoff_agent::config::{self, TrackerConfig};
use cutoff_agent::{RiotClient, Tracker};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Region tier-size table (overrides CUTOFF_CONFIG and the built-in table)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root directory for published snapshots (overrides CUTOFF_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seconds between ticks (overrides CUTOFF_INTERVAL_SECS)
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Per-request timeout in seconds (overrides CUTOFF_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Run a single tick and exit
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let credential = config::credential_from_env()?;
    let mut tracker_config = TrackerConfig::from_env_with(args.config.as_deref())?;
    if let Some(dir) = args.output_dir {
        tracker_config.output_dir = dir;
    }
    if let Some(secs) = args.interval_secs {
        tracker_config.interval = Duration::from_secs(secs);
    }
    if let Some(secs) = args.timeout_secs {
        tracker_config.request_timeout = Duration::from_secs(secs);
    }

    let client = match &tracker_config.api_gateway {
        Some(base) => RiotClient::with_gateway(base, tracker_config.request_timeout),
        None => RiotClient::new(&tracker_config.api_host, tracker_config.request_timeout),
    }
    .context("Failed to build ranked API client")?;

    info!(
        regions = ?tracker_config.regions.keys().collect::<Vec<_>>(),
        api_host = %tracker_config.api_host,
        gateway = ?tracker_config.api_gateway,
        "cutoff agent starting"
    );

    let mut tracker = Tracker::new(Arc::new(client), tracker_config, credential)?;

    if args.once {
        let summary = tracker.tick().await;
        if !summary.failed.is_empty() {
            warn!(failed = ?summary.failed, "some regions were not published");
        }
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping after the current tick");
                shutdown.cancel();
            }
            Err(e) => warn!("Ctrl-C handler unavailable: {e}"),
        }
    });

    tracker.run(cancel).await;
    Ok(())
}
