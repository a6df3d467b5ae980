//! Allocation health watcher (v1)
//!
//! Watches the aggregate health of one allocation and prints every published
//! event as a JSON line on stdout.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────────────────────────────┐
//!                 │               ALLOCATION HEALTH WATCH              │
//!                 │                                                    │
//!   node id ──────┼─▶ resolver ──▶ node-info API (once, cached)        │
//!                 │                                                    │
//!   cursor ───────┼─▶ blocking health query ──▶ health directory       │
//!                 │          │                                         │
//!                 │          ▼                                         │
//!                 │   correlate ──▶ aggregate ──▶ emission policy      │
//!                 │                                     │              │
//!   stdout ◀──────┼─────────────── Response ◀───────────┘              │
//!                 │                                                    │
//!                 │  config · logging · metrics · backoff · signals    │
//!                 └────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use alloc_health_watch::config::{load_config, load_default};
use alloc_health_watch::directory::{ConsulClient, NomadClient};
use alloc_health_watch::lifecycle::{run_watch, Shutdown};
use alloc_health_watch::observability::{logging, metrics};
use alloc_health_watch::protocol::{Action, Response};
use alloc_health_watch::AllocationHealthWatcher;

#[derive(Parser)]
#[command(name = "alloc-health-watch")]
#[command(about = "Watch the aggregate health of a single allocation", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allocation identifier.
    #[arg(short, long)]
    alloc: String,

    /// Identifier of the node running the allocation.
    #[arg(short, long)]
    node: String,

    /// Exit after the first published snapshot.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };

    logging::init_logging(&config.observability);
    tracing::info!("alloc-health-watch v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        nomad = %config.nomad.address,
        consul = %config.consul.address,
        wait_secs = config.consul.wait_secs,
        emission = config.watch.emission.as_str(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let nodes = NomadClient::new(&config.nomad)?;
    let health = ConsulClient::new(&config.consul)?;
    let action = Action::watch(&cli.alloc, &cli.node);
    let watcher = AllocationHealthWatcher::from_action(&action, nodes, health, &config.watch)?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signals();

    let stdout = std::io::stdout();
    let print_event = |response: &Response| {
        let mut out = stdout.lock();
        match serde_json::to_string(response) {
            Ok(line) => {
                if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                    tracing::error!(error = %e, "Failed to write event");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode event"),
        }
    };
    let summary = run_watch(
        watcher,
        &config.retry,
        shutdown.subscribe(),
        cli.once,
        print_event,
    )
    .await;

    tracing::info!(emitted = summary.emitted, errors = summary.errors, "Shutdown complete");
    Ok(())
}
