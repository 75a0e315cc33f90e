//! chain-switch: blockchain JSON-RPC backend failover switch.
//!
//! Monitors the configured upstream nodes on a fixed cadence and keeps a
//! per-protocol "active backend" pointer that routing consumers read via
//! [`BackendSwitch::backend_for`]. The request-forwarding path itself lives
//! outside this binary; this process owns health checking and failover.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use chain_switch::config::loader::load_config;
use chain_switch::failover::registry::Backend;
use chain_switch::failover::switch::BackendSwitch;
use chain_switch::health::probe::ProbeSet;
use chain_switch::lifecycle::service::Service;
use chain_switch::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "chain-switch", about = "Blockchain JSON-RPC backend failover switch")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "chain-switch.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability.log_level);

    tracing::info!(
        config = %cli.config.display(),
        backends = config.backends.len(),
        interval_secs = config.health_check.interval_secs,
        "configuration loaded"
    );

    let backends: Vec<Backend> = config
        .backends
        .iter()
        .filter_map(Backend::from_config)
        .collect();

    let probes = ProbeSet::with_defaults(Duration::from_secs(config.health_check.timeout_secs));
    let switch = BackendSwitch::new(
        &backends,
        probes,
        Duration::from_secs(config.health_check.interval_secs),
    );

    switch.start().await?;
    tracing::info!("backend switch running, press ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    switch.stop().await?;

    Ok(())
}
