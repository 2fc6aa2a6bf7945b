//! Roost Daemon - Main entry point
//!
//! Polls for a locally attached test device and mirrors its presence
//! into a ZooKeeper tree that other systems read to find hosts with a
//! device available.

mod agent;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use roost_core::{Reconciler, RegistrationPath};
use roost_probe::AdbProbe;
use roost_zk::ZkStore;

#[derive(Parser, Debug)]
#[command(name = "roost")]
#[command(about = "Registers locally attached test devices in ZooKeeper")]
#[command(version)]
struct Args {
    /// Path to the XML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Roost v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config(&args.config)?;
    let hostname = resolve_hostname()?;
    let path = RegistrationPath::new(&config.project_name, &hostname)?;

    info!(
        hostname = %hostname,
        project = %config.project_name,
        "Registering device presence at {}",
        path.leaf()
    );

    let store = ZkStore::connect(&config.endpoints)
        .await
        .context("failed to connect to the ZooKeeper ensemble")?;

    let agent = agent::Agent::new(
        AdbProbe::new(),
        Reconciler::new(store, path),
        config.poll_interval,
    );
    agent.run().await.context("agent loop terminated")?;

    // Dropping the store on the way out closes the ZooKeeper session,
    // which also expires the ephemeral presence leaf.
    info!("Shut down cleanly");
    Ok(())
}

/// Local hostname, resolved once at startup.
fn resolve_hostname() -> Result<String> {
    let hostname = gethostname::gethostname()
        .into_string()
        .map_err(|raw| anyhow::anyhow!("hostname is not valid UTF-8: {:?}", raw))?;
    if hostname.is_empty() {
        anyhow::bail!("hostname resolved to an empty string");
    }
    Ok(hostname)
}
