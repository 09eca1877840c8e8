// crates/cannon-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use anyhow::{Context, Result};
use cannon_core::{record::hex_bytes, TraceIndex};
use cannon_trace::{Config, Overrides, TraceProvider, TraceSource};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "cannon-cli",
    about = "Cannon trace cache CLI",
    long_about = "Cannon trace cache CLI.\n\nServe claims and preimages for trace indices from a cannon data directory, running the cannon emulator on a cache miss.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// TOML config file (datadir, cannon_bin, absolute_prestate, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding `proofs/` and `snapshots/` (overrides config)
    #[arg(long, global = true)]
    datadir: Option<PathBuf>,

    /// Path to the cannon binary (overrides config)
    #[arg(long, global = true)]
    cannon_bin: Option<PathBuf>,

    /// Absolute prestate file fed to cannon (overrides config)
    #[arg(long, global = true)]
    prestate: Option<PathBuf>,

    /// Snapshot cadence in steps (overrides config)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    snapshot_freq: Option<u64>,

    /// Print machine-readable JSON instead of plain text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the post-state claim hash at a trace index.
    Claim {
        /// Zero-based trace index
        #[arg(long)]
        index: TraceIndex,
    },

    /// Print the state and proof bytes behind the claim at a trace index.
    Preimage {
        /// Zero-based trace index
        #[arg(long)]
        index: TraceIndex,
    },

    /// Print the absolute prestate (currently unsupported).
    Prestate,
}

#[derive(Serialize)]
struct ClaimOut {
    index: TraceIndex,
    claim: String,
}

#[derive(Serialize)]
struct PreimageOut {
    index: TraceIndex,
    #[serde(rename = "state-data")]
    state_data: String,
    #[serde(rename = "proof-data")]
    proof_data: String,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;
    info!(datadir = %cfg.datadir.display(), bin = %cfg.cannon_bin.display(), "using cannon data directory");

    let provider = TraceProvider::from_config(&cfg);
    run(&provider, &cli.cmd, cli.json)
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Config file (if any) with command-line overrides applied, then validated.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(
            cli.datadir.clone().unwrap_or_default(),
            cli.prestate.clone().unwrap_or_default(),
        ),
    };
    cfg.apply_overrides(Overrides {
        datadir: cli.datadir.clone(),
        cannon_bin: cli.cannon_bin.clone(),
        absolute_prestate: cli.prestate.clone(),
        snapshot_freq: cli.snapshot_freq,
    });
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

fn run(source: &dyn TraceSource, cmd: &Cmd, json: bool) -> Result<()> {
    match *cmd {
        Cmd::Claim { index } => {
            let claim = source
                .get_claim(index)
                .with_context(|| format!("claim at trace index {index}"))?;
            if json {
                let out = ClaimOut {
                    index,
                    claim: claim.to_string(),
                };
                println!("{}", serde_json::to_string(&out)?);
            } else {
                println!("{claim}");
            }
        }

        Cmd::Preimage { index } => {
            let (state, proof) = source
                .get_preimage(index)
                .with_context(|| format!("preimage at trace index {index}"))?;
            let out = PreimageOut {
                index,
                state_data: hex_bytes::encode(&state),
                proof_data: hex_bytes::encode(&proof),
            };
            if json {
                println!("{}", serde_json::to_string(&out)?);
            } else {
                println!("state-data: {}", out.state_data);
                println!("proof-data: {}", out.proof_data);
            }
        }

        Cmd::Prestate => {
            let pre = source.absolute_pre_state().context("absolute prestate")?;
            println!("{}", hex_bytes::encode(&pre));
        }
    }
    Ok(())
}
