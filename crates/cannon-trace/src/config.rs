//! Provider/executor configuration.
//!
//! Loaded from a small TOML file, then optionally overridden by command-line
//! flags:
//!
//! ```toml
//! datadir = "/var/lib/challenger/cannon"
//! cannon_bin = "/usr/local/bin/cannon"
//! absolute_prestate = "/var/lib/challenger/prestate.json"
//! snapshot_freq = 1000000000
//! server = "/usr/local/bin/op-program"
//! server_args = ["--server"]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default emulator binary (resolved through `PATH`).
pub const DEFAULT_CANNON_BIN: &str = "cannon";
/// Default snapshot cadence, in steps.
pub const DEFAULT_SNAPSHOT_FREQ: u64 = 1_000_000_000;

/// Settings for the trace provider and its emulator-backed generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the durable cache (`proofs/`, `snapshots/` live here).
    pub datadir: PathBuf,
    /// Emulator binary.
    #[serde(default = "default_cannon_bin")]
    pub cannon_bin: PathBuf,
    /// Initial machine state fed to the emulator when no snapshot applies.
    pub absolute_prestate: PathBuf,
    /// Emit an emulator snapshot every this many steps.
    #[serde(default = "default_snapshot_freq")]
    pub snapshot_freq: u64,
    /// Optional preimage server run by the emulator.
    #[serde(default)]
    pub server: Option<PathBuf>,
    /// Arguments passed to `server`.
    #[serde(default)]
    pub server_args: Vec<String>,
}

fn default_cannon_bin() -> PathBuf {
    PathBuf::from(DEFAULT_CANNON_BIN)
}

const fn default_snapshot_freq() -> u64 {
    DEFAULT_SNAPSHOT_FREQ
}

/// Command-line overrides; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `datadir`.
    pub datadir: Option<PathBuf>,
    /// Replaces `cannon_bin`.
    pub cannon_bin: Option<PathBuf>,
    /// Replaces `absolute_prestate`.
    pub absolute_prestate: Option<PathBuf>,
    /// Replaces `snapshot_freq`.
    pub snapshot_freq: Option<u64>,
}

impl Config {
    /// Minimal config with defaults for everything optional.
    #[must_use]
    pub fn new(datadir: impl Into<PathBuf>, absolute_prestate: impl Into<PathBuf>) -> Self {
        Self {
            datadir: datadir.into(),
            cannon_bin: default_cannon_bin(),
            absolute_prestate: absolute_prestate.into(),
            snapshot_freq: DEFAULT_SNAPSHOT_FREQ,
            server: None,
            server_args: Vec::new(),
        }
    }

    /// Parse from TOML text.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("parse config toml")
    }

    /// Read and parse a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("load config {}", path.display()))
    }

    /// Apply command-line overrides in place.
    pub fn apply_overrides(&mut self, o: Overrides) {
        if let Some(d) = o.datadir {
            self.datadir = d;
        }
        if let Some(b) = o.cannon_bin {
            self.cannon_bin = b;
        }
        if let Some(p) = o.absolute_prestate {
            self.absolute_prestate = p;
        }
        if let Some(f) = o.snapshot_freq {
            self.snapshot_freq = f;
        }
    }

    /// Reject settings the executor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.datadir.as_os_str().is_empty() {
            bail!("datadir must be set");
        }
        if self.cannon_bin.as_os_str().is_empty() {
            bail!("cannon_bin must be set");
        }
        if self.absolute_prestate.as_os_str().is_empty() {
            bail!("absolute_prestate must be set");
        }
        if self.snapshot_freq == 0 {
            bail!("snapshot_freq must be > 0");
        }
        Ok(())
    }
}
