//! Emulator-backed [`ProofGenerator`]: runs the external `cannon` binary.
//!
//! One invocation replays from the best available starting state up to
//! `proof_at + 1`, asking the emulator to dump the proof for `proof_at` into
//! `proofs/%d.json` and periodic snapshots into `snapshots/%d.json`. Later
//! misses resume from the newest snapshot at or below their index instead of
//! replaying from the absolute prestate.

use crate::config::Config;
use crate::generator::ProofGenerator;
use anyhow::{bail, Context, Result};
use cannon_core::io::{proofs_dir, snapshots_dir, RECORD_EXT};
use cannon_core::TraceIndex;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info, warn};

/// Final emulator state written after each run.
const FINAL_STATE_FILE: &str = "final.json";

/// Generator that shells out to `cannon run`.
#[derive(Debug, Clone)]
pub struct Executor {
    cannon_bin: PathBuf,
    absolute_prestate: PathBuf,
    snapshot_freq: u64,
    server: Option<PathBuf>,
    server_args: Vec<String>,
}

impl Executor {
    /// Build from configuration.
    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            cannon_bin: cfg.cannon_bin.clone(),
            absolute_prestate: cfg.absolute_prestate.clone(),
            snapshot_freq: cfg.snapshot_freq,
            server: cfg.server.clone(),
            server_args: cfg.server_args.clone(),
        }
    }

    /// Emulator binary this executor runs.
    #[must_use]
    pub fn cannon_bin(&self) -> &Path {
        &self.cannon_bin
    }

    /// Argument vector for `cannon` generating `proof_at` from `start`.
    #[must_use]
    pub fn args(&self, data_dir: &Path, start: &Path, proof_at: TraceIndex) -> Vec<OsString> {
        let proof_fmt = proofs_dir(data_dir).join(format!("%d.{RECORD_EXT}"));
        let snapshot_fmt = snapshots_dir(data_dir).join(format!("%d.{RECORD_EXT}"));

        let mut args: Vec<OsString> = vec![
            "run".into(),
            "--input".into(),
            start.into(),
            "--output".into(),
            data_dir.join(FINAL_STATE_FILE).into(),
            "--meta".into(),
            "".into(),
            "--proof-at".into(),
            format!("={proof_at}").into(),
            "--stop-at".into(),
            format!("={}", proof_at.saturating_add(1)).into(),
            "--proof-fmt".into(),
            proof_fmt.into(),
            "--snapshot-at".into(),
            format!("%{}", self.snapshot_freq).into(),
            "--snapshot-fmt".into(),
            snapshot_fmt.into(),
        ];

        if let Some(server) = &self.server {
            args.push("--".into());
            args.push(server.into());
            args.extend(self.server_args.iter().map(OsString::from));
        }
        args
    }

    fn log_output(proof_at: TraceIndex, out: &Output) {
        for line in String::from_utf8_lossy(&out.stdout).lines() {
            debug!(index = proof_at, "cannon: {line}");
        }
        let failed = !out.status.success();
        for line in String::from_utf8_lossy(&out.stderr).lines() {
            if failed {
                warn!(index = proof_at, "cannon: {line}");
            } else {
                debug!(index = proof_at, "cannon: {line}");
            }
        }
    }
}

impl ProofGenerator for Executor {
    fn generate_proof(&self, data_dir: &Path, proof_at: TraceIndex) -> Result<()> {
        let proofs = proofs_dir(data_dir);
        let snapshots = snapshots_dir(data_dir);
        fs::create_dir_all(&proofs)
            .with_context(|| format!("create proofs dir {}", proofs.display()))?;
        fs::create_dir_all(&snapshots)
            .with_context(|| format!("create snapshots dir {}", snapshots.display()))?;

        let start = find_starting_snapshot(&snapshots, &self.absolute_prestate, proof_at)?;
        let args = self.args(data_dir, &start, proof_at);

        info!(
            index = proof_at,
            start = %start.display(),
            bin = %self.cannon_bin.display(),
            "generating proof"
        );
        let out = Command::new(&self.cannon_bin)
            .args(&args)
            .output()
            .with_context(|| format!("spawn {}", self.cannon_bin.display()))?;
        Self::log_output(proof_at, &out);

        if !out.status.success() {
            bail!(
                "{} exited with {} while generating proof at {proof_at}",
                self.cannon_bin.display(),
                out.status
            );
        }
        debug!(index = proof_at, "proof generation finished");
        Ok(())
    }
}

/// Newest snapshot `<n>.json` in `snapshot_dir` with `n <= proof_at`, else the prestate.
///
/// A missing directory means no snapshots; unrelated files are skipped.
pub fn find_starting_snapshot(
    snapshot_dir: &Path,
    absolute_prestate: &Path,
    proof_at: TraceIndex,
) -> Result<PathBuf> {
    let entries = match fs::read_dir(snapshot_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(absolute_prestate.to_path_buf()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("list snapshots in {}", snapshot_dir.display()))
        }
    };

    let mut best: Option<(TraceIndex, PathBuf)> = None;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("list snapshots in {}", snapshot_dir.display()))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
            continue;
        }
        let Some(n) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<TraceIndex>().ok())
        else {
            continue;
        };
        if n <= proof_at && best.as_ref().map_or(true, |(b, _)| n > *b) {
            best = Some((n, path));
        }
    }

    Ok(best.map_or_else(|| absolute_prestate.to_path_buf(), |(_, p)| p))
}
