//! On-disk layout and JSON helpers for [`ProofRecord`]s.
//!
//! Layout under a data directory:
//!
//! ```text
//! <data_dir>/proofs/<index>.json      one record per trace index
//! <data_dir>/snapshots/<index>.json   emulator snapshots (generator-owned)
//! ```
//!
//! Reads take any `Read` so callers keep control over how (and how often) the
//! file is opened. Writes go through a temporary sibling and a rename so a
//! concurrent reader sees either no file or a complete one.

use crate::types::TraceIndex;
use crate::ProofRecord;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Directory (relative to the data dir) holding proof records.
pub const PROOFS_DIR: &str = "proofs";
/// Directory (relative to the data dir) holding emulator snapshots.
pub const SNAPSHOTS_DIR: &str = "snapshots";
/// Extension used for records and snapshots.
pub const RECORD_EXT: &str = "json";

/// Canonical record path: `{data_dir}/proofs/{index}.json`.
#[must_use]
pub fn proof_path(data_dir: &Path, index: TraceIndex) -> PathBuf {
    data_dir
        .join(PROOFS_DIR)
        .join(format!("{index}.{RECORD_EXT}"))
}

/// Directory holding proof records.
#[must_use]
pub fn proofs_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(PROOFS_DIR)
}

/// Directory holding emulator snapshots.
#[must_use]
pub fn snapshots_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOTS_DIR)
}

/// Decode a single JSON record from a reader.
///
/// The whole input must be one JSON value; anything but whitespace after it is
/// an error. Returns the raw `serde_json::Error` so callers can classify it.
pub fn decode_proof_record<R: Read>(rdr: R) -> serde_json::Result<ProofRecord> {
    serde_json::from_reader(BufReader::new(rdr))
}

/// Read a record from **JSON** at `path`.
pub fn read_proof_record_json<P: AsRef<Path>>(path: P) -> Result<ProofRecord> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    decode_proof_record(f).with_context(|| format!("deserialize proof record {}", display(path_ref)))
}

/// Write a record to **JSON** at `path`, atomically replacing any previous file.
pub fn write_proof_record_json<P: AsRef<Path>>(path: P, v: &ProofRecord) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;

    let tmp = tmp_sibling(path_ref);
    {
        let f = File::create(&tmp).with_context(|| format!("create {}", display(&tmp)))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer(&mut w, v).with_context(|| "serialize JSON proof record")?;
        w.flush().with_context(|| "flush JSON writer")?;
        w.get_ref()
            .sync_all()
            .with_context(|| format!("sync {}", display(&tmp)))?;
    }
    fs::rename(&tmp, path_ref)
        .with_context(|| format!("rename {} -> {}", display(&tmp), display(path_ref)))?;
    Ok(())
}

/// Write `v` at the canonical location for `index` under `data_dir`.
pub fn write_proof_record_at(data_dir: &Path, index: TraceIndex, v: &ProofRecord) -> Result<PathBuf> {
    let path = proof_path(data_dir, index);
    write_proof_record_json(&path, v)?;
    Ok(path)
}

/// Ensure the parent directory for a file exists (no-op if none).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", display(path)))?;
        }
    }
    Ok(())
}

/// `<dir>/.<name>.tmp-<pid>-<seq>`; hidden, unique per writer, never ending in `.json`.
fn tmp_sibling(path: &Path) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp-{}-{seq}", std::process::id()))
}

/// Human-friendly path display for error messages.
fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
