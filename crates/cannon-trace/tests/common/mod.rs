//! Shared fixtures: a recording generator double and record helpers.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use cannon_core::io::{proof_path, write_proof_record_at};
use cannon_core::{ClaimHash, ProofRecord, TraceIndex};
use cannon_trace::ProofGenerator;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What the double does when asked to generate.
#[derive(Clone, Debug)]
pub enum Behavior {
    /// Write this record at the requested index and succeed.
    Write(ProofRecord),
    /// Write these raw bytes at the requested index and succeed.
    WriteRaw(Vec<u8>),
    /// Report success without writing anything.
    Nothing,
    /// Fail with this message.
    Fail(&'static str),
}

/// Generator double that records every invocation.
#[derive(Debug)]
pub struct RecordingGenerator {
    behavior: Behavior,
    calls: Mutex<Vec<(PathBuf, TraceIndex)>>,
}

impl RecordingGenerator {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, TraceIndex)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ProofGenerator for RecordingGenerator {
    fn generate_proof(&self, data_dir: &Path, proof_at: TraceIndex) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((data_dir.to_path_buf(), proof_at));
        match &self.behavior {
            Behavior::Write(rec) => {
                write_proof_record_at(data_dir, proof_at, rec)?;
                Ok(())
            }
            Behavior::WriteRaw(bytes) => {
                write_raw(data_dir, proof_at, bytes);
                Ok(())
            }
            Behavior::Nothing => Ok(()),
            Behavior::Fail(msg) => Err(anyhow!(*msg)),
        }
    }
}

/// `{"post":"0x" + "aa"*32, "state-data":"0x01", "proof-data":"0x02"}`.
pub fn reference_record() -> ProofRecord {
    ProofRecord::new(ClaimHash::new([0xaa; 32]), vec![0x01], vec![0x02])
}

/// Place raw bytes at the canonical record path for `index`.
pub fn write_raw(data_dir: &Path, index: TraceIndex, bytes: &[u8]) {
    let path = proof_path(data_dir, index);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}
