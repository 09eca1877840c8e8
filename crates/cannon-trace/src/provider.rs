//! Trace provider: claims and preimages per trace index, generated on demand.
//!
//! Lookup protocol for [`TraceProvider::get_claim`] and
//! [`TraceProvider::get_preimage`]:
//!
//! 1. open `<data_dir>/proofs/<i>.json`;
//! 2. if (and only if) it does not exist, run the generator once, then open
//!    again; the second open gets no further chances;
//! 3. read and decode the record;
//! 4. validate the fields the operation needs.
//!
//! Each step fails with its own [`TraceError`] variant. Nothing is cached in
//! memory and nothing is locked: two callers missing on the same index may
//! both run the generator.

use crate::config::Config;
use crate::error::{TraceError, TraceResult};
use crate::executor::Executor;
use crate::generator::ProofGenerator;
use cannon_core::io::{decode_proof_record, proof_path};
use cannon_core::{ClaimHash, ProofRecord, TraceIndex};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Read-side capability consumed by the dispute game.
pub trait TraceSource {
    /// Post-state commitment at `index`.
    fn get_claim(&self, index: TraceIndex) -> TraceResult<ClaimHash>;

    /// `(state_data, proof_data)` underlying the claim at `index`.
    fn get_preimage(&self, index: TraceIndex) -> TraceResult<(Vec<u8>, Vec<u8>)>;

    /// Machine state before the first step.
    fn absolute_pre_state(&self) -> TraceResult<Vec<u8>>;
}

/// Disk-backed provider over a data directory and a generator.
#[derive(Debug, Clone)]
pub struct TraceProvider<G> {
    dir: PathBuf,
    generator: G,
}

impl TraceProvider<Executor> {
    /// Provider backed by the `cannon` executor described by `cfg`.
    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.datadir.clone(), Executor::from_config(cfg))
    }
}

impl<G: ProofGenerator> TraceProvider<G> {
    /// Construct over `dir` with the given generator.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, generator: G) -> Self {
        Self {
            dir: dir.into(),
            generator,
        }
    }

    /// Root data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    /// Canonical record path for `index`.
    #[must_use]
    pub fn proof_path(&self, index: TraceIndex) -> PathBuf {
        proof_path(&self.dir, index)
    }

    /// Borrow the generator.
    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Post-state commitment at `index`; the zero hash is rejected.
    pub fn get_claim(&self, index: TraceIndex) -> TraceResult<ClaimHash> {
        let proof = self.load_proof(index)?;
        if !proof.has_claim() {
            return Err(TraceError::MissingClaim { index });
        }
        Ok(proof.claim_value)
    }

    /// `(state_data, proof_data)` at `index`; both must be non-empty.
    pub fn get_preimage(&self, index: TraceIndex) -> TraceResult<(Vec<u8>, Vec<u8>)> {
        let proof = self.load_proof(index)?;
        if proof.state_data.is_empty() {
            return Err(TraceError::MissingStateData { index });
        }
        if proof.proof_data.is_empty() {
            return Err(TraceError::MissingProofData { index });
        }
        Ok((proof.state_data, proof.proof_data))
    }

    /// Always [`TraceError::NotImplemented`].
    pub fn absolute_pre_state(&self) -> TraceResult<Vec<u8>> {
        Err(TraceError::NotImplemented("absolute prestate"))
    }

    /// Open (generating once on absence) and decode the record for `index`.
    pub fn load_proof(&self, index: TraceIndex) -> TraceResult<ProofRecord> {
        let path = self.proof_path(index);
        let mut file = self.open_or_generate(index, &path)?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(|source| {
            error!(index, path = %path.display(), %source, "cannot read proof record");
            TraceError::Io {
                index,
                path: path.clone(),
                source,
            }
        })?;

        let proof = decode_proof_record(buf.as_slice()).map_err(|source| {
            error!(index, path = %path.display(), %source, "malformed proof record");
            TraceError::Decode {
                index,
                path: path.clone(),
                source,
            }
        })?;
        debug!(index, path = %path.display(), "loaded proof record");
        Ok(proof)
    }

    fn open_or_generate(&self, index: TraceIndex, path: &Path) -> TraceResult<File> {
        match File::open(path) {
            Ok(f) => return Ok(f),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(TraceError::Io {
                    index,
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        info!(index, path = %path.display(), "proof missing, generating");
        if let Err(source) = self.generator.generate_proof(&self.dir, index) {
            warn!(index, error = %format!("{source:#}"), "proof generation failed");
            return Err(TraceError::Generation { index, source });
        }

        // The generator reported success, so the record has to be there now.
        File::open(path).map_err(|source| {
            error!(index, path = %path.display(), %source, "proof still unreadable after generation");
            TraceError::Io {
                index,
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

impl<G: ProofGenerator> TraceSource for TraceProvider<G> {
    fn get_claim(&self, index: TraceIndex) -> TraceResult<ClaimHash> {
        Self::get_claim(self, index)
    }

    fn get_preimage(&self, index: TraceIndex) -> TraceResult<(Vec<u8>, Vec<u8>)> {
        Self::get_preimage(self, index)
    }

    fn absolute_pre_state(&self) -> TraceResult<Vec<u8>> {
        Self::absolute_pre_state(self)
    }
}
