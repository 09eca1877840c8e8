//! Proof generator abstraction.
//!
//! A generator has exactly one job: make sure the record for `proof_at`
//! exists under `data_dir` (typically it produces every record up to it as a
//! side effect). The provider treats any error as opaque and terminal.
//!
//! ## Contracts implementors should uphold
//! - On `Ok(())`, `<data_dir>/proofs/<proof_at>.json` exists and is complete.
//! - Output is deterministic, so repeating a generation is harmless.
//! - Records appear atomically (write-then-rename); the provider does not
//!   serialize concurrent callers missing on the same index.

use anyhow::Result;
use cannon_core::TraceIndex;
use std::path::Path;
use std::sync::Arc;

/// Single-capability generator: "ensure proof artifacts exist up to `proof_at`".
pub trait ProofGenerator {
    /// Produce the proof record for `proof_at` under `data_dir`.
    ///
    /// # Errors
    /// Any failure to produce the record; the provider attaches it as the
    /// cause of a generation error and does not inspect it further.
    fn generate_proof(&self, data_dir: &Path, proof_at: TraceIndex) -> Result<()>;
}

impl<G: ProofGenerator + ?Sized> ProofGenerator for &G {
    #[inline]
    fn generate_proof(&self, data_dir: &Path, proof_at: TraceIndex) -> Result<()> {
        (**self).generate_proof(data_dir, proof_at)
    }
}

impl<G: ProofGenerator + ?Sized> ProofGenerator for Box<G> {
    #[inline]
    fn generate_proof(&self, data_dir: &Path, proof_at: TraceIndex) -> Result<()> {
        (**self).generate_proof(data_dir, proof_at)
    }
}

impl<G: ProofGenerator + ?Sized> ProofGenerator for Arc<G> {
    #[inline]
    fn generate_proof(&self, data_dir: &Path, proof_at: TraceIndex) -> Result<()> {
        (**self).generate_proof(data_dir, proof_at)
    }
}
