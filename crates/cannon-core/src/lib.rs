//! cannon-core — proof record schema, claim hash type, and record I/O.
//!
//! This crate defines the **stable boundary** between the proof generator and
//! everything that reads its output:
//! - canonical types ([`TraceIndex`], [`ClaimHash`]),
//! - the persisted per-index witness ([`ProofRecord`]) and its hex wire codec,
//! - the on-disk layout (`<data_dir>/proofs/<index>.json`) and JSON helpers.
//!
//! ```no_run
//! use cannon_core::{io::proof_path, io::read_proof_record_json};
//! # use std::path::Path;
//! let rec = read_proof_record_json(proof_path(Path::new("/data"), 5))?;
//! println!("claim at 5: {}", rec.claim_value);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// On-disk layout and JSON read/write helpers.
pub mod io;
/// Persisted proof record and its hex codec.
pub mod record;
/// Canonical core data types.
pub mod types;

pub use record::*;
pub use types::*;

