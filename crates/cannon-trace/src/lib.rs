//! cannon-trace — a lazily-populated, disk-backed trace provider.
//!
//! For a trace index `i` the provider answers "what is the claim at `i`?" and
//! "what are the state/proof bytes behind it?", reading
//! `<data_dir>/proofs/<i>.json` and asking a [`ProofGenerator`] to produce it
//! on a miss. Generation happens at most once per call; every other failure
//! is surfaced as a distinct [`TraceError`].
//!
//! - `provider`: [`TraceProvider`] and the [`TraceSource`] capability trait.
//! - `generator`: the single-method [`ProofGenerator`] trait.
//! - `executor`: [`Executor`], a generator that runs the `cannon` binary.
//! - `config`: TOML-backed [`Config`] with command-line overrides.
//! - `error`: the failure taxonomy.
//!
//! ```no_run
//! use cannon_trace::{Config, TraceProvider};
//! let cfg = Config::load("cannon.toml")?;
//! cfg.validate()?;
//! let provider = TraceProvider::from_config(&cfg);
//! let claim = provider.get_claim(42)?;
//! println!("{claim}");
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// TOML configuration and command-line overrides.
pub mod config;
/// Typed lookup failures.
pub mod error;
/// `cannon`-binary-backed generator.
pub mod executor;
/// Generator trait.
pub mod generator;
/// Lookup, generate-on-miss, decode, validate.
pub mod provider;

pub use config::{Config, Overrides};
pub use error::{TraceError, TraceResult};
pub use executor::Executor;
pub use generator::ProofGenerator;
pub use provider::{TraceProvider, TraceSource};
