//! Failure taxonomy for trace lookups.
//!
//! Each lookup phase has its own variant so callers can tell "never
//! generated" from "generator ran but left nothing usable" from "generator
//! itself failed". Only first-attempt absence is self-healing; everything
//! here is terminal for the call that produced it.

use cannon_core::TraceIndex;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for provider operations.
pub type TraceResult<T> = std::result::Result<T, TraceError>;

/// Classified failure of a provider operation.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The generator returned an error while producing the record.
    #[error("generate cannon trace with proof at {index}")]
    Generation {
        /// Trace index being generated.
        index: TraceIndex,
        /// Opaque generator failure.
        #[source]
        source: anyhow::Error,
    },

    /// The record could not be opened or read.
    ///
    /// Covers any open failure other than first-attempt absence, and every
    /// failure after a generation that reported success.
    #[error("cannot open proof file ({}) for index {index}", .path.display())]
    Io {
        /// Trace index being read.
        index: TraceIndex,
        /// Canonical record path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The record exists but does not match the schema.
    #[error("failed to read proof ({}) for index {index}", .path.display())]
    Decode {
        /// Trace index being read.
        index: TraceIndex,
        /// Canonical record path.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The record's `post` hash is the zero sentinel.
    #[error("proof at index {index} missing post hash")]
    MissingClaim {
        /// Trace index being read.
        index: TraceIndex,
    },

    /// The record's `state-data` is empty.
    #[error("proof at index {index} missing state data")]
    MissingStateData {
        /// Trace index being read.
        index: TraceIndex,
    },

    /// The record's `proof-data` is empty.
    #[error("proof at index {index} missing proof data")]
    MissingProofData {
        /// Trace index being read.
        index: TraceIndex,
    },

    /// The operation is declared but unsupported.
    #[error("{0} not yet supported")]
    NotImplemented(&'static str),
}

impl TraceError {
    /// Trace index the failure refers to, if any.
    #[must_use]
    pub const fn index(&self) -> Option<TraceIndex> {
        match self {
            Self::Generation { index, .. }
            | Self::Io { index, .. }
            | Self::Decode { index, .. }
            | Self::MissingClaim { index }
            | Self::MissingStateData { index }
            | Self::MissingProofData { index } => Some(*index),
            Self::NotImplemented(_) => None,
        }
    }

    /// Whether the generator itself failed.
    #[must_use]
    pub const fn is_generation(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }

    /// Whether the record decoded but a required field was zero/empty.
    #[must_use]
    pub const fn is_missing_field(&self) -> bool {
        matches!(
            self,
            Self::MissingClaim { .. } | Self::MissingStateData { .. } | Self::MissingProofData { .. }
        )
    }
}
