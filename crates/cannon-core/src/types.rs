//! Canonical core types shared across the workspace.
//!
//! - [`TraceIndex`]: zero-based step position inside an execution trace.
//! - [`ClaimHash`]: the 32-byte post-state commitment produced for a step.
//!
//! The all-zero [`ClaimHash`] is reserved as the "no claim" sentinel; it is
//! representable (so it can be decoded and reported) but never a valid claim.

use anyhow::{anyhow, bail, Result};
use std::fmt;
use std::str::FromStr;

/// Zero-based position of a step within an execution trace.
pub type TraceIndex = u64;

/// Length in bytes of a [`ClaimHash`].
pub const CLAIM_HASH_LEN: usize = 32;

/// Fixed-size post-state commitment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClaimHash(pub [u8; CLAIM_HASH_LEN]);

impl ClaimHash {
    /// The all-zero hash (missing/uninitialized sentinel).
    pub const ZERO: Self = Self([0u8; CLAIM_HASH_LEN]);

    /// Wrap raw bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; CLAIM_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Whether this is the zero sentinel.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; CLAIM_HASH_LEN]
    }

    /// Borrow the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CLAIM_HASH_LEN] {
        &self.0
    }

    /// Consume into raw bytes.
    #[inline]
    #[must_use]
    pub const fn into_bytes(self) -> [u8; CLAIM_HASH_LEN] {
        self.0
    }
}

impl From<[u8; CLAIM_HASH_LEN]> for ClaimHash {
    #[inline]
    fn from(bytes: [u8; CLAIM_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ClaimHash {
    type Error = anyhow::Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; CLAIM_HASH_LEN] = bytes.try_into().map_err(|_| {
            anyhow!(
                "claim hash must be {CLAIM_HASH_LEN} bytes, got {}",
                bytes.len()
            )
        })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for ClaimHash {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for ClaimHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for ClaimHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl fmt::Debug for ClaimHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimHash({self:#x})")
    }
}

impl FromStr for ClaimHash {
    type Err = anyhow::Error;

    /// Parse `0x`-prefixed (or bare) hex of exactly 32 bytes.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != CLAIM_HASH_LEN * 2 {
            bail!(
                "claim hash must be {} hex digits, got {}",
                CLAIM_HASH_LEN * 2,
                digits.len()
            );
        }
        let mut out = [0u8; CLAIM_HASH_LEN];
        hex::decode_to_slice(digits, &mut out).map_err(|e| anyhow!("invalid claim hash: {e}"))?;
        Ok(Self(out))
    }
}
