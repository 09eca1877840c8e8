//! Proof record schema shared with the proof generator.
//!
//! One [`ProofRecord`] is persisted per trace index as a JSON object:
//!
//! ```json
//! { "post": "0x…", "state-data": "0x…", "proof-data": "0x…" }
//! ```
//!
//! All three fields are `0x`-prefixed hex strings. The field names and the hex
//! encoding are the wire contract with the generator; changing either is a
//! breaking change.
//!
//! ## Compatibility
//! - Unknown extra fields are ignored, so newer generators stay readable.
//! - A missing field decodes as empty, and `"post": "0x"` as the zero hash. Both
//!   are reported later as missing fields, not as a malformed record.
//! - A non-empty `post` must decode to exactly 32 bytes.

use crate::types::ClaimHash;
use serde::{Deserialize, Serialize};

/// Per-index witness persisted by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Post-state commitment after executing the step.
    #[serde(rename = "post", with = "hex_claim", default)]
    pub claim_value: ClaimHash,
    /// Serialized machine state context.
    #[serde(rename = "state-data", with = "hex_bytes", default)]
    pub state_data: Vec<u8>,
    /// Membership/transition proof bytes.
    #[serde(rename = "proof-data", with = "hex_bytes", default)]
    pub proof_data: Vec<u8>,
}

impl ProofRecord {
    /// Construct a new [`ProofRecord`].
    #[inline]
    #[must_use]
    pub fn new(claim_value: ClaimHash, state_data: Vec<u8>, proof_data: Vec<u8>) -> Self {
        Self {
            claim_value,
            state_data,
            proof_data,
        }
    }

    /// Whether the record carries a usable claim (non-zero `post`).
    #[inline]
    #[must_use]
    pub fn has_claim(&self) -> bool {
        !self.claim_value.is_zero()
    }
}

/// Hex text helpers with the generator's rules: `0x` prefix required,
/// `"0x"` is the empty byte string, digits must come in pairs.
pub mod hex_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Encode as lowercase `0x`-prefixed hex.
    #[must_use]
    pub fn encode(bytes: &[u8]) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    /// Decode `0x`-prefixed hex.
    pub fn decode(s: &str) -> Result<Vec<u8>, String> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| format!("hex string without 0x prefix: {s:?}"))?;
        if digits.len() % 2 != 0 {
            return Err(format!("hex string of odd length: {s:?}"));
        }
        hex::decode(digits).map_err(|e| format!("invalid hex string {s:?}: {e}"))
    }

    /// Serde `serialize_with` hook.
    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(bytes))
    }

    /// Serde `deserialize_with` hook.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode(&s).map_err(D::Error::custom)
    }
}

/// Hex codec for the 32-byte `post` field; `"0x"` is the zero hash.
mod hex_claim {
    use super::hex_bytes;
    use crate::types::ClaimHash;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &ClaimHash, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex_bytes::encode(value.as_bytes()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ClaimHash, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex_bytes::decode(&s).map_err(D::Error::custom)?;
        if bytes.is_empty() {
            return Ok(ClaimHash::ZERO);
        }
        ClaimHash::try_from(bytes.as_slice()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aa_post() -> String {
        format!("0x{}", "aa".repeat(32))
    }

    #[test]
    fn decodes_wire_field_names() {
        let raw = json!({
            "post": aa_post(),
            "state-data": "0x01",
            "proof-data": "0x02",
        });
        let rec: ProofRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.claim_value, ClaimHash::new([0xaa; 32]));
        assert_eq!(rec.state_data, vec![0x01]);
        assert_eq!(rec.proof_data, vec![0x02]);
        assert!(rec.has_claim());
    }

    #[test]
    fn encodes_wire_field_names() {
        let rec = ProofRecord::new(ClaimHash::new([0xaa; 32]), vec![1, 2], vec![]);
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["post"], json!(aa_post()));
        assert_eq!(v["state-data"], json!("0x0102"));
        assert_eq!(v["proof-data"], json!("0x"));
    }

    #[test]
    fn zero_post_decodes_but_has_no_claim() {
        let raw = json!({
            "post": format!("0x{}", "00".repeat(32)),
            "state-data": "0x01",
            "proof-data": "0x02",
        });
        let rec: ProofRecord = serde_json::from_value(raw).unwrap();
        assert!(!rec.has_claim());
    }

    #[test]
    fn empty_hex_is_empty_bytes() {
        let raw = json!({ "post": aa_post(), "state-data": "0x", "proof-data": "0x" });
        let rec: ProofRecord = serde_json::from_value(raw).unwrap();
        assert!(rec.state_data.is_empty());
        assert!(rec.proof_data.is_empty());
    }

    #[test]
    fn empty_post_is_zero_claim() {
        let raw = json!({ "post": "0x", "state-data": "0x01", "proof-data": "0x02" });
        let rec: ProofRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.claim_value, ClaimHash::ZERO);
        assert!(!rec.has_claim());
    }

    #[test]
    fn absent_fields_decode_as_empty() {
        let rec: ProofRecord = serde_json::from_value(json!({ "post": aa_post() })).unwrap();
        assert!(rec.has_claim());
        assert!(rec.state_data.is_empty());
        assert!(rec.proof_data.is_empty());

        let rec: ProofRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rec, ProofRecord::default());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let raw = json!({
            "post": aa_post(),
            "state-data": "0x01",
            "proof-data": "0x02",
            "step": 5,
        });
        assert!(serde_json::from_value::<ProofRecord>(raw).is_ok());
    }

    #[test]
    fn rejects_malformed_hex() {
        let cases = [
            json!({ "post": "aa".repeat(32), "state-data": "0x01", "proof-data": "0x02" }),
            json!({ "post": aa_post(), "state-data": "0x012", "proof-data": "0x02" }),
            json!({ "post": aa_post(), "state-data": "0x01", "proof-data": "0xzz" }),
            json!({ "post": "0xaabb", "state-data": "0x01", "proof-data": "0x02" }),
            json!({ "post": "0x0", "state-data": "0x01", "proof-data": "0x02" }),
            json!({ "post": aa_post(), "state-data": null, "proof-data": "0x02" }),
        ];
        for raw in cases {
            assert!(
                serde_json::from_value::<ProofRecord>(raw.clone()).is_err(),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn hex_bytes_decode_rules() {
        assert_eq!(hex_bytes::decode("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(hex_bytes::decode("0XFF").unwrap(), vec![0xff]);
        assert!(hex_bytes::decode("ff").is_err());
        assert!(hex_bytes::decode("0xf").is_err());
    }
}
