//! Property checks over arbitrary records served through the provider.

mod common;

use cannon_core::{ClaimHash, ProofRecord};
use cannon_trace::{TraceError, TraceProvider};
use common::{Behavior, RecordingGenerator};
use proptest::prelude::*;

fn nonzero_claim() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>().prop_filter("zero hash is the missing sentinel", |b| b.iter().any(|&x| x != 0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A generated record is served unchanged, and only the first call generates.
    #[test]
    fn generated_records_are_served(
        claim in nonzero_claim(),
        state in proptest::collection::vec(any::<u8>(), 1..128),
        proof in proptest::collection::vec(any::<u8>(), 1..128),
        index in any::<u64>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let rec = ProofRecord::new(ClaimHash::new(claim), state.clone(), proof.clone());
        let p = TraceProvider::new(dir.path(), RecordingGenerator::new(Behavior::Write(rec)));

        prop_assert_eq!(p.get_claim(index).unwrap(), ClaimHash::new(claim));
        prop_assert_eq!(p.get_preimage(index).unwrap(), (state, proof));
        prop_assert_eq!(p.generator().call_count(), 1);
    }

    /// Generator failures always surface as generation errors for the requested index.
    #[test]
    fn generator_errors_carry_the_index(index in any::<u64>()) {
        let dir = tempfile::tempdir().unwrap();
        let p = TraceProvider::new(dir.path(), RecordingGenerator::new(Behavior::Fail("boom")));
        let err = p.get_claim(index).unwrap_err();
        let is_generation = matches!(err, TraceError::Generation { .. });
        prop_assert!(is_generation);
        prop_assert_eq!(err.index(), Some(index));
        prop_assert_eq!(p.generator().call_count(), 1);
    }
}
