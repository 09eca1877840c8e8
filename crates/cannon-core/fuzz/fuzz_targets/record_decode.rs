#![no_main]
use cannon_core::io::decode_proof_record;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(rec) = decode_proof_record(data) {
        assert_eq!(rec.claim_value.as_bytes().len(), 32);
    }
});
