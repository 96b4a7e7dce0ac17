//! Fuzz target for encode/decode under adversarial inputs
//!
//! # Strategy
//!
//! - Arbitrary plaintext strings, secrets and public keys
//! - Single-bit corruption of a chosen envelope field
//!
//! # Invariants
//!
//! - Encode never fails for well-formed input
//! - decode(encode(p)) == p
//! - Corrupting any field fails authentication

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lockbox_codec::{AesCbcHmacCodec, AgreementKeys, Codec, CodecError, EncryptionPayload};

#[derive(Debug, Arbitrary)]
struct Scenario {
    plaintext: String,
    shared_secret: Vec<u8>,
    public_key: Vec<u8>,
    corrupt_field: u8,
    corrupt_bit: u16,
}

fuzz_target!(|scenario: Scenario| {
    let codec = AesCbcHmacCodec::new();
    let keys = AgreementKeys::new(scenario.shared_secret.clone(), scenario.public_key);

    // INVARIANT 1: Encode succeeds
    let payload = codec.encode(&scenario.plaintext, &keys).expect("encode must succeed");

    // INVARIANT 2: Round-trip
    let decoded = codec.decode(&payload, &scenario.shared_secret).expect("decode must succeed");
    assert_eq!(decoded, scenario.plaintext);

    // INVARIANT 3: Any flipped bit fails authentication
    let (mut iv, mut public_key, mut mac, mut cipher_text) = payload.into_parts();
    let target = match scenario.corrupt_field % 4 {
        0 => &mut iv,
        1 => &mut public_key,
        2 => &mut mac,
        _ => &mut cipher_text,
    };
    if target.is_empty() {
        return;
    }
    let bit = scenario.corrupt_bit as usize % (target.len() * 8);
    target[bit / 8] ^= 1 << (bit % 8);

    let corrupted = EncryptionPayload::from_parts(iv, public_key, mac, cipher_text);
    assert_eq!(
        codec.decode(&corrupted, &scenario.shared_secret),
        Err(CodecError::Authentication),
        "corrupted envelope must fail authentication"
    );
});
