//! Fuzz target for decoding attacker-controlled envelopes
//!
//! # Strategy
//!
//! - Arbitrary iv, public key, mac and ciphertext (any lengths)
//! - Arbitrary shared secrets (empty, short, long)
//! - Both MAC layouts
//!
//! # Invariants
//!
//! - Decode never panics
//! - A forged envelope is rejected at authentication, never at decryption

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lockbox_codec::{AesCbcHmacCodec, Codec, CodecConfig, CodecError, EncryptionPayload, MacLayout};

#[derive(Debug, Arbitrary)]
struct ForgedEnvelope {
    iv: Vec<u8>,
    public_key: Vec<u8>,
    mac: Vec<u8>,
    cipher_text: Vec<u8>,
    shared_secret: Vec<u8>,
    length_prefixed: bool,
}

fuzz_target!(|input: ForgedEnvelope| {
    let mac_layout =
        if input.length_prefixed { MacLayout::LengthPrefixed } else { MacLayout::Concatenated };
    let codec = AesCbcHmacCodec::with_config(CodecConfig { mac_layout, ..Default::default() });

    let payload =
        EncryptionPayload::from_parts(input.iv, input.public_key, input.mac, input.cipher_text);

    // INVARIANT: without the authentication key, forging a MAC is infeasible
    let result = codec.decode(&payload, &input.shared_secret);
    assert_eq!(result, Err(CodecError::Authentication), "forged envelope must fail authentication");
});
