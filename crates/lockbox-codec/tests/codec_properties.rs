//! Property-based tests for the envelope codec
//!
//! These tests verify the fundamental invariants of the codec:
//!
//! 1. **Round-trip**: decode(encode(p, k), k.secret) == p for all strings
//! 2. **Tamper detection**: any flipped bit in any field fails authentication
//! 3. **Wrong-key rejection**: a different shared secret fails authentication
//! 4. **Subkey independence**: subkeys differ and are deterministic
//! 5. **IV freshness**: repeated encodings differ but decode identically

use lockbox_codec::{
    AesCbcHmacCodec, AgreementKeys, BLOCK_SIZE, Codec, CodecConfig, CodecError, EncryptionPayload,
    MAC_SIZE, MacLayout, derive_subkeys,
};
use proptest::{prelude::*, sample::Index};

fn flip_bit(payload: EncryptionPayload, field: usize, bit: Index) -> EncryptionPayload {
    let (mut iv, mut public_key, mut mac, mut cipher_text) = payload.into_parts();

    let target = match field {
        0 => &mut iv,
        1 => &mut public_key,
        2 => &mut mac,
        _ => &mut cipher_text,
    };
    let position = bit.index(target.len() * 8);
    target[position / 8] ^= 1 << (position % 8);

    EncryptionPayload::from_parts(iv, public_key, mac, cipher_text)
}

fn any_layout() -> impl Strategy<Value = MacLayout> {
    prop_oneof![Just(MacLayout::Concatenated), Just(MacLayout::LengthPrefixed)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_encode_decode_roundtrip(
        plaintext in any::<String>(),
        shared_secret in prop::collection::vec(any::<u8>(), 0..64),
        public_key in prop::collection::vec(any::<u8>(), 0..65),
        layout in any_layout(),
    ) {
        let codec = AesCbcHmacCodec::with_config(CodecConfig { mac_layout: layout, ..Default::default() });
        let keys = AgreementKeys::new(shared_secret.clone(), public_key.clone());

        let payload = codec.encode(&plaintext, &keys).unwrap();

        prop_assert_eq!(payload.iv().len(), BLOCK_SIZE);
        prop_assert_eq!(payload.mac().len(), MAC_SIZE);
        prop_assert_eq!(payload.public_key(), public_key.as_slice());
        prop_assert!(!payload.cipher_text().is_empty());
        prop_assert_eq!(payload.cipher_text().len() % BLOCK_SIZE, 0);

        let decoded = codec.decode(&payload, &shared_secret).unwrap();
        prop_assert_eq!(decoded, plaintext);
    }

    #[test]
    fn prop_single_bit_flip_fails_authentication(
        plaintext in ".{0,200}",
        shared_secret in prop::collection::vec(any::<u8>(), 32..=32),
        public_key in prop::collection::vec(any::<u8>(), 1..65),
        field in 0usize..4,
        bit in any::<Index>(),
    ) {
        let codec = AesCbcHmacCodec::new();
        let keys = AgreementKeys::new(shared_secret.clone(), public_key);

        let payload = codec.encode(&plaintext, &keys).unwrap();
        let tampered = flip_bit(payload, field, bit);

        prop_assert_eq!(codec.decode(&tampered, &shared_secret), Err(CodecError::Authentication));
    }

    #[test]
    fn prop_wrong_secret_fails_authentication(
        plaintext in ".{0,200}",
        shared_secret in prop::collection::vec(any::<u8>(), 32..=32),
        other_secret in prop::collection::vec(any::<u8>(), 32..=32),
    ) {
        prop_assume!(shared_secret != other_secret);

        let codec = AesCbcHmacCodec::new();
        let keys = AgreementKeys::new(shared_secret, [0x01u8; 32]);

        let payload = codec.encode(&plaintext, &keys).unwrap();
        let result = codec.decode(&payload, &other_secret);

        prop_assert_eq!(result, Err(CodecError::Authentication));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_subkeys_distinct_and_deterministic(
        shared_secret in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let first = derive_subkeys(&shared_secret);
        let second = derive_subkeys(&shared_secret);

        prop_assert_ne!(first.encryption_key(), first.authentication_key());
        prop_assert_eq!(first.encryption_key(), second.encryption_key());
        prop_assert_eq!(first.authentication_key(), second.authentication_key());
    }

    #[test]
    fn prop_repeated_encodings_use_fresh_iv(
        plaintext in ".{0,100}",
        shared_secret in prop::collection::vec(any::<u8>(), 32..=32),
    ) {
        let codec = AesCbcHmacCodec::new();
        let keys = AgreementKeys::new(shared_secret.clone(), [0x01u8; 32]);

        let first = codec.encode(&plaintext, &keys).unwrap();
        let second = codec.encode(&plaintext, &keys).unwrap();

        prop_assert_ne!(first.iv(), second.iv());
        prop_assert_ne!(first.cipher_text(), second.cipher_text());

        prop_assert_eq!(codec.decode(&first, &shared_secret).unwrap(), plaintext.clone());
        prop_assert_eq!(codec.decode(&second, &shared_secret).unwrap(), plaintext);
    }
}

#[test]
fn concrete_vector_roundtrip_and_mac_increment() {
    let shared_secret = [0u8; 32];
    let keys = AgreementKeys::new(shared_secret, [0x01u8; 32]);

    let subkeys = derive_subkeys(&shared_secret);
    assert_eq!(
        hex::encode(subkeys.encryption_key()),
        "5046adc1dba838867b2bbbfdd0c3423e58b57970b5267a90f57960924a87f196"
    );
    assert_eq!(
        hex::encode(subkeys.authentication_key()),
        "0a6a85eaa642dac835424b5d7c8d637c00408c7a73da672b7f498521420b6dd3"
    );

    let codec = AesCbcHmacCodec::new();
    let payload = codec.encode("test", &keys).unwrap();
    assert_eq!(codec.decode(&payload, &shared_secret).unwrap(), "test");

    let (iv, public_key, mut mac, cipher_text) = payload.into_parts();
    let last = mac.len() - 1;
    mac[last] = mac[last].wrapping_add(1);
    let tampered = EncryptionPayload::from_parts(iv, public_key, mac, cipher_text);

    assert_eq!(codec.decode(&tampered, &shared_secret), Err(CodecError::Authentication));
}

#[test]
fn multibyte_text_roundtrip() {
    let codec = AesCbcHmacCodec::new();
    let keys = AgreementKeys::new([0x42u8; 32], [0x01u8; 32]);
    let plaintext = "héllo wörld ✓ 🔐 {\"id\":1,\"method\":\"wc_sessionPing\"}";

    let payload = codec.encode(plaintext, &keys).unwrap();
    assert_eq!(codec.decode(&payload, &[0x42u8; 32]).unwrap(), plaintext);
}

#[test]
fn envelope_survives_cbor_transport() {
    let codec = AesCbcHmacCodec::new();
    let keys = AgreementKeys::new([0x11u8; 32], [0x22u8; 32]);
    let payload = codec.encode("over the wire", &keys).unwrap();

    let mut buf = Vec::new();
    ciborium::into_writer(&payload, &mut buf).unwrap();
    let received: EncryptionPayload = ciborium::from_reader(buf.as_slice()).unwrap();

    assert_eq!(received, payload);
    assert_eq!(codec.decode(&received, &[0x11u8; 32]).unwrap(), "over the wire");
}

#[test]
fn concurrent_codec_use() {
    let codec = AesCbcHmacCodec::new();

    std::thread::scope(|scope| {
        for i in 0..8u8 {
            let codec = &codec;
            scope.spawn(move || {
                let keys = AgreementKeys::new([i; 32], [0x01u8; 32]);
                let plaintext = format!("message {i}");

                let payload = codec.encode(&plaintext, &keys).unwrap();
                assert_eq!(codec.decode(&payload, &[i; 32]).unwrap(), plaintext);
            });
        }
    });
}
