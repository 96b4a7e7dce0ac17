//! Envelope encode/decode orchestration
//!
//! # Encode
//!
//! ```text
//! shared secret ──SHA-512──► (enc key, auth key)
//! plaintext ──UTF-8──► AES-256-CBC(enc key) ──► (cipher_text, iv)
//! iv ‖ public_key ‖ cipher_text ──HMAC-SHA256(auth key)──► mac
//! ```
//!
//! # Decode
//!
//! The MAC is verified before any ciphertext is decrypted. A failed
//! verification stops the call; CBC never sees unauthenticated input.

use zeroize::Zeroize;

use crate::{
    auth::{Authenticator, HmacSha256Authenticator},
    cipher,
    config::CodecConfig,
    error::CodecError,
    keys::{AgreementKeys, derive_subkeys},
    payload::{EncryptionPayload, mac_input},
    random::{OsRandom, RandomSource},
};

/// Encode plaintext into an authenticated envelope and back.
pub trait Codec {
    /// Encrypt and authenticate `plaintext` for the peer sharing
    /// `agreement_keys.shared_secret()`.
    fn encode(
        &self,
        plaintext: &str,
        agreement_keys: &AgreementKeys,
    ) -> Result<EncryptionPayload, CodecError>;

    /// Authenticate and decrypt `payload` with the receiver's copy of the
    /// shared secret.
    ///
    /// # Errors
    ///
    /// - `Authentication`: MAC mismatch (wrong key or tampered envelope)
    /// - `Decryption`: malformed IV, ciphertext or padding
    /// - `TextEncoding`: plaintext is not UTF-8
    fn decode(&self, payload: &EncryptionPayload, shared_secret: &[u8])
    -> Result<String, CodecError>;
}

/// AES-256-CBC + HMAC-SHA256 codec.
///
/// Stateless across calls; safe to share between threads when `A` and `R`
/// are.
#[derive(Debug, Clone, Default)]
pub struct AesCbcHmacCodec<A = HmacSha256Authenticator, R = OsRandom> {
    authenticator: A,
    random: R,
    config: CodecConfig,
}

impl AesCbcHmacCodec {
    /// Production codec: HMAC-SHA256, OS randomness, default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Production codec with the given configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self::with_parts(HmacSha256Authenticator, OsRandom, config)
    }
}

impl<A: Authenticator, R: RandomSource> AesCbcHmacCodec<A, R> {
    /// Codec with caller-supplied authenticator and random source.
    pub fn with_parts(authenticator: A, random: R, config: CodecConfig) -> Self {
        Self { authenticator, random, config }
    }

    /// Authenticator used for MAC generation and verification.
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn check_secret(&self, shared_secret: &[u8]) -> Result<(), CodecError> {
        if self.config.reject_empty_secret && shared_secret.is_empty() {
            return Err(CodecError::InvalidSecret);
        }
        Ok(())
    }
}

impl<A: Authenticator, R: RandomSource> Codec for AesCbcHmacCodec<A, R> {
    fn encode(
        &self,
        plaintext: &str,
        agreement_keys: &AgreementKeys,
    ) -> Result<EncryptionPayload, CodecError> {
        self.check_secret(agreement_keys.shared_secret())?;

        let subkeys = derive_subkeys(agreement_keys.shared_secret());
        let (cipher_text, iv) =
            cipher::encrypt(subkeys.encryption_key(), plaintext.as_bytes(), &self.random)?;

        let data =
            mac_input(self.config.mac_layout, &iv, agreement_keys.public_key(), &cipher_text);
        let mac = self.authenticator.generate_digest(&data, subkeys.authentication_key())?;

        tracing::debug!(
            plaintext_len = plaintext.len(),
            cipher_text_len = cipher_text.len(),
            "encoded envelope"
        );

        Ok(EncryptionPayload::from_parts(iv, agreement_keys.public_key(), mac, cipher_text))
    }

    fn decode(
        &self,
        payload: &EncryptionPayload,
        shared_secret: &[u8],
    ) -> Result<String, CodecError> {
        self.check_secret(shared_secret)?;

        let subkeys = derive_subkeys(shared_secret);
        let data = payload.mac_input(self.config.mac_layout);

        if let Err(err) =
            self.authenticator.verify(&data, payload.mac(), subkeys.authentication_key())
        {
            tracing::warn!(error = %err, "envelope rejected");
            return Err(err);
        }

        let plaintext =
            cipher::decrypt(subkeys.encryption_key(), payload.cipher_text(), payload.iv())
                .inspect_err(|err| {
                    tracing::warn!(error = %err, "authenticated envelope failed to decrypt");
                })?;

        let text = String::from_utf8(plaintext).map_err(|e| {
            let valid_up_to = e.utf8_error().valid_up_to();
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            CodecError::TextEncoding { valid_up_to }
        })?;

        tracing::debug!(cipher_text_len = payload.cipher_text().len(), "decoded envelope");

        Ok(text)
    }
}
