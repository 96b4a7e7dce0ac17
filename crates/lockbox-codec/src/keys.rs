//! Key material: agreement inputs and derived subkeys
//!
//! One shared secret is expanded with SHA-512 and split into two 32-byte
//! halves. The first half encrypts, the second half authenticates.
//!
//! ```text
//! Shared Secret
//!        │
//!        ▼ SHA-512
//! [ 0..32 ] encryption key   [ 32..64 ] authentication key
//! ```

use std::fmt;

use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// Size of each derived subkey (AES-256 key, HMAC key)
pub const SUBKEY_SIZE: usize = 32;

/// Output of key agreement on the sending side.
///
/// `public_key` is the sender's ephemeral public key. It is not secret and is
/// attached to the envelope so the receiver can recompute the MAC input.
#[derive(Clone)]
pub struct AgreementKeys {
    shared_secret: Vec<u8>,
    public_key: Vec<u8>,
}

impl AgreementKeys {
    /// Wrap a shared secret and the sender's public key.
    ///
    /// Both are opaque; lengths depend on the upstream curve and are not
    /// validated here.
    pub fn new(shared_secret: impl Into<Vec<u8>>, public_key: impl Into<Vec<u8>>) -> Self {
        Self { shared_secret: shared_secret.into(), public_key: public_key.into() }
    }

    /// Shared secret bytes.
    pub fn shared_secret(&self) -> &[u8] {
        &self.shared_secret
    }

    /// Sender's ephemeral public key.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

impl fmt::Debug for AgreementKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgreementKeys")
            .field("shared_secret", &"<redacted>")
            .field("public_key", &hex::encode(&self.public_key))
            .finish()
    }
}

impl Drop for AgreementKeys {
    fn drop(&mut self) {
        self.shared_secret.zeroize();
    }
}

/// Encryption and authentication keys derived from one shared secret.
///
/// Lives for a single encode or decode call. Both keys are zeroized on drop.
pub struct SubkeyPair {
    encryption_key: [u8; SUBKEY_SIZE],
    authentication_key: [u8; SUBKEY_SIZE],
}

impl SubkeyPair {
    /// AES-256 key.
    pub fn encryption_key(&self) -> &[u8; SUBKEY_SIZE] {
        &self.encryption_key
    }

    /// HMAC key.
    pub fn authentication_key(&self) -> &[u8; SUBKEY_SIZE] {
        &self.authentication_key
    }
}

impl Drop for SubkeyPair {
    fn drop(&mut self) {
        self.encryption_key.zeroize();
        self.authentication_key.zeroize();
    }
}

/// Derive the subkey pair from a shared secret.
///
/// Deterministic: same input always yields the same subkeys. Empty input is
/// accepted since the hash of empty input is well defined.
pub fn derive_subkeys(secret: &[u8]) -> SubkeyPair {
    let mut digest = Sha512::digest(secret);

    let mut encryption_key = [0u8; SUBKEY_SIZE];
    let mut authentication_key = [0u8; SUBKEY_SIZE];
    encryption_key.copy_from_slice(&digest[..SUBKEY_SIZE]);
    authentication_key.copy_from_slice(&digest[SUBKEY_SIZE..]);

    digest.as_mut_slice().zeroize();

    SubkeyPair { encryption_key, authentication_key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_secret_matches_sha512_halves() {
        let subkeys = derive_subkeys(&[0u8; 32]);

        assert_eq!(
            hex::encode(subkeys.encryption_key()),
            "5046adc1dba838867b2bbbfdd0c3423e58b57970b5267a90f57960924a87f196"
        );
        assert_eq!(
            hex::encode(subkeys.authentication_key()),
            "0a6a85eaa642dac835424b5d7c8d637c00408c7a73da672b7f498521420b6dd3"
        );
    }

    #[test]
    fn derive_is_deterministic() {
        let secret = b"shared_secret_from_x25519_agree!";

        let first = derive_subkeys(secret);
        let second = derive_subkeys(secret);

        assert_eq!(first.encryption_key(), second.encryption_key());
        assert_eq!(first.authentication_key(), second.authentication_key());
    }

    #[test]
    fn subkeys_are_distinct() {
        let subkeys = derive_subkeys(b"shared_secret_from_x25519_agree!");
        assert_ne!(subkeys.encryption_key(), subkeys.authentication_key());
    }

    #[test]
    fn different_secrets_produce_different_subkeys() {
        let a = derive_subkeys(b"secret_a");
        let b = derive_subkeys(b"secret_b");

        assert_ne!(a.encryption_key(), b.encryption_key());
        assert_ne!(a.authentication_key(), b.authentication_key());
    }

    #[test]
    fn works_with_empty_secret() {
        let subkeys = derive_subkeys(&[]);
        assert_ne!(subkeys.encryption_key(), subkeys.authentication_key());
    }

    #[test]
    fn debug_redacts_shared_secret() {
        let keys = AgreementKeys::new(vec![0xAA; 32], vec![0x01; 4]);
        let rendered = format!("{keys:?}");

        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("01010101"));
        assert!(!rendered.contains("aaaa"));
    }
}
