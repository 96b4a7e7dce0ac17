//! Message authentication over envelope bytes
//!
//! [`Authenticator`] is the seam between the codec and the keyed-hash
//! primitive. [`HmacSha256Authenticator`] is the production implementation;
//! tests substitute doubles that force verification failure.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CodecError;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 output size (32 bytes)
pub const MAC_SIZE: usize = 32;

/// Keyed MAC generation and verification.
pub trait Authenticator: Send + Sync {
    /// Compute the MAC of `data` under `key`. Deterministic.
    fn generate_digest(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Check `expected_mac` against the MAC of `data` under `key`.
    ///
    /// # Security
    ///
    /// Implementations MUST compare in constant time and MUST return
    /// `Authentication` on any mismatch, including a MAC of the wrong length.
    fn verify(&self, data: &[u8], expected_mac: &[u8], key: &[u8]) -> Result<(), CodecError>;
}

/// HMAC-SHA256 authenticator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Authenticator;

impl HmacSha256Authenticator {
    fn keyed(key: &[u8]) -> Result<HmacSha256, CodecError> {
        HmacSha256::new_from_slice(key)
            .map_err(|e| CodecError::Primitive { reason: format!("HMAC-SHA256 key: {e}") })
    }
}

impl Authenticator for HmacSha256Authenticator {
    fn generate_digest(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut mac = Self::keyed(key)?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], expected_mac: &[u8], key: &[u8]) -> Result<(), CodecError> {
        let mut mac = Self::keyed(key)?;
        mac.update(data);

        // `verify_slice` rejects wrong-length tags and compares in constant time
        mac.verify_slice(expected_mac).map_err(|_| CodecError::Authentication)
    }
}
