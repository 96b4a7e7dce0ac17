//! Random source abstraction for IV generation.
//!
//! Decouples the cipher from the entropy source so tests can supply fixed
//! bytes and production uses the OS CSPRNG.

use crate::error::CodecError;

/// Source of random bytes for initialization vectors.
///
/// # Invariants
///
/// - Production implementations MUST be cryptographically secure
/// - Failure is reported, never papered over with weak randomness
pub trait RandomSource: Send + Sync {
    /// Fills the provided buffer with random bytes.
    fn fill_bytes(&self, buffer: &mut [u8]) -> Result<(), CodecError>;
}

/// OS cryptographic RNG (getrandom).
///
/// Backed by `/dev/urandom`, `getrandom(2)`, `BCryptGenRandom` or the
/// platform equivalent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, buffer: &mut [u8]) -> Result<(), CodecError> {
        getrandom::fill(buffer)
            .map_err(|e| CodecError::Primitive { reason: format!("OS RNG failure: {e}") })
    }
}
