//! Error types for codec operations

use thiserror::Error;

/// Errors from encoding or decoding an envelope.
///
/// Every error is permanent for the given input. Callers treat any error from
/// decode as "message rejected"; no partial plaintext is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Decrypted bytes are not valid UTF-8
    #[error("invalid text encoding: valid UTF-8 up to byte {valid_up_to}")]
    TextEncoding {
        /// Length of the longest valid UTF-8 prefix
        valid_up_to: usize,
    },

    /// MAC verification failed.
    ///
    /// Carries no detail. A wrong key and tampered data are indistinguishable
    /// to the caller.
    #[error("authentication failed")]
    Authentication,

    /// Ciphertext or IV is malformed after successful authentication
    #[error("decryption failed: {reason}")]
    Decryption {
        /// Reason for decryption failure
        reason: String,
    },

    /// Underlying primitive or random source reported a fault
    #[error("primitive failure: {reason}")]
    Primitive {
        /// Description of the fault
        reason: String,
    },

    /// Empty shared secret rejected by configuration
    #[error("shared secret must not be empty")]
    InvalidSecret,
}

impl CodecError {
    /// Returns true if this error signals tampering or a forged envelope.
    ///
    /// Decryption failures after a valid MAC indicate a protocol or version
    /// mismatch between peers, not an attack.
    pub fn is_security_event(&self) -> bool {
        match self {
            Self::Authentication => true,

            Self::TextEncoding { .. }
            | Self::Decryption { .. }
            | Self::Primitive { .. }
            | Self::InvalidSecret => false,
        }
    }
}
