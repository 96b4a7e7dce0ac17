//! Lockbox Envelope Codec
//!
//! Authenticated encryption for payloads exchanged between two parties that
//! share a secret from key agreement (e.g. X25519). A plaintext string becomes
//! an envelope of four fields: iv, sender public key, mac, ciphertext.
//!
//! # Key Derivation
//!
//! ```text
//! Shared Secret
//!        │
//!        ▼ SHA-512
//! 64-byte digest
//!        │
//!        ├─► [0..32]  encryption key     → AES-256-CBC (PKCS#7)
//!        └─► [32..64] authentication key → HMAC-SHA256
//! ```
//!
//! Both subkeys come from the same digest and are zeroized when the call
//! returns.
//!
//! # Envelope Authentication
//!
//! The MAC covers `iv ‖ public_key ‖ cipher_text`, binding the ciphertext to
//! the sender's ephemeral public key. An opt-in length-prefixed layout is
//! available through [`CodecConfig`] for deployments that control both peers.
//!
//! # Security
//!
//! - MAC is verified in constant time before any decryption
//! - Authentication failures never reveal whether the key or the data was wrong
//! - IVs are drawn fresh from the OS CSPRNG for every encryption
//! - No partial plaintext is returned on any error

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod cipher;
pub mod codec;
pub mod config;
pub mod error;
pub mod keys;
pub mod payload;
pub mod random;

pub use auth::{Authenticator, HmacSha256Authenticator, MAC_SIZE};
pub use cipher::BLOCK_SIZE;
pub use codec::{AesCbcHmacCodec, Codec};
pub use config::{CodecConfig, MacLayout};
pub use error::CodecError;
pub use keys::{AgreementKeys, SUBKEY_SIZE, SubkeyPair, derive_subkeys};
pub use payload::EncryptionPayload;
pub use random::{OsRandom, RandomSource};
