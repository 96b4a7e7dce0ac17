//! Codec configuration.

/// Byte layout of the data covered by the MAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacLayout {
    /// `iv ‖ public_key ‖ cipher_text`, no delimiters.
    ///
    /// Interoperates with existing peers.
    #[default]
    Concatenated,

    /// Each field preceded by its length as a big-endian `u64`.
    ///
    /// Removes any ambiguity about field boundaries when lengths are attacker
    /// influenced. Both peers must be configured with this layout.
    LengthPrefixed,
}

/// Configuration for [`crate::AesCbcHmacCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    /// Layout of the MAC input
    pub mac_layout: MacLayout,
    /// Fail with `InvalidSecret` when the shared secret is empty
    pub reject_empty_secret: bool,
}
