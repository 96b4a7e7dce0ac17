//! Encryption envelope
//!
//! Four fields in a fixed order: iv, public key, mac, ciphertext. Framing on
//! the wire belongs to the transport; serde serializes each field as a
//! lowercase hex string under camelCase names (`iv`, `publicKey`, `mac`,
//! `cipherText`).

use serde::{Deserialize, Serialize};

use crate::config::MacLayout;

/// Authenticated-ciphertext envelope.
///
/// Immutable once built. A new plaintext produces a wholly new envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionPayload {
    #[serde(with = "hex_field")]
    iv: Vec<u8>,
    #[serde(with = "hex_field")]
    public_key: Vec<u8>,
    #[serde(with = "hex_field")]
    mac: Vec<u8>,
    #[serde(with = "hex_field")]
    cipher_text: Vec<u8>,
}

impl EncryptionPayload {
    /// Assemble an envelope from received fields.
    ///
    /// No validation happens here; decode authenticates every field before
    /// trusting any of them.
    pub fn from_parts(
        iv: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
        mac: impl Into<Vec<u8>>,
        cipher_text: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            iv: iv.into(),
            public_key: public_key.into(),
            mac: mac.into(),
            cipher_text: cipher_text.into(),
        }
    }

    /// Initialization vector used for CBC.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Sender's ephemeral public key.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// MAC over the envelope fields.
    pub fn mac(&self) -> &[u8] {
        &self.mac
    }

    /// Block-aligned ciphertext.
    pub fn cipher_text(&self) -> &[u8] {
        &self.cipher_text
    }

    /// Split into `(iv, public_key, mac, cipher_text)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>) {
        (self.iv, self.public_key, self.mac, self.cipher_text)
    }

    /// Bytes covered by this envelope's MAC.
    pub fn mac_input(&self, layout: MacLayout) -> Vec<u8> {
        mac_input(layout, &self.iv, &self.public_key, &self.cipher_text)
    }
}

/// Build the MAC input for the given fields.
///
/// Layout:
/// - `Concatenated`: `iv ‖ public_key ‖ cipher_text`
/// - `LengthPrefixed`: `len(iv) ‖ iv ‖ len(public_key) ‖ public_key ‖
///   len(cipher_text) ‖ cipher_text`, lengths as big-endian `u64`
pub fn mac_input(layout: MacLayout, iv: &[u8], public_key: &[u8], cipher_text: &[u8]) -> Vec<u8> {
    let fields = [iv, public_key, cipher_text];

    match layout {
        MacLayout::Concatenated => fields.concat(),
        MacLayout::LengthPrefixed => {
            let total: usize = fields.iter().map(|f| f.len() + 8).sum();
            let mut data = Vec::with_capacity(total);
            for field in fields {
                data.extend_from_slice(&(field.len() as u64).to_be_bytes());
                data.extend_from_slice(field);
            }
            data
        },
    }
}

mod hex_field {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<T, S>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(D::Error::custom)
    }
}
