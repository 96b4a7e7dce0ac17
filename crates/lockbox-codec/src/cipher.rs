//! AES-256-CBC encryption with PKCS#7 padding
//!
//! CBC is unauthenticated. Callers MUST verify the MAC before passing
//! ciphertext to [`decrypt`].

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::{error::CodecError, keys::SUBKEY_SIZE, random::RandomSource};

/// AES block size, which is also the IV size (16 bytes)
pub const BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` under a fresh random IV.
///
/// Returns `(cipher_text, iv)`. The ciphertext is always a non-empty multiple
/// of [`BLOCK_SIZE`] since PKCS#7 pads even block-aligned input.
pub fn encrypt(
    key: &[u8; SUBKEY_SIZE],
    plaintext: &[u8],
    random: &impl RandomSource,
) -> Result<(Vec<u8>, [u8; BLOCK_SIZE]), CodecError> {
    let mut iv = [0u8; BLOCK_SIZE];
    random.fill_bytes(&mut iv)?;

    let cipher = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|e| CodecError::Primitive { reason: format!("AES-256-CBC init: {e}") })?;
    let cipher_text = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok((cipher_text, iv))
}

/// Decrypt `cipher_text` with the IV it was encrypted under.
///
/// # Errors
///
/// - `Decryption`: IV is not [`BLOCK_SIZE`] bytes, ciphertext is empty or not
///   block-aligned, or padding is invalid
pub fn decrypt(
    key: &[u8; SUBKEY_SIZE],
    cipher_text: &[u8],
    iv: &[u8],
) -> Result<Vec<u8>, CodecError> {
    if iv.len() != BLOCK_SIZE {
        return Err(CodecError::Decryption {
            reason: format!("iv must be {BLOCK_SIZE} bytes, got {}", iv.len()),
        });
    }

    if cipher_text.is_empty() || cipher_text.len() % BLOCK_SIZE != 0 {
        return Err(CodecError::Decryption {
            reason: format!(
                "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
                cipher_text.len()
            ),
        });
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CodecError::Primitive { reason: format!("AES-256-CBC init: {e}") })?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(cipher_text)
        .map_err(|_| CodecError::Decryption { reason: "invalid padding".to_string() })
}
