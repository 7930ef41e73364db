//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! `decrypt` returns a single opaque `DecryptionFailed` for every failure
//! shape: a wrong key and a tampered ciphertext are indistinguishable to
//! the caller.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{DataVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| DataVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| DataVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 12 bytes to be the nonce, followed by the ciphertext.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    // Make sure we have at least a nonce worth of bytes.
    if ciphertext_with_nonce.len() < NONCE_LEN {
        return Err(DataVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| DataVaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| DataVaultError::DecryptionFailed)?;

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let blob = encrypt(&KEY, b"hello world").unwrap();
        let plain = decrypt(&KEY, &blob).unwrap();
        assert_eq!(plain, b"hello world");
    }

    #[test]
    fn wrong_key_fails_opaquely() {
        let blob = encrypt(&KEY, b"hello world").unwrap();
        let other = [8u8; 32];
        let err = decrypt(&other, &blob).unwrap_err();
        assert!(matches!(err, DataVaultError::DecryptionFailed));
    }

    #[test]
    fn tampered_ciphertext_fails_like_wrong_key() {
        let mut blob = encrypt(&KEY, b"hello world").unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0xff;

        let err = decrypt(&KEY, &blob).unwrap_err();
        assert!(matches!(err, DataVaultError::DecryptionFailed));
    }

    #[test]
    fn truncated_blob_fails() {
        let err = decrypt(&KEY, b"short").unwrap_err();
        assert!(matches!(err, DataVaultError::DecryptionFailed));
    }

    #[test]
    fn nonce_is_fresh_per_call() {
        let a = encrypt(&KEY, b"same input").unwrap();
        let b = encrypt(&KEY, b"same input").unwrap();
        assert_ne!(a, b);
    }
}
