//! Record-key derivation: Argon2id + HKDF-SHA256.
//!
//! Each vault record is encrypted under a key derived from the user's
//! record secret (a PIN or passkey independent of the login password):
//!
//! 1. Argon2id stretches the secret with the record's random salt into
//!    a 32-byte master key.  Argon2id is memory-hard, which slows down
//!    brute-force and GPU attacks on short PINs.
//! 2. HKDF-SHA256 expands that master key with the record id as context,
//!    so two records stored under the same secret still get independent
//!    encryption keys.

use argon2::{Algorithm, Argon2, Params, Version};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{DataVaultError, Result};

/// Length of the salt in bytes (256 bits).
const SALT_LEN: usize = 32;

/// Length of derived keys in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so callers can pass
/// whatever the user configured in `.datavault.toml`.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive the AES-256 key for one vault record.
///
/// Deterministic: the same secret + salt + record id always produces the
/// same key.  Enforces minimum Argon2 parameters to prevent dangerously
/// weak KDF settings.
pub fn derive_record_key(
    secret: &[u8],
    salt: &[u8],
    record_id: &str,
    argon2_params: &Argon2Params,
) -> Result<[u8; KEY_LEN]> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(DataVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(DataVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(DataVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| DataVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut master = [0u8; KEY_LEN];
    argon2
        .hash_password_into(secret, salt, &mut master)
        .map_err(|e| DataVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    // Bind the final key to this specific record.
    let key = hkdf_expand(&master, record_id);
    master.zeroize();
    key
}

/// HKDF-SHA256 expand with the record id as context.
///
/// We skip the `extract` step and use the Argon2 output directly as the
/// pseudo-random key (PRK), because it already has high entropy.
fn hkdf_expand(master: &[u8], record_id: &str) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, master);
    let info = format!("datavault-record:{record_id}");

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info.as_bytes(), &mut okm)
        .map_err(|e| DataVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small params keep the tests fast while staying above the floor.
    fn test_params() -> Argon2Params {
        Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn same_inputs_same_key() {
        let salt = [1u8; 32];
        let a = derive_record_key(b"pin1234", &salt, "rec-1", &test_params()).unwrap();
        let b = derive_record_key(b"pin1234", &salt, "rec-1", &test_params()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_record_ids_give_different_keys() {
        let salt = [1u8; 32];
        let a = derive_record_key(b"pin1234", &salt, "rec-1", &test_params()).unwrap();
        let b = derive_record_key(b"pin1234", &salt, "rec-2", &test_params()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_secrets_give_different_keys() {
        let salt = [1u8; 32];
        let a = derive_record_key(b"pin1234", &salt, "rec-1", &test_params()).unwrap();
        let b = derive_record_key(b"pin9999", &salt, "rec-1", &test_params()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_weak_memory_cost() {
        let salt = [1u8; 32];
        let weak = Argon2Params {
            memory_kib: 1_024,
            iterations: 1,
            parallelism: 1,
        };
        let result = derive_record_key(b"pin1234", &salt, "rec-1", &weak);
        assert!(result.is_err());
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
