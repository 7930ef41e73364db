//! Password policy and PBKDF2 login verifiers.
//!
//! Login passwords are never stored; each user record keeps a random
//! salt and a PBKDF2-HMAC-SHA256 verifier derived from it.  Verification
//! recomputes the verifier and compares in constant time.
//!
//! The policy is strict and fixed: 8–12 characters with at least one
//! lowercase letter, one digit, and one symbol from `SYMBOLS`.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::errors::{DataVaultError, Result};

/// Length of a PBKDF2 verifier in bytes (256 bits).
const VERIFIER_LEN: usize = 32;

/// Floor on the iteration count, regardless of configuration.
const MIN_ITERATIONS: u32 = 100_000;

/// The fixed set of punctuation characters that satisfy the
/// "at least one symbol" rule.
const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Length bounds for passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_len: 8,
            max_len: 12,
        }
    }
}

/// Check a candidate password against the policy.
///
/// Returns `InvalidPassword` naming the first rule that failed.
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> Result<()> {
    let len = password.chars().count();
    if len < policy.min_len {
        return Err(DataVaultError::InvalidPassword(format!(
            "must be at least {} characters",
            policy.min_len
        )));
    }
    if len > policy.max_len {
        return Err(DataVaultError::InvalidPassword(format!(
            "must be at most {} characters",
            policy.max_len
        )));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(DataVaultError::InvalidPassword(
            "must contain a lowercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DataVaultError::InvalidPassword(
            "must contain a digit".into(),
        ));
    }
    if !password.chars().any(|c| SYMBOLS.contains(c)) {
        return Err(DataVaultError::InvalidPassword(format!(
            "must contain a symbol ({SYMBOLS})"
        )));
    }
    Ok(())
}

/// Derive a PBKDF2-HMAC-SHA256 verifier from a password and salt.
///
/// `iterations` below the 100 000 floor are bumped up to it.
pub fn derive_verifier(password: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let rounds = iterations.max(MIN_ITERATIONS);
    let mut verifier = vec![0u8; VERIFIER_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut verifier);
    verifier
}

/// Check a password against a stored verifier in constant time.
pub fn verify_password(password: &[u8], salt: &[u8], iterations: u32, stored: &[u8]) -> bool {
    let mut candidate = derive_verifier(password, salt, iterations);
    let ok = candidate.ct_eq(stored).into();
    candidate.zeroize();
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::default()
    }

    #[test]
    fn rejects_too_short() {
        assert!(validate_password("abc", &policy()).is_err());
    }

    #[test]
    fn rejects_too_long_or_missing_symbol() {
        // 13 characters and no symbol — fails either way.
        assert!(validate_password("alllowercase1", &policy()).is_err());
    }

    #[test]
    fn rejects_missing_digit() {
        assert!(validate_password("abcdefg!", &policy()).is_err());
    }

    #[test]
    fn rejects_missing_lowercase() {
        assert!(validate_password("ABCDEF1!", &policy()).is_err());
    }

    #[test]
    fn accepts_compliant_password() {
        assert!(validate_password("Ab1!2345", &policy()).is_ok());
    }

    #[test]
    fn verifier_roundtrip() {
        let salt = [3u8; 32];
        let verifier = derive_verifier(b"Ab1!2345", &salt, 100_000);
        assert!(verify_password(b"Ab1!2345", &salt, 100_000, &verifier));
        assert!(!verify_password(b"Ab1!2346", &salt, 100_000, &verifier));
    }

    #[test]
    fn verifier_depends_on_salt() {
        let a = derive_verifier(b"Ab1!2345", &[1u8; 32], 100_000);
        let b = derive_verifier(b"Ab1!2345", &[2u8; 32], 100_000);
        assert_ne!(a, b);
    }

    #[test]
    fn iteration_floor_is_enforced() {
        let salt = [3u8; 32];
        // Asking for 1 iteration must produce the same verifier as the floor.
        let low = derive_verifier(b"Ab1!2345", &salt, 1);
        let floor = derive_verifier(b"Ab1!2345", &salt, 100_000);
        assert_eq!(low, floor);
    }
}
