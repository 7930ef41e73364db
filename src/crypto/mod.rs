//! Cryptographic primitives for DataVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id record-key derivation and HKDF sub-key expansion (`kdf`)
//! - Password policy checks and PBKDF2 login verifiers (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_record_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_record_key, generate_salt, Argon2Params};
pub use password::{derive_verifier, validate_password, verify_password, PasswordPolicy};
