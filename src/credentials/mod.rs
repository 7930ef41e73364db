//! Credential store — username to password-verifier mapping.
//!
//! Users are keyed by username.  Each entry holds a random salt and a
//! PBKDF2-HMAC-SHA256 verifier; the password itself is never stored.
//! The whole collection persists as `users.json` and is rewritten on
//! every mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::generate_salt;
use crate::crypto::password::{derive_verifier, validate_password, verify_password, PasswordPolicy};
use crate::errors::{DataVaultError, Result};
use crate::storage::{self, base64_decode, base64_encode};

/// Maximum username length in characters.
const MAX_USERNAME_LEN: usize = 32;

/// One persisted user entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub username: String,

    /// Random salt for the PBKDF2 verifier (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// PBKDF2-HMAC-SHA256 output (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub verifier: Vec<u8>,

    /// When this user registered.
    pub created_at: DateTime<Utc>,
}

/// Username → user map backed by `users.json`.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    users: BTreeMap<String, StoredUser>,
    policy: PasswordPolicy,
    iterations: u32,
}

impl CredentialStore {
    /// File name of the user collection inside the vault directory.
    pub const FILE_NAME: &'static str = "users.json";

    /// Load the store from `<vault_dir>/users.json`.
    ///
    /// A missing file yields an empty store; a corrupt file is an error.
    pub fn load(vault_dir: &Path, policy: PasswordPolicy, iterations: u32) -> Result<Self> {
        let path = vault_dir.join(Self::FILE_NAME);
        let users = storage::load_collection(&path)?;
        Ok(Self {
            path,
            users,
            policy,
            iterations,
        })
    }

    /// Register a new user.
    ///
    /// Validates the username and the password policy, requires the
    /// confirmation to match, and rejects duplicate usernames.  On
    /// success the whole collection is persisted.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> Result<()> {
        validate_username(username)?;
        validate_password(password, &self.policy)?;
        if password != confirm {
            return Err(DataVaultError::PasswordMismatch);
        }
        if self.users.contains_key(username) {
            return Err(DataVaultError::DuplicateUser(username.to_string()));
        }

        let salt = generate_salt();
        let verifier = derive_verifier(password.as_bytes(), &salt, self.iterations);

        self.users.insert(
            username.to_string(),
            StoredUser {
                username: username.to_string(),
                salt: salt.to_vec(),
                verifier,
                created_at: Utc::now(),
            },
        );

        self.save()
    }

    /// Check a username/password pair.
    ///
    /// An unknown username and a wrong password both yield
    /// `InvalidCredentials` — callers cannot probe for registered names.
    pub fn verify(&self, username: &str, password: &str) -> Result<()> {
        let user = self
            .users
            .get(username)
            .ok_or(DataVaultError::InvalidCredentials)?;

        if verify_password(password.as_bytes(), &user.salt, self.iterations, &user.verifier) {
            Ok(())
        } else {
            Err(DataVaultError::InvalidCredentials)
        }
    }

    /// Replace a user's salt and verifier with ones derived from a new
    /// password.
    ///
    /// Vault records stay decryptable: their keys derive from the
    /// per-record secret, never from the login password.
    pub fn reset_password(&mut self, username: &str, new_password: &str) -> Result<()> {
        validate_password(new_password, &self.policy)?;

        let iterations = self.iterations;
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| DataVaultError::UserNotFound(username.to_string()))?;

        let salt = generate_salt();
        user.verifier = derive_verifier(new_password.as_bytes(), &salt, iterations);
        user.salt = salt.to_vec();

        self.save()
    }

    /// Returns `true` if a user with this name exists.
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn save(&self) -> Result<()> {
        storage::save_collection(&self.path, &self.users)
    }
}

/// Validate that a username is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens, underscores.  Must not
/// be empty or longer than 32 characters.
pub fn validate_username(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DataVaultError::InvalidUsername(
            "username cannot be empty".into(),
        ));
    }

    if name.len() > MAX_USERNAME_LEN {
        return Err(DataVaultError::InvalidUsername(format!(
            "username cannot exceed {MAX_USERNAME_LEN} characters"
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(DataVaultError::InvalidUsername(format!(
            "username '{name}' is invalid — only lowercase letters, digits, hyphens, and underscores are allowed"
        )));
    }

    Ok(())
}
