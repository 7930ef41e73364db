use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in DataVault.
#[derive(Debug, Error)]
pub enum DataVaultError {
    // --- Password policy / registration errors ---
    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    // --- Authentication errors ---
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Not logged in — authenticate first")]
    NotLoggedIn,

    #[error("Account locked — try again in {seconds_left}s")]
    LockedOut { seconds_left: i64 },

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong secret or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Record '{0}' not found")]
    RecordNotFound(String),

    // --- Store errors ---
    #[error("Corrupt store file {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for DataVault results.
pub type Result<T> = std::result::Result<T, DataVaultError>;
