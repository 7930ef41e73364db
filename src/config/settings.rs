use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DataVaultError, Result};

/// Vault-level configuration, loaded from `.datavault.toml`.
///
/// Every field has a sensible default so DataVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where the vault
    /// data files are stored.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Consecutive failures before the account locks (default: 3).
    #[serde(default = "default_lockout_threshold")]
    pub lockout_threshold: u32,

    /// Lockout cooldown in seconds (default: 30).
    #[serde(default = "default_lockout_cooldown_secs")]
    pub lockout_cooldown_secs: u64,

    /// Minimum password length (default: 8).
    #[serde(default = "default_password_min_len")]
    pub password_min_len: usize,

    /// Maximum password length (default: 12).
    #[serde(default = "default_password_max_len")]
    pub password_max_len: usize,

    /// PBKDF2 iteration count for login verifiers (default: 100 000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Argon2 memory cost in KiB for record keys (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".datavault".to_string()
}

fn default_lockout_threshold() -> u32 {
    3
}

fn default_lockout_cooldown_secs() -> u64 {
    30
}

fn default_password_min_len() -> usize {
    8
}

fn default_password_max_len() -> usize {
    12
}

fn default_pbkdf2_iterations() -> u32 {
    100_000
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            lockout_threshold: default_lockout_threshold(),
            lockout_cooldown_secs: default_lockout_cooldown_secs(),
            password_min_len: default_password_min_len(),
            password_max_len: default_password_max_len(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".datavault.toml";

    /// Load settings from `<project_dir>/.datavault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            DataVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the vault data directory.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> crate::crypto::kdf::Argon2Params {
        crate::crypto::kdf::Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Convert the lockout settings into a guard policy.
    pub fn lockout_policy(&self) -> crate::lockout::LockoutPolicy {
        crate::lockout::LockoutPolicy {
            threshold: self.lockout_threshold,
            cooldown: chrono::Duration::seconds(self.lockout_cooldown_secs as i64),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
