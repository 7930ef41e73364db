//! High-level vault record operations.
//!
//! `RecordStore` maps each username to its ordered list of encrypted
//! records, persisted as `records.json`.  Every mutation rewrites the
//! whole collection.
//!
//! Each record is encrypted under a key derived from the caller's
//! record secret (independent of the login password) with a fresh
//! per-record salt, so neither the store nor the credential verifier
//! can decrypt anything on its own.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_record_key, generate_salt, Argon2Params};
use crate::errors::{DataVaultError, Result};
use crate::storage;

use super::record::{RecordMetadata, VaultRecord};

/// Length of a record id in hex characters (64 random bits).
const RECORD_ID_LEN: usize = 16;

/// Username → ordered record list, backed by `records.json`.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: BTreeMap<String, Vec<VaultRecord>>,
    argon2_params: Argon2Params,
}

impl RecordStore {
    /// File name of the record collection inside the vault directory.
    pub const FILE_NAME: &'static str = "records.json";

    /// Load the store from `<vault_dir>/records.json`.
    ///
    /// A missing file yields an empty store; a corrupt file is an error.
    pub fn load(vault_dir: &Path, argon2_params: Argon2Params) -> Result<Self> {
        let path = vault_dir.join(Self::FILE_NAME);
        let records = storage::load_collection(&path)?;
        Ok(Self {
            path,
            records,
            argon2_params,
        })
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` under `secret` and append a new record.
    ///
    /// A fresh unique id and salt are generated; an existing record is
    /// never overwritten.  Returns the new record's id.
    pub fn store_record(
        &mut self,
        username: &str,
        name: &str,
        plaintext: &str,
        secret: &str,
    ) -> Result<String> {
        let id = self.fresh_record_id(username);
        let salt = generate_salt();

        let mut key = derive_record_key(secret.as_bytes(), &salt, &id, &self.argon2_params)?;
        let ciphertext = encrypt(&key, plaintext.as_bytes());
        key.zeroize();

        let record = VaultRecord {
            id: id.clone(),
            name: name.to_string(),
            salt: salt.to_vec(),
            ciphertext: ciphertext?,
            created_at: Utc::now(),
        };

        self.records.entry(username.to_string()).or_default().push(record);
        self.save()?;

        Ok(id)
    }

    /// Decrypt and return the plaintext of a record.
    ///
    /// A wrong secret and a corrupted ciphertext are indistinguishable:
    /// both surface as `DecryptionFailed`.
    pub fn retrieve_record(&self, username: &str, record_id: &str, secret: &str) -> Result<String> {
        let record = self.find_record(username, record_id)?;

        let mut key =
            derive_record_key(secret.as_bytes(), &record.salt, &record.id, &self.argon2_params)?;
        let plaintext_bytes = decrypt(&key, &record.ciphertext);
        key.zeroize();

        // On UTF-8 error, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext_bytes?).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            DataVaultError::SerializationError("record payload is not valid UTF-8".to_string())
        })
    }

    /// Remove a record after re-verifying the secret.
    ///
    /// The secret check is decrypt-or-fail with the same semantics as
    /// `retrieve_record` — no separate verification oracle.
    pub fn delete_record(&mut self, username: &str, record_id: &str, secret: &str) -> Result<()> {
        // Proves the caller holds the secret (or fails opaquely).
        self.retrieve_record(username, record_id, secret)?;

        let list = self
            .records
            .get_mut(username)
            .ok_or_else(|| DataVaultError::RecordNotFound(record_id.to_string()))?;
        list.retain(|r| r.id != record_id);

        self.save()
    }

    /// List metadata for one user's records, in storage order.
    pub fn list_records(&self, username: &str) -> Vec<RecordMetadata> {
        self.records
            .get(username)
            .map(|list| {
                list.iter()
                    .map(|r| RecordMetadata {
                        id: r.id.clone(),
                        name: r.name.clone(),
                        created_at: r.created_at,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of records owned by a user.
    pub fn record_count(&self, username: &str) -> usize {
        self.records.get(username).map_or(0, Vec::len)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn find_record(&self, username: &str, record_id: &str) -> Result<&VaultRecord> {
        self.records
            .get(username)
            .and_then(|list| list.iter().find(|r| r.id == record_id))
            .ok_or_else(|| DataVaultError::RecordNotFound(record_id.to_string()))
    }

    /// Generate a random id not already used by this user.
    fn fresh_record_id(&self, username: &str) -> String {
        let existing = self.records.get(username);
        loop {
            let id = format!("{:0width$x}", rand::random::<u64>(), width = RECORD_ID_LEN);
            let taken = existing
                .map(|list| list.iter().any(|r| r.id == id))
                .unwrap_or(false);
            if !taken {
                return id;
            }
        }
    }

    fn save(&self) -> Result<()> {
        storage::save_collection(&self.path, &self.records)
    }
}
