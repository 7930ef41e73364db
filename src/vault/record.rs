//! VaultRecord and RecordMetadata types stored inside the vault.
//!
//! A record is immutable after creation: updates are delete + recreate.
//! Binary fields use custom serde helpers so they serialize as base64
//! strings in JSON rather than raw byte arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{base64_decode, base64_encode};

/// A single encrypted record owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultRecord {
    /// Unique id within the owning user's collection.
    pub id: String,

    /// Human-readable record name (e.g. "recovery codes").
    pub name: String,

    /// Random salt for the record-key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// The encrypted payload bytes (nonce + ciphertext).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    /// When this record was stored.
    pub created_at: DateTime<Utc>,
}

/// Lightweight metadata about a record (no ciphertext).
///
/// Returned by `RecordStore::list_records` so callers can display
/// record ids and names without touching any ciphertext.
#[derive(Debug, Clone)]
pub struct RecordMetadata {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
