//! Activity log — append-only per-user operation history.
//!
//! Every operation (success or failure) appends one entry.  Entries are
//! never edited or deleted, and append order is chronological order.
//! The whole list persists as one JSON document (`logs.json`) rewritten
//! on each append.  No pagination, filtering, or retention policy —
//! unbounded growth is accepted.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::storage;

/// Everything a log entry can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Register,
    Login,
    FailedLogin,
    StoreData,
    RetrieveData,
    FailedRetrieve,
    DeleteData,
    FailedDelete,
    Logout,
    Lockout,
    PasswordReset,
}

/// A single activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub user: String,
    pub action: Action,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

/// Append-only activity log backed by `logs.json`.
#[derive(Debug)]
pub struct ActivityLog {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    /// File name of the log collection inside the vault directory.
    pub const FILE_NAME: &'static str = "logs.json";

    /// Load the log from `<vault_dir>/logs.json`.
    ///
    /// A missing file yields an empty log; a corrupt file is an error.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let path = vault_dir.join(Self::FILE_NAME);
        let entries = storage::load_collection(&path)?;
        Ok(Self { path, entries })
    }

    /// Append one entry and persist the whole log.
    pub fn append(&mut self, user: &str, action: Action, details: &str) -> Result<()> {
        self.entries.push(LogEntry {
            user: user.to_string(),
            action,
            timestamp: Utc::now(),
            details: details.to_string(),
        });
        storage::save_collection(&self.path, &self.entries)
    }

    /// All entries for one user, in append order.
    pub fn query(&self, user: &str) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.user == user).collect()
    }

    /// Every entry across all users, in append order (admin variant).
    pub fn query_all(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_on_empty_dir_gives_empty_log() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::load(dir.path()).unwrap();
        assert!(log.query_all().is_empty());
    }

    #[test]
    fn append_and_query_preserve_order() {
        let dir = TempDir::new().unwrap();
        let mut log = ActivityLog::load(dir.path()).unwrap();

        log.append("alice", Action::Register, "account created").unwrap();
        log.append("alice", Action::Login, "").unwrap();
        log.append("alice", Action::StoreData, "record abc123").unwrap();

        let entries = log.query("alice");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].action, Action::Register);
        assert_eq!(entries[1].action, Action::Login);
        assert_eq!(entries[2].action, Action::StoreData);
    }

    #[test]
    fn query_filters_by_user() {
        let dir = TempDir::new().unwrap();
        let mut log = ActivityLog::load(dir.path()).unwrap();

        log.append("alice", Action::Login, "").unwrap();
        log.append("bob", Action::FailedLogin, "").unwrap();
        log.append("alice", Action::Logout, "").unwrap();

        assert_eq!(log.query("alice").len(), 2);
        assert_eq!(log.query("bob").len(), 1);
        assert_eq!(log.query_all().len(), 3);
    }

    #[test]
    fn entries_survive_reload() {
        let dir = TempDir::new().unwrap();
        {
            let mut log = ActivityLog::load(dir.path()).unwrap();
            log.append("alice", Action::Login, "").unwrap();
            log.append("alice", Action::Lockout, "3 failed attempts").unwrap();
        }

        let log = ActivityLog::load(dir.path()).unwrap();
        let entries = log.query("alice");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, Action::Lockout);
        assert_eq!(entries[1].details, "3 failed attempts");
    }
}
