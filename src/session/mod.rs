//! Session/auth controller — the orchestration layer.
//!
//! `SessionController` owns the three collections (users, records,
//! logs), a lockout guard per username, and at most one live session.
//! All vault and history operations are gated twice: the caller must be
//! logged in, and the user's guard must not be locked.
//!
//! Failure accounting follows a simple rule: wrong-credential logins
//! and wrong-secret decryptions increment the guard; a missing record
//! id does not (it proves nothing about the secret).  Any successful
//! authenticated operation resets the counter.  When the guard trips,
//! the session is force-terminated, a single `Lockout` entry is
//! written, and further attempts fail fast without side effects.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::audit::{Action, ActivityLog, LogEntry};
use crate::config::Settings;
use crate::credentials::CredentialStore;
use crate::crypto::password::PasswordPolicy;
use crate::errors::{DataVaultError, Result};
use crate::lockout::LockoutGuard;
use crate::vault::{RecordMetadata, RecordStore};

/// A live authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub started_at: DateTime<Utc>,
}

/// Orchestrates registration, login, vault access, and lockout.
#[derive(Debug)]
pub struct SessionController {
    settings: Settings,
    credentials: CredentialStore,
    records: RecordStore,
    log: ActivityLog,
    guards: HashMap<String, LockoutGuard>,
    session: Option<Session>,
}

impl SessionController {
    /// Load all three collections from `vault_dir` and start with no
    /// session.
    pub fn open(vault_dir: &Path, settings: Settings) -> Result<Self> {
        let policy = PasswordPolicy {
            min_len: settings.password_min_len,
            max_len: settings.password_max_len,
        };
        let credentials = CredentialStore::load(vault_dir, policy, settings.pbkdf2_iterations)?;
        let records = RecordStore::load(vault_dir, settings.argon2_params())?;
        let log = ActivityLog::load(vault_dir)?;

        Ok(Self {
            settings,
            credentials,
            records,
            log,
            guards: HashMap::new(),
            session: None,
        })
    }

    // ------------------------------------------------------------------
    // Auth operations
    // ------------------------------------------------------------------

    /// Register a new user and log `Register`.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> Result<()> {
        self.credentials.register(username, password, confirm)?;
        self.log.append(username, Action::Register, "account created")?;
        Ok(())
    }

    /// Authenticate and start a session.
    ///
    /// Fails fast with `LockedOut` while the user's cooldown is
    /// running; a wrong password counts toward the lockout threshold.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let now = Utc::now();
        self.guard_mut(username).ensure_active(now)?;

        match self.credentials.verify(username, password) {
            Ok(()) => {
                self.guard_mut(username).record_success();
                let session = Session {
                    username: username.to_string(),
                    started_at: now,
                };
                self.session = Some(session.clone());
                self.log.append(username, Action::Login, "")?;
                Ok(session)
            }
            Err(e) => {
                self.log.append(username, Action::FailedLogin, "")?;
                self.note_failure(username, now)?;
                Err(e)
            }
        }
    }

    /// End the current session and log `Logout`.
    ///
    /// Works regardless of lockout state.
    pub fn logout(&mut self) -> Result<()> {
        let session = self.session.take().ok_or(DataVaultError::NotLoggedIn)?;
        self.log.append(&session.username, Action::Logout, "")?;
        Ok(())
    }

    /// Reset a user's password and log `PasswordReset`.
    ///
    /// Record keys derive from per-record secrets, so existing records
    /// remain decryptable after a reset.
    pub fn reset_password(&mut self, username: &str, new_password: &str) -> Result<()> {
        let now = Utc::now();
        self.guard_mut(username).ensure_active(now)?;

        self.credentials.reset_password(username, new_password)?;
        self.log.append(username, Action::PasswordReset, "")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vault operations (require a live, unlocked session)
    // ------------------------------------------------------------------

    /// Encrypt and store a record for the current user.
    pub fn store_record(&mut self, name: &str, plaintext: &str, secret: &str) -> Result<String> {
        let username = self.require_active_session()?;

        let id = self.records.store_record(&username, name, plaintext, secret)?;
        self.guard_mut(&username).record_success();
        self.log
            .append(&username, Action::StoreData, &format!("record {id}"))?;
        Ok(id)
    }

    /// Decrypt a record for the current user.
    ///
    /// A wrong secret increments the lockout guard; success resets it.
    pub fn retrieve_record(&mut self, record_id: &str, secret: &str) -> Result<String> {
        let username = self.require_active_session()?;
        let now = Utc::now();

        match self.records.retrieve_record(&username, record_id, secret) {
            Ok(plaintext) => {
                self.guard_mut(&username).record_success();
                self.log
                    .append(&username, Action::RetrieveData, &format!("record {record_id}"))?;
                Ok(plaintext)
            }
            Err(e) => {
                self.log
                    .append(&username, Action::FailedRetrieve, &format!("record {record_id}"))?;
                if matches!(e, DataVaultError::DecryptionFailed) {
                    self.note_failure(&username, now)?;
                }
                Err(e)
            }
        }
    }

    /// Delete a record after re-verifying the secret.
    pub fn delete_record(&mut self, record_id: &str, secret: &str) -> Result<()> {
        let username = self.require_active_session()?;
        let now = Utc::now();

        match self.records.delete_record(&username, record_id, secret) {
            Ok(()) => {
                self.guard_mut(&username).record_success();
                self.log
                    .append(&username, Action::DeleteData, &format!("record {record_id}"))?;
                Ok(())
            }
            Err(e) => {
                self.log
                    .append(&username, Action::FailedDelete, &format!("record {record_id}"))?;
                if matches!(e, DataVaultError::DecryptionFailed) {
                    self.note_failure(&username, now)?;
                }
                Err(e)
            }
        }
    }

    /// List the current user's record metadata.
    pub fn list_records(&mut self) -> Result<Vec<RecordMetadata>> {
        let username = self.require_active_session()?;
        Ok(self.records.list_records(&username))
    }

    /// The current user's activity history, oldest first.
    pub fn history(&mut self) -> Result<Vec<LogEntry>> {
        let username = self.require_active_session()?;
        Ok(self.log.query(&username).into_iter().cloned().collect())
    }

    /// Every user's activity history, oldest first (admin variant).
    pub fn history_all(&self) -> &[LogEntry] {
        self.log.query_all()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Username of the current session, if any.
    pub fn current_user(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    /// Whether a session is live.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Confirm there is a session and its user is not locked out.
    fn require_active_session(&mut self) -> Result<String> {
        let username = self
            .session
            .as_ref()
            .map(|s| s.username.clone())
            .ok_or(DataVaultError::NotLoggedIn)?;

        let now = Utc::now();
        self.guard_mut(&username).ensure_active(now)?;
        Ok(username)
    }

    /// Count a failure; on threshold, end the session and log `Lockout`.
    fn note_failure(&mut self, username: &str, now: DateTime<Utc>) -> Result<()> {
        let threshold = self.settings.lockout_threshold;
        if self.guard_mut(username).record_failure(now) {
            self.session = None;
            self.log.append(
                username,
                Action::Lockout,
                &format!("{threshold} consecutive failures"),
            )?;
        }
        Ok(())
    }

    fn guard_mut(&mut self, username: &str) -> &mut LockoutGuard {
        let policy = self.settings.lockout_policy();
        self.guards
            .entry(username.to_string())
            .or_insert_with(|| LockoutGuard::new(policy))
    }

    #[cfg(test)]
    pub(crate) fn guard_for_test(&mut self, username: &str) -> &mut LockoutGuard {
        self.guard_mut(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Fast-but-valid crypto params so the tests stay quick.
    fn test_settings() -> Settings {
        Settings {
            argon2_memory_kib: 8_192,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..Settings::default()
        }
    }

    fn controller(dir: &std::path::Path) -> SessionController {
        SessionController::open(dir, test_settings()).unwrap()
    }

    fn login_alice(ctl: &mut SessionController) {
        ctl.register("alice", "Ab1!2345", "Ab1!2345").unwrap();
        ctl.login("alice", "Ab1!2345").unwrap();
    }

    #[test]
    fn vault_operations_require_login() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());

        let err = ctl.store_record("note", "hello", "pin1234").unwrap_err();
        assert!(matches!(err, DataVaultError::NotLoggedIn));
        let err = ctl.retrieve_record("deadbeef00000000", "pin1234").unwrap_err();
        assert!(matches!(err, DataVaultError::NotLoggedIn));
        let err = ctl.history().unwrap_err();
        assert!(matches!(err, DataVaultError::NotLoggedIn));
    }

    #[test]
    fn three_wrong_secrets_lock_and_end_the_session() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());
        login_alice(&mut ctl);

        let id = ctl.store_record("note", "hello", "pin1234").unwrap();

        for _ in 0..3 {
            let err = ctl.retrieve_record(&id, "wrongpin").unwrap_err();
            assert!(matches!(err, DataVaultError::DecryptionFailed));
        }

        // Session was force-terminated by the lockout.
        assert!(!ctl.is_logged_in());

        // Logging back in fails fast while the cooldown runs.
        let err = ctl.login("alice", "Ab1!2345").unwrap_err();
        assert!(matches!(err, DataVaultError::LockedOut { .. }));

        // The log holds exactly one Lockout entry and nothing for the
        // blocked login attempt.
        let lockouts = ctl
            .history_all()
            .iter()
            .filter(|e| e.action == Action::Lockout)
            .count();
        assert_eq!(lockouts, 1);
    }

    #[test]
    fn cooldown_expiry_restores_access_and_resets_counter() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());
        login_alice(&mut ctl);

        let id = ctl.store_record("note", "hello", "pin1234").unwrap();
        for _ in 0..3 {
            let _ = ctl.retrieve_record(&id, "wrongpin");
        }

        // Rewind the lockout so it has already expired.
        let past = Utc::now() - chrono::Duration::seconds(1);
        ctl.guard_for_test("alice").set_locked_until(Some(past));

        ctl.login("alice", "Ab1!2345").unwrap();
        assert_eq!(ctl.retrieve_record(&id, "pin1234").unwrap(), "hello");
        assert_eq!(ctl.guard_for_test("alice").failed_count(), 0);
    }

    #[test]
    fn failed_logins_count_toward_lockout() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());
        ctl.register("alice", "Ab1!2345", "Ab1!2345").unwrap();

        for _ in 0..3 {
            let err = ctl.login("alice", "Ab1!9999").unwrap_err();
            assert!(matches!(err, DataVaultError::InvalidCredentials));
        }

        let err = ctl.login("alice", "Ab1!2345").unwrap_err();
        assert!(matches!(err, DataVaultError::LockedOut { .. }));
    }

    #[test]
    fn missing_record_does_not_count_toward_lockout() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());
        login_alice(&mut ctl);

        for _ in 0..5 {
            let err = ctl
                .retrieve_record("deadbeef00000000", "pin1234")
                .unwrap_err();
            assert!(matches!(err, DataVaultError::RecordNotFound(_)));
        }

        // Still logged in, still unlocked.
        assert!(ctl.is_logged_in());
        assert_eq!(ctl.guard_for_test("alice").failed_count(), 0);
    }

    #[test]
    fn logout_clears_session_and_logs() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());
        login_alice(&mut ctl);

        assert_eq!(ctl.current_user(), Some("alice"));
        ctl.logout().unwrap();
        assert!(!ctl.is_logged_in());

        let err = ctl.logout().unwrap_err();
        assert!(matches!(err, DataVaultError::NotLoggedIn));
    }

    #[test]
    fn lockout_is_per_user() {
        let dir = TempDir::new().unwrap();
        let mut ctl = controller(dir.path());
        ctl.register("alice", "Ab1!2345", "Ab1!2345").unwrap();
        ctl.register("bob", "Xy9?8765", "Xy9?8765").unwrap();

        for _ in 0..3 {
            let _ = ctl.login("alice", "Ab1!0000");
        }
        assert!(matches!(
            ctl.login("alice", "Ab1!2345").unwrap_err(),
            DataVaultError::LockedOut { .. }
        ));

        // Bob is unaffected.
        ctl.login("bob", "Xy9?8765").unwrap();
    }
}
