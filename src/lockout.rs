//! Failed-attempt lockout guard.
//!
//! A fixed-threshold, fixed-duration state machine:
//!
//! ```text
//! Active(n)  --failure-->  Active(n+1)
//! Active(_)  --success-->  Active(0)
//! Active(threshold)     -> LockedOut(until = now + cooldown)
//! LockedOut  --now >= until-->  Active(0)
//! ```
//!
//! While locked out, callers must fail immediately with `LockedOut` and
//! not attempt the underlying operation.  There is no exponential
//! backoff and no per-IP tracking.
//!
//! Every method takes `now` explicitly; the controller passes
//! `Utc::now()` and tests drive the clock by hand.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{DataVaultError, Result};

/// Threshold and cooldown for a guard, taken from `Settings`.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Consecutive failures before the lockout trips.
    pub threshold: u32,
    /// How long a lockout lasts.
    pub cooldown: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: 3,
            cooldown: Duration::seconds(30),
        }
    }
}

/// Per-user failed-attempt counter with a cooldown timer.
#[derive(Debug, Clone)]
pub struct LockoutGuard {
    policy: LockoutPolicy,
    failed_count: u32,
    locked_until: Option<DateTime<Utc>>,
}

impl LockoutGuard {
    pub fn new(policy: LockoutPolicy) -> Self {
        Self {
            policy,
            failed_count: 0,
            locked_until: None,
        }
    }

    /// Fail fast if the guard is locked.
    ///
    /// An expired lockout transitions back to `Active(0)` here, so a
    /// caller that passes this check starts with a clean counter.
    pub fn ensure_active(&mut self, now: DateTime<Utc>) -> Result<()> {
        if let Some(until) = self.locked_until {
            if now < until {
                return Err(DataVaultError::LockedOut {
                    seconds_left: (until - now).num_seconds().max(1),
                });
            }
            // Cooldown elapsed.
            self.locked_until = None;
            self.failed_count = 0;
        }
        Ok(())
    }

    /// Record a failed attempt.
    ///
    /// Returns `true` when this failure tripped the threshold and the
    /// guard is now locked — the caller must terminate the session and
    /// write the lockout log entry.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> bool {
        self.failed_count += 1;
        if self.failed_count >= self.policy.threshold {
            self.locked_until = Some(now + self.policy.cooldown);
            true
        } else {
            false
        }
    }

    /// Record a successful operation: the counter resets to zero.
    pub fn record_success(&mut self) {
        self.failed_count = 0;
    }

    /// Current consecutive-failure count.
    pub fn failed_count(&self) -> u32 {
        self.failed_count
    }

    /// Whether the guard is locked at `now`.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if now < until)
    }

    #[cfg(test)]
    pub(crate) fn set_locked_until(&mut self, until: Option<DateTime<Utc>>) {
        self.locked_until = until;
    }
}
