//! Configuration for the TrustLock ledger.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Ledger-wide policy parameters, fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Seconds after which a depositor may withdraw an entry without
    /// authorization.
    pub lock_interval_secs: u64,
}

impl LockConfig {
    #[must_use]
    pub fn new(lock_interval_secs: u64) -> Self {
        Self { lock_interval_secs }
    }

    /// The lock interval as a `chrono` duration. Saturates on values too
    /// large to represent.
    #[must_use]
    pub fn lock_interval(&self) -> Duration {
        i64::try_from(self.lock_interval_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lock_interval_secs: constants::DEFAULT_LOCK_INTERVAL_SECS,
        }
    }
}
