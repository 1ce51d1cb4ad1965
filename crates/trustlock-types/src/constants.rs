//! System-wide constants for the TrustLock escrow ledger.

/// Default lock interval in seconds: how long a depositor must wait before
/// withdrawing an entry that was never authorized.
pub const DEFAULT_LOCK_INTERVAL_SECS: u64 = 60;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "TrustLock";
