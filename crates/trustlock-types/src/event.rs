//! Ledger events for the TrustLock audit trail.
//!
//! Every committed mutating operation appends one [`LedgerEvent`] to the
//! ledger's append-only log. Rejected operations emit nothing: the log
//! only ever records state that actually exists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset};

/// A committed ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A deposit was converted and recorded as a new entry.
    NewSwap {
        depositor: AccountId,
        asset: Asset,
        unlocker: AccountId,
        /// Target-asset quantity credited by the exchange adapter.
        amount: Decimal,
    },
    /// An entry's unlocker granted early release.
    Unlocked {
        depositor: AccountId,
        asset: Asset,
        entry_index: usize,
    },
    /// The depositor withdrew eligible entries.
    UserWithdraw {
        depositor: AccountId,
        asset: Asset,
        amount: Decimal,
    },
    /// An unlocker claimed entries it was named on.
    UnlockerWithdraw {
        unlocker: AccountId,
        depositor: AccountId,
        asset: Asset,
        amount: Decimal,
    },
}

impl LedgerEvent {
    /// Event kind as a stable SCREAMING_SNAKE label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewSwap { .. } => "NEW_SWAP",
            Self::Unlocked { .. } => "UNLOCKED",
            Self::UserWithdraw { .. } => "USER_WITHDRAW",
            Self::UnlockerWithdraw { .. } => "UNLOCKER_WITHDRAW",
        }
    }
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}
