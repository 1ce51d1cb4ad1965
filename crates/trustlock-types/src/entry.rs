//! # SwapEntry — one deposit's lifecycle record
//!
//! A `SwapEntry` is appended to a (depositor, asset) slot when a deposit is
//! converted. From then on, three outcomes race for its amount: unlocker
//! authorization, the lock-interval timeout, and a direct unlocker claim.
//!
//! ## State Machine
//!
//! ```text
//!                authorize
//!   ┌────────┐ ───────────▶ ┌──────────┐
//!   │ LOCKED │              │ UNLOCKED │
//!   └───┬────┘              └────┬─────┘
//!       │  withdraw                │  withdraw
//!       │  (either party,          │  (either party)
//!       │   under its rule)        │
//!       ▼                          ▼
//!   ┌───────────────────┐  ┌──────────────────┐
//!   │ PAID_TO_DEPOSITOR │  │ PAID_TO_UNLOCKER │
//!   └───────────────────┘  └──────────────────┘
//! ```
//!
//! Both paid states are terminal and reachable from both non-terminal
//! states. An entry backs at most one payout across its lifetime: the
//! monotonic transition into a paid state is what prevents double-spend.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// Type alias for asset identifiers (e.g., "DAI", "USDT").
pub type Asset = String;

/// The lifecycle state of a swap entry.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Locked → Unlocked` (the unlocker authorized early release)
/// - `Locked | Unlocked → PaidToDepositor` (depositor withdrew)
/// - `Locked | Unlocked → PaidToUnlocker` (unlocker claimed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryState {
    /// Awaiting authorization or timeout. Claimable by the unlocker.
    Locked,
    /// Authorization granted; the depositor may withdraw immediately.
    Unlocked,
    /// The depositor withdrew this entry's amount. **Irreversible.**
    PaidToDepositor,
    /// The unlocker claimed this entry's amount. **Irreversible.**
    PaidToUnlocker,
}

impl EntryState {
    /// Can this entry transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Locked,
                Self::Unlocked | Self::PaidToDepositor | Self::PaidToUnlocker
            ) | (Self::Unlocked, Self::PaidToDepositor | Self::PaidToUnlocker)
        )
    }

    /// Whether this is a terminal paid state.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::PaidToDepositor | Self::PaidToUnlocker)
    }
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locked => write!(f, "LOCKED"),
            Self::Unlocked => write!(f, "UNLOCKED"),
            Self::PaidToDepositor => write!(f, "PAID_TO_DEPOSITOR"),
            Self::PaidToUnlocker => write!(f, "PAID_TO_UNLOCKER"),
        }
    }
}

/// One deposit's ledger record: the converted amount, the single identity
/// permitted to authorize or claim it, and where it is in the lifecycle.
///
/// Paid entries stay in their slot so indices remain stable for
/// `authorize`, but every eligible-balance computation skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEntry {
    /// Target-asset quantity credited at conversion time. Fixed at creation;
    /// consumed whole by exactly one payout.
    pub amount: Decimal,
    /// The only identity allowed to authorize or self-claim this entry.
    pub unlocker: AccountId,
    /// When the deposit was recorded. Immutable; anchors the timeout.
    pub created_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub state: EntryState,
}

impl SwapEntry {
    /// A fresh entry in the `Locked` state.
    #[must_use]
    pub fn new(amount: Decimal, unlocker: AccountId, created_at: DateTime<Utc>) -> Self {
        Self {
            amount,
            unlocker,
            created_at,
            state: EntryState::Locked,
        }
    }

    /// Whether this entry has been paid out to either party.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.state.is_paid()
    }

    /// Whether authorization has been granted.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.state == EntryState::Unlocked
    }

    /// Whether the depositor may withdraw this entry at `now`: unpaid, and
    /// either authorized or past the lock interval.
    #[must_use]
    pub fn depositor_eligible(&self, now: DateTime<Utc>, lock_interval: Duration) -> bool {
        !self.is_paid() && (self.is_unlocked() || now - self.created_at >= lock_interval)
    }

    /// Whether `caller` may claim this entry directly. Ignores both the
    /// unlock state and the timeout: the unlocker's claim right holds until
    /// the depositor withdraws first.
    #[must_use]
    pub fn claimable_by(&self, caller: AccountId) -> bool {
        !self.is_paid() && self.unlocker == caller
    }

    /// Attempt the `Locked → Unlocked` transition.
    ///
    /// # Errors
    /// Returns [`crate::TrustlockError::InvalidTransition`] if the entry is
    /// not in the `Locked` state.
    pub fn mark_unlocked(&mut self) -> crate::Result<()> {
        self.transition(EntryState::Unlocked)
    }

    /// Attempt the transition into `PaidToDepositor`.
    ///
    /// # Errors
    /// Returns [`crate::TrustlockError::InvalidTransition`] if already paid.
    pub fn mark_paid_to_depositor(&mut self) -> crate::Result<()> {
        self.transition(EntryState::PaidToDepositor)
    }

    /// Attempt the transition into `PaidToUnlocker`.
    ///
    /// # Errors
    /// Returns [`crate::TrustlockError::InvalidTransition`] if already paid.
    pub fn mark_paid_to_unlocker(&mut self) -> crate::Result<()> {
        self.transition(EntryState::PaidToUnlocker)
    }

    fn transition(&mut self, target: EntryState) -> crate::Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(crate::TrustlockError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }
}
