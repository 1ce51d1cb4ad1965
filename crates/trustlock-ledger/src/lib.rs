//! # trustlock-ledger
//!
//! The TrustLock core: a conditional-release escrow ledger over
//! per-(depositor, asset) entry lists.
//!
//! ## Architecture
//!
//! 1. **[`EscrowLedger`]**: owns the keyed entry store and every mutating
//!    operation (deposit, authorize, the two withdrawal paths)
//! 2. **[`ConservationTracker`]**: per-slot credit/payout reconciliation —
//!    the safety net behind the no-double-spend guarantee
//!
//! ## Deposit Flow
//!
//! ```text
//! caller → ExchangeAdapter.convert() → SwapEntry appended (LOCKED)
//!        → ConservationTracker.record_credit() → NewSwap event
//! ```
//!
//! A conversion failure aborts the deposit before any ledger state is
//! touched. After creation, each entry is raced for by the unlocker's
//! authorization, the lock-interval timeout, and the unlocker's own claim;
//! the first successful withdrawal consumes it whole.

pub mod conservation;
pub mod ledger;

pub use conservation::ConservationTracker;
pub use ledger::EscrowLedger;
