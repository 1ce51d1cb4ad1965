//! Error types for the TrustLock escrow ledger.
//!
//! All errors use the `TL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Entry errors
//! - 2xx: Authorization errors
//! - 3xx: Deposit / withdrawal errors
//! - 4xx: Conversion errors
//! - 9xx: Invariant violations

use rust_decimal::Decimal;
use thiserror::Error;

use crate::EntryState;

/// Which withdrawal path a rejected request came through. All paths share
/// one error taxonomy; the path only changes the user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WithdrawPath {
    /// The depositor reclaiming entries that are unlocked or timed out.
    Depositor,
    /// The depositor reclaiming a slot whose backing entries were already
    /// claimed by their unlocker.
    DepositorAfterClaim,
    /// The unlocker claiming entries it is named on.
    Unlocker,
}

impl std::fmt::Display for WithdrawPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depositor => write!(f, "depositor"),
            Self::DepositorAfterClaim => write!(f, "depositor (entries claimed by unlocker)"),
            Self::Unlocker => write!(f, "unlocker"),
        }
    }
}

/// Central error enum for all TrustLock operations.
#[derive(Debug, Error)]
pub enum TrustlockError {
    // =================================================================
    // Entry Errors (1xx)
    // =================================================================
    /// The entry index does not exist in that (depositor, asset) slot.
    #[error("TL_ERR_100: entry index {index} out of range (slot holds {len})")]
    EntryIndexOutOfRange { index: usize, len: usize },

    /// The entry was already paid out to one of the parties.
    #[error("TL_ERR_101: entry {index} already paid out")]
    EntryAlreadyPaid { index: usize },

    /// An entry state transition the lifecycle forbids.
    #[error("TL_ERR_102: cannot transition entry from {from} to {to}")]
    InvalidTransition { from: EntryState, to: EntryState },

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// Authorization attempted by an identity other than the entry's unlocker.
    #[error("TL_ERR_200: no authorization: caller is not the entry's unlocker")]
    NoAuthorization,

    // =================================================================
    // Deposit / Withdrawal Errors (3xx)
    // =================================================================
    /// The requested amount cannot be matched exactly against the eligible
    /// unpaid entries. Covers zero eligible balance and over-requests alike.
    #[error(
        "TL_ERR_300: invalid withdraw amount for {path}: requested {requested}, eligible {eligible}"
    )]
    AmountMismatch {
        path: WithdrawPath,
        requested: Decimal,
        eligible: Decimal,
    },

    /// The deposit request itself was invalid (non-positive native amount).
    #[error("TL_ERR_301: invalid deposit: {reason}")]
    InvalidDeposit { reason: String },

    // =================================================================
    // Conversion Errors (4xx)
    // =================================================================
    /// The exchange adapter failed. The whole deposit is aborted; no entry
    /// is created and no value is retained.
    #[error("TL_ERR_400: conversion failed: {reason}")]
    ConversionFailed { reason: String },

    // =================================================================
    // Invariant Violations (9xx)
    // =================================================================
    /// Escrow conservation broke: payouts no longer reconcile with credits.
    #[error("TL_ERR_900: conservation violation: {reason}")]
    ConservationViolation { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TrustlockError>;
