//! # trustlock-types
//!
//! Shared types, errors, and configuration for the **TrustLock**
//! conditional-release escrow ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`Asset`]
//! - **Entry model**: [`SwapEntry`], [`EntryState`]
//! - **Events**: [`LedgerEvent`]
//! - **Configuration**: [`LockConfig`]
//! - **Clock**: [`Clock`], [`SystemClock`]
//! - **Errors**: [`TrustlockError`] with `TL_ERR_` prefix codes
//! - **Constants**: system-wide defaults

pub mod clock;
pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod event;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use trustlock_types::{SwapEntry, EntryState, LedgerEvent, ...};

pub use clock::*;
pub use config::*;
pub use entry::*;
pub use error::*;
pub use event::*;
pub use ids::*;

// Constants are accessed via `trustlock_types::constants::FOO`
// (not re-exported to avoid name collisions).
