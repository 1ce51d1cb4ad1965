//! # trustlock-exchange
//!
//! The conversion seam between native currency and ledger assets.
//!
//! A deposit hands its full native amount to an [`ExchangeAdapter`], which
//! either reports the exact target-asset quantity now held in the ledger's
//! custody, or fails the whole deposit. The adapter is the only external
//! call in the deposit flow; the ledger never records an entry for a failed
//! conversion.
//!
//! [`FixedRateExchange`] is the deterministic implementation used by tests
//! and demos: a per-asset rate table over an optional finite liquidity pool.

pub mod adapter;
pub mod fixed_rate;

pub use adapter::ExchangeAdapter;
pub use fixed_rate::FixedRateExchange;
