//! Escrow conservation invariant checker.
//!
//! Invariant enforced per (depositor, asset) slot:
//! ```text
//! Σ(credited) - Σ(paid out) == Σ(amount of unpaid entries)
//! ```
//!
//! Payouts can never exceed credits. If the equality ever breaks, the
//! ledger has double-spent an entry or leaked value — this is the ultimate
//! safety net behind the per-entry state machine.

use std::collections::HashMap;

use rust_decimal::Decimal;
use trustlock_types::{AccountId, Asset, Result, TrustlockError};

/// Tracks lifetime credits and payouts per (depositor, asset) slot and
/// validates that the ledger's outstanding balance reconciles.
#[derive(Debug, Default)]
pub struct ConservationTracker {
    /// Total credited per slot since ledger creation.
    credited: HashMap<(AccountId, Asset), Decimal>,
    /// Total paid out per slot since ledger creation.
    paid_out: HashMap<(AccountId, Asset), Decimal>,
}

impl ConservationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a credit (deposit conversion output).
    pub fn record_credit(&mut self, depositor: AccountId, asset: &str, amount: Decimal) {
        *self
            .credited
            .entry((depositor, asset.to_string()))
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Record a payout (withdrawal by either party).
    pub fn record_payout(&mut self, depositor: AccountId, asset: &str, amount: Decimal) {
        *self
            .paid_out
            .entry((depositor, asset.to_string()))
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Lifetime credits for a slot.
    #[must_use]
    pub fn total_credited(&self, depositor: AccountId, asset: &str) -> Decimal {
        self.credited
            .get(&(depositor, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Lifetime payouts for a slot.
    #[must_use]
    pub fn total_paid_out(&self, depositor: AccountId, asset: &str) -> Decimal {
        self.paid_out
            .get(&(depositor, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Expected outstanding balance for a slot: credited - paid out.
    #[must_use]
    pub fn expected_outstanding(&self, depositor: AccountId, asset: &str) -> Decimal {
        self.total_credited(depositor, asset) - self.total_paid_out(depositor, asset)
    }

    /// Verify that the actual outstanding balance (sum of unpaid entry
    /// amounts) matches the expected outstanding balance for a slot.
    ///
    /// # Errors
    /// Returns [`TrustlockError::ConservationViolation`] if they diverge.
    pub fn verify(
        &self,
        depositor: AccountId,
        asset: &str,
        actual_outstanding: Decimal,
    ) -> Result<()> {
        let expected = self.expected_outstanding(depositor, asset);
        if actual_outstanding != expected {
            return Err(TrustlockError::ConservationViolation {
                reason: format!(
                    "slot ({depositor}, {asset}): outstanding {actual_outstanding} != expected \
                     {expected} (credited={}, paid_out={})",
                    self.total_credited(depositor, asset),
                    self.total_paid_out(depositor, asset),
                ),
            });
        }
        Ok(())
    }
}
