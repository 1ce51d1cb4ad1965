//! # EscrowLedger — the conditional-release ledger core
//!
//! Owns the (depositor, asset) → entries map and the release-condition
//! state machine. Per entry, three outcomes race:
//!
//! 1. The unlocker authorizes early release (`authorize`)
//! 2. The lock interval elapses (timeout)
//! 3. The unlocker claims the entry for themself (`withdraw_as_unlocker`)
//!
//! Whichever party withdraws first, under its own eligibility rule, wins
//! that entry's funds — this models "whoever claims first gets the funds",
//! not a cooperative split.
//!
//! ## Exact-match withdrawal policy
//!
//! Entries are consumed whole, never split across parties or partial draws.
//! A withdrawal request must exactly equal the summed amount of the
//! eligible prefix it consumes (eligible entries walked in creation order);
//! anything else is rejected with no state change.
//!
//! Every mutating operation takes `&mut self`, so operations are atomic and
//! serialized by construction. Failures return before the first mutation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use trustlock_exchange::ExchangeAdapter;
use trustlock_types::{
    AccountId, Asset, Clock, EntryState, LedgerEvent, LockConfig, Result, SwapEntry, SystemClock,
    TrustlockError, WithdrawPath,
};

use crate::conservation::ConservationTracker;

/// The escrow ledger: keyed entry store plus the authorization/withdrawal
/// state machine. No ambient state — callers hold the ledger by handle and
/// pass it into every operation.
pub struct EscrowLedger {
    config: LockConfig,
    /// Per-(depositor, asset) entries; insertion order = creation order.
    slots: HashMap<(AccountId, Asset), Vec<SwapEntry>>,
    conservation: ConservationTracker,
    /// Append-only audit log of committed operations.
    events: Vec<LedgerEvent>,
    clock: Box<dyn Clock>,
}

impl EscrowLedger {
    /// A ledger on wall-clock time.
    #[must_use]
    pub fn new(config: LockConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// A ledger with an injected time source.
    #[must_use]
    pub fn with_clock(config: LockConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            slots: HashMap::new(),
            conservation: ConservationTracker::new(),
            events: Vec::new(),
            clock,
        }
    }

    /// Convert `native_amount` through the exchange adapter and record the
    /// output as a new locked entry naming `unlocker`.
    ///
    /// The adapter call is the only external call in the flow; if it fails
    /// the whole deposit fails atomically — no entry is created and no
    /// value is retained. Returns the new entry's index in the slot.
    ///
    /// # Errors
    /// - [`TrustlockError::InvalidDeposit`] if `native_amount` is not positive
    /// - [`TrustlockError::ConversionFailed`] if the adapter fails or
    ///   reports a non-positive output
    pub fn deposit_and_convert(
        &mut self,
        exchange: &mut dyn ExchangeAdapter,
        depositor: AccountId,
        asset: &str,
        unlocker: AccountId,
        native_amount: Decimal,
    ) -> Result<usize> {
        if native_amount <= Decimal::ZERO {
            return Err(TrustlockError::InvalidDeposit {
                reason: format!("native amount must be positive, got {native_amount}"),
            });
        }

        let credited = exchange.convert(native_amount, asset)?;
        if credited <= Decimal::ZERO {
            return Err(TrustlockError::ConversionFailed {
                reason: format!("adapter reported non-positive output {credited} for {asset}"),
            });
        }

        let created_at = self.clock.now();
        let entries = self
            .slots
            .entry((depositor, asset.to_string()))
            .or_default();
        entries.push(SwapEntry::new(credited, unlocker, created_at));
        let index = entries.len() - 1;

        self.conservation.record_credit(depositor, asset, credited);
        self.events.push(LedgerEvent::NewSwap {
            depositor,
            asset: asset.to_string(),
            unlocker,
            amount: credited,
        });
        tracing::info!(
            %depositor,
            asset,
            %unlocker,
            %credited,
            index,
            "deposit converted and recorded"
        );
        Ok(index)
    }

    /// Grant early release on one entry. Only the entry's recorded unlocker
    /// may call this; re-authorizing an already-unlocked entry is not an
    /// error but has no further effect.
    ///
    /// # Errors
    /// - [`TrustlockError::EntryIndexOutOfRange`] for an unknown slot or index
    /// - [`TrustlockError::NoAuthorization`] if `caller` is not the unlocker
    /// - [`TrustlockError::EntryAlreadyPaid`] if the entry is terminal
    pub fn authorize(
        &mut self,
        caller: AccountId,
        depositor: AccountId,
        asset: &str,
        index: usize,
    ) -> Result<()> {
        let len = self.entries(depositor, asset).len();
        let entry = self
            .slots
            .get_mut(&(depositor, asset.to_string()))
            .and_then(|entries| entries.get_mut(index))
            .ok_or(TrustlockError::EntryIndexOutOfRange { index, len })?;

        // Identity check first: a probing caller learns nothing about the
        // entry's state.
        if entry.unlocker != caller {
            return Err(TrustlockError::NoAuthorization);
        }
        if entry.is_paid() {
            return Err(TrustlockError::EntryAlreadyPaid { index });
        }
        if entry.is_unlocked() {
            return Ok(());
        }
        entry.mark_unlocked()?;

        self.events.push(LedgerEvent::Unlocked {
            depositor,
            asset: asset.to_string(),
            entry_index: index,
        });
        tracing::debug!(%depositor, asset, index, "entry unlocked");
        Ok(())
    }

    /// Withdraw `amount` of `asset` as the depositor.
    ///
    /// Eligible entries are those that are unpaid and either unlocked or
    /// past the lock interval. The request must exactly equal the summed
    /// amount of the eligible prefix in creation order; the consumed
    /// entries become `PaidToDepositor`.
    ///
    /// # Errors
    /// [`TrustlockError::AmountMismatch`] when the request cannot be
    /// matched exactly (including zero eligible balance and over-requests).
    pub fn withdraw_as_depositor(
        &mut self,
        caller: AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<()> {
        let now = self.clock.now();
        let lock_interval = self.config.lock_interval();

        let consumed = {
            let entries = self.slot_mut(caller, asset, WithdrawPath::Depositor, amount)?;
            let candidates: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.depositor_eligible(now, lock_interval))
                .map(|(index, _)| index)
                .collect();

            // Slots the unlocker already claimed from reject with their
            // own message.
            let path = if entries
                .iter()
                .any(|entry| entry.state == EntryState::PaidToUnlocker)
            {
                WithdrawPath::DepositorAfterClaim
            } else {
                WithdrawPath::Depositor
            };

            let consumed = select_exact_prefix(entries, &candidates, amount).ok_or_else(|| {
                TrustlockError::AmountMismatch {
                    path,
                    requested: amount,
                    eligible: candidates.iter().map(|&i| entries[i].amount).sum(),
                }
            })?;

            for &index in &consumed {
                entries[index].mark_paid_to_depositor()?;
            }
            consumed
        };

        self.conservation.record_payout(caller, asset, amount);
        self.events.push(LedgerEvent::UserWithdraw {
            depositor: caller,
            asset: asset.to_string(),
            amount,
        });
        tracing::info!(
            depositor = %caller,
            asset,
            %amount,
            entries = consumed.len(),
            "depositor withdrawal settled"
        );
        Ok(())
    }

    /// Withdraw `amount` of `asset` from `depositor`'s slot as an unlocker.
    ///
    /// Claims ignore both the unlock state and the timeout: any unpaid
    /// entry naming `caller` as unlocker is claimable until the depositor
    /// withdraws it first. The exact-match prefix rule applies over the
    /// caller's claimable entries; the consumed entries become
    /// `PaidToUnlocker`.
    ///
    /// # Errors
    /// [`TrustlockError::AmountMismatch`] when the caller is not the
    /// unlocker of a matching set of still-unpaid entries.
    pub fn withdraw_as_unlocker(
        &mut self,
        caller: AccountId,
        depositor: AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<()> {
        let consumed = {
            let entries = self.slot_mut(depositor, asset, WithdrawPath::Unlocker, amount)?;
            let candidates: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.claimable_by(caller))
                .map(|(index, _)| index)
                .collect();

            let consumed = select_exact_prefix(entries, &candidates, amount).ok_or_else(|| {
                TrustlockError::AmountMismatch {
                    path: WithdrawPath::Unlocker,
                    requested: amount,
                    eligible: candidates.iter().map(|&i| entries[i].amount).sum(),
                }
            })?;

            for &index in &consumed {
                entries[index].mark_paid_to_unlocker()?;
            }
            consumed
        };

        self.conservation.record_payout(depositor, asset, amount);
        self.events.push(LedgerEvent::UnlockerWithdraw {
            unlocker: caller,
            depositor,
            asset: asset.to_string(),
            amount,
        });
        tracing::info!(
            unlocker = %caller,
            %depositor,
            asset,
            %amount,
            entries = consumed.len(),
            "unlocker claim settled"
        );
        Ok(())
    }

    /// All entries for a slot in creation order, paid ones included.
    /// Unknown slots are empty.
    #[must_use]
    pub fn entries(&self, depositor: AccountId, asset: &str) -> &[SwapEntry] {
        self.slots
            .get(&(depositor, asset.to_string()))
            .map_or(&[], Vec::as_slice)
    }

    /// Sum of unpaid entry amounts for a slot.
    #[must_use]
    pub fn outstanding(&self, depositor: AccountId, asset: &str) -> Decimal {
        self.entries(depositor, asset)
            .iter()
            .filter(|entry| !entry.is_paid())
            .map(|entry| entry.amount)
            .sum()
    }

    /// Amount the depositor could withdraw right now.
    #[must_use]
    pub fn depositor_eligible(&self, depositor: AccountId, asset: &str) -> Decimal {
        let now = self.clock.now();
        let lock_interval = self.config.lock_interval();
        self.entries(depositor, asset)
            .iter()
            .filter(|entry| entry.depositor_eligible(now, lock_interval))
            .map(|entry| entry.amount)
            .sum()
    }

    /// Amount `unlocker` could claim from a slot right now.
    #[must_use]
    pub fn unlocker_claimable(
        &self,
        unlocker: AccountId,
        depositor: AccountId,
        asset: &str,
    ) -> Decimal {
        self.entries(depositor, asset)
            .iter()
            .filter(|entry| entry.claimable_by(unlocker))
            .map(|entry| entry.amount)
            .sum()
    }

    /// The configured lock interval.
    #[must_use]
    pub fn lock_interval(&self) -> chrono::Duration {
        self.config.lock_interval()
    }

    /// Committed events since creation (or since the last
    /// [`take_events`](Self::take_events)).
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain the audit log.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Verify the conservation invariant for one slot: lifetime credits
    /// minus lifetime payouts must equal the outstanding unpaid balance.
    ///
    /// # Errors
    /// Returns [`TrustlockError::ConservationViolation`] if the slot does
    /// not reconcile.
    pub fn verify_conservation(&self, depositor: AccountId, asset: &str) -> Result<()> {
        self.conservation
            .verify(depositor, asset, self.outstanding(depositor, asset))
    }

    /// Mutable slot access shared by both withdrawal paths. Rejects
    /// non-positive requests and unknown slots with the same
    /// `AmountMismatch` the matching step would produce.
    fn slot_mut(
        &mut self,
        depositor: AccountId,
        asset: &str,
        path: WithdrawPath,
        requested: Decimal,
    ) -> Result<&mut Vec<SwapEntry>> {
        let mismatch = |eligible| TrustlockError::AmountMismatch {
            path,
            requested,
            eligible,
        };
        if requested <= Decimal::ZERO {
            return Err(mismatch(Decimal::ZERO));
        }
        self.slots
            .get_mut(&(depositor, asset.to_string()))
            .ok_or_else(|| mismatch(Decimal::ZERO))
    }
}

/// Exact-match selection: walk `candidates` (entry indices in creation
/// order) accumulating amounts, and return the prefix that sums to exactly
/// `requested`. `None` when the running total overshoots the request or
/// exhausts below it.
fn select_exact_prefix(
    entries: &[SwapEntry],
    candidates: &[usize],
    requested: Decimal,
) -> Option<Vec<usize>> {
    let mut total = Decimal::ZERO;
    let mut selection = Vec::new();
    for &index in candidates {
        total += entries[index].amount;
        selection.push(index);
        if total == requested {
            return Some(selection);
        }
        if total > requested {
            return None;
        }
    }
    None
}
