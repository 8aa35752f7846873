//! Economy ledger tracking player currency and passive accrual.

use std::time::Duration;

/// Tracks the player's currency balance, passive accrual, and spends.
///
/// The ledger is the only mutation path for currency: placements spend
/// through [`Ledger::try_spend`] and the tick pipeline credits through
/// [`Ledger::accrue`]. The balance is unsigned, so it can never be
/// negotiated below zero; spends that would overdraw are rejected rather
/// than clamped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    balance: u32,
    accrual_amount: u32,
    accrual_interval: Duration,
    last_update: Duration,
}

impl Ledger {
    /// Creates a ledger holding the starting balance with the provided
    /// accrual cadence.
    #[must_use]
    pub const fn new(starting_balance: u32, accrual_amount: u32, accrual_interval: Duration) -> Self {
        Self {
            balance: starting_balance,
            accrual_amount,
            accrual_interval,
            last_update: Duration::ZERO,
        }
    }

    /// Current currency balance.
    #[must_use]
    pub const fn balance(&self) -> u32 {
        self.balance
    }

    /// Re-anchors the accrual timer, typically when a battle starts.
    pub(crate) fn anchor(&mut self, now: Duration) {
        self.last_update = now;
    }

    /// Credits the accrual amount when a full interval elapsed since the
    /// last update, returning the credited amount.
    ///
    /// Calling again with the same timestamp is a no-op, which makes the
    /// operation idempotent within a tick.
    pub fn accrue(&mut self, now: Duration) -> Option<u32> {
        if self.accrual_interval.is_zero() {
            return None;
        }
        if now.saturating_sub(self.last_update) < self.accrual_interval {
            return None;
        }

        self.balance = self.balance.saturating_add(self.accrual_amount);
        self.last_update = now;
        Some(self.accrual_amount)
    }

    /// Attempts to deduct `cost` from the balance.
    ///
    /// Returns `false` and leaves the balance unchanged when the balance
    /// does not cover the cost.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.balance < cost {
            return false;
        }
        self.balance -= cost;
        true
    }
}
