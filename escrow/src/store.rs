//! Pending-balance bookkeeping for one pull-payment store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitz_types::{AccountId, ContractId};

use crate::error::EscrowError;

/// A generic two-phase escrow: deposits accumulate per beneficiary until
/// withdrawn. Beneficiaries need not be registered anywhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PullPaymentStore {
    id: ContractId,
    pending: HashMap<AccountId, u128>,
    total_pending: u128,
}

impl PullPaymentStore {
    pub fn new(id: ContractId) -> Self {
        Self {
            id,
            pending: HashMap::new(),
            total_pending: 0,
        }
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    /// The account holding the escrowed funds.
    pub fn account(&self) -> AccountId {
        self.id.account()
    }

    /// Balance waiting to be withdrawn by `beneficiary`.
    pub fn payments(&self, beneficiary: &AccountId) -> u128 {
        self.pending.get(beneficiary).copied().unwrap_or(0)
    }

    /// Sum of every beneficiary's pending balance.
    pub fn total_pending(&self) -> u128 {
        self.total_pending
    }

    /// Credit `amount` to `beneficiary`. Zero deposits are accepted and change nothing.
    pub fn deposit(&mut self, beneficiary: &AccountId, amount: u128) -> Result<(), EscrowError> {
        let pending = self
            .payments(beneficiary)
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        let total_pending = self
            .total_pending
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        if amount > 0 {
            self.pending.insert(beneficiary.clone(), pending);
            self.total_pending = total_pending;
        }
        tracing::debug!(store = %self.id, %beneficiary, amount, "escrow deposit");
        Ok(())
    }

    /// Zero `beneficiary`'s balance and return what it was.
    ///
    /// The balance is cleared before the caller transfers it out, so a
    /// reentrant withdrawal finds nothing left to take.
    pub fn take_payment(&mut self, beneficiary: &AccountId) -> u128 {
        let payment = self.pending.remove(beneficiary).unwrap_or(0);
        self.total_pending = self.total_pending.saturating_sub(payment);
        payment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PullPaymentStore {
        PullPaymentStore::new(ContractId::new([7u8; 20]))
    }

    #[test]
    fn test_deposits_accumulate_per_beneficiary() {
        let mut store = store();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        store.deposit(&alice, 100).unwrap();
        store.deposit(&alice, 50).unwrap();
        store.deposit(&bob, 20).unwrap();

        assert_eq!(store.payments(&alice), 150);
        assert_eq!(store.payments(&bob), 20);
        assert_eq!(store.total_pending(), 170);
    }

    #[test]
    fn test_take_payment_zeroes_balance() {
        let mut store = store();
        let alice = AccountId::new("alice");
        store.deposit(&alice, 500).unwrap();

        assert_eq!(store.take_payment(&alice), 500);
        assert_eq!(store.payments(&alice), 0);
        assert_eq!(store.total_pending(), 0);
        assert_eq!(store.take_payment(&alice), 0);
    }

    #[test]
    fn test_zero_deposit_is_a_noop() {
        let mut store = store();
        let alice = AccountId::new("alice");
        store.deposit(&alice, 0).unwrap();
        assert_eq!(store.payments(&alice), 0);
        assert_eq!(store.total_pending(), 0);
    }

    #[test]
    fn test_overflowing_deposit_rejected() {
        let mut store = store();
        let alice = AccountId::new("alice");
        store.deposit(&alice, u128::MAX).unwrap();
        assert_eq!(
            store.deposit(&AccountId::new("bob"), 1).unwrap_err(),
            EscrowError::Overflow
        );
        assert_eq!(store.payments(&AccountId::new("bob")), 0);
    }
}
