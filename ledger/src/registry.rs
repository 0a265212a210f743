//! Immutable payee → share registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitz_types::AccountId;

use crate::error::SplitError;

/// A registered payee and its distribution weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub account: AccountId,
    pub share: u128,
}

impl Payee {
    pub fn new(account: impl Into<AccountId>, share: u128) -> Self {
        Self {
            account: account.into(),
            share,
        }
    }
}

/// The fixed weight vector of one distribution instance.
///
/// Built once; there is no way to add, remove, or reweight a payee afterwards.
/// Every registered share is `> 0` and no account appears twice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareRegistry {
    /// Payees in registration order.
    payees: Vec<Payee>,
    /// Account → position in `payees`.
    index: HashMap<AccountId, usize>,
    total_shares: u128,
}

impl ShareRegistry {
    /// Build a registry from parallel `payees` / `shares` lists.
    pub fn new(payees: Vec<AccountId>, shares: Vec<u128>) -> Result<Self, SplitError> {
        if payees.len() != shares.len() {
            return Err(SplitError::LengthMismatch {
                payees: payees.len(),
                shares: shares.len(),
            });
        }
        Self::from_payees(
            payees
                .into_iter()
                .zip(shares)
                .map(|(account, share)| Payee { account, share })
                .collect(),
        )
    }

    /// Build a registry from an ordered list of payees.
    ///
    /// Fails on the first invalid entry; nothing is constructed on failure.
    pub fn from_payees(payees: Vec<Payee>) -> Result<Self, SplitError> {
        if payees.is_empty() {
            return Err(SplitError::NoPayees);
        }
        let mut index = HashMap::with_capacity(payees.len());
        let mut total_shares: u128 = 0;
        for (position, payee) in payees.iter().enumerate() {
            if !payee.account.is_valid() {
                return Err(SplitError::InvalidAccount(payee.account.to_string()));
            }
            if payee.share == 0 {
                return Err(SplitError::InvalidShare {
                    payee: payee.account.clone(),
                });
            }
            if index.insert(payee.account.clone(), position).is_some() {
                return Err(SplitError::DuplicatePayee(payee.account.clone()));
            }
            total_shares = total_shares
                .checked_add(payee.share)
                .ok_or(SplitError::Overflow)?;
        }
        Ok(Self {
            payees,
            index,
            total_shares,
        })
    }

    /// Share held by `account`; 0 for accounts that are not payees.
    pub fn share_of(&self, account: &AccountId) -> u128 {
        self.index
            .get(account)
            .map(|&i| self.payees[i].share)
            .unwrap_or(0)
    }

    pub fn is_payee(&self, account: &AccountId) -> bool {
        self.index.contains_key(account)
    }

    pub fn total_shares(&self) -> u128 {
        self.total_shares
    }

    /// All payees in registration order.
    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }

    /// The payee registered at `index`, if any.
    pub fn payee(&self, index: usize) -> Option<&Payee> {
        self.payees.get(index)
    }

    pub fn len(&self) -> usize {
        self.payees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payees.is_empty()
    }
}
