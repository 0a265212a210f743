//! Custody balances and the transfer primitive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitz_types::{AccountId, AssetId};

use crate::error::TransferError;

/// Every account's balance of every asset.
///
/// The bank only moves numbers; recipient hooks and records are the
/// runtime's concern.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Bank {
    balances: HashMap<AccountId, HashMap<AssetId, u128>>,
    supply: HashMap<AssetId, u128>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId, asset: &AssetId) -> u128 {
        self.balances
            .get(account)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(0)
    }

    /// Total amount of `asset` ever minted.
    pub fn total_supply(&self, asset: &AssetId) -> u128 {
        self.supply.get(asset).copied().unwrap_or(0)
    }

    /// Create `amount` of `asset` in `to`'s balance.
    pub fn mint(&mut self, to: &AccountId, asset: &AssetId, amount: u128) -> Result<(), TransferError> {
        let supply = self
            .total_supply(asset)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        let balance = self
            .balance_of(to, asset)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        self.supply.insert(asset.clone(), supply);
        self.set_balance(to, asset, balance);
        Ok(())
    }

    /// Move `amount` of `asset` from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(from, asset);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                account: from.clone(),
                asset: asset.clone(),
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to, asset)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        self.set_balance(from, asset, available - amount);
        self.set_balance(to, asset, credited);
        Ok(())
    }

    fn set_balance(&mut self, account: &AccountId, asset: &AssetId, amount: u128) {
        self.balances
            .entry(account.clone())
            .or_default()
            .insert(asset.clone(), amount);
    }
}
