//! Distribution engine: one instance's registry plus its per-asset ledgers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitz_types::{AccountId, AssetId, ContractId};

use crate::asset_ledger::AssetLedger;
use crate::error::SplitError;
use crate::registry::{Payee, ShareRegistry};

/// A payment that has been booked in the ledger and must now be transferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub asset: AssetId,
    pub payee: AccountId,
    pub amount: u128,
}

/// The accounting state of one distribution instance.
///
/// Custody balances are not stored here: every computation takes the
/// instance's current balance of the asset from the caller. Per-asset ledgers
/// are created on first release; an asset never released reads as all-zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionEngine {
    id: ContractId,
    registry: ShareRegistry,
    ledgers: HashMap<AssetId, AssetLedger>,
}

impl DistributionEngine {
    pub fn new(id: ContractId, registry: ShareRegistry) -> Self {
        Self {
            id,
            registry,
            ledgers: HashMap::new(),
        }
    }

    /// Validate `payees`/`shares` and build a fresh engine.
    pub fn with_payees(
        id: ContractId,
        payees: Vec<AccountId>,
        shares: Vec<u128>,
    ) -> Result<Self, SplitError> {
        Ok(Self::new(id, ShareRegistry::new(payees, shares)?))
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    /// The account holding this instance's custody balances.
    pub fn account(&self) -> AccountId {
        self.id.account()
    }

    pub fn registry(&self) -> &ShareRegistry {
        &self.registry
    }

    pub fn share_of(&self, account: &AccountId) -> u128 {
        self.registry.share_of(account)
    }

    pub fn total_shares(&self) -> u128 {
        self.registry.total_shares()
    }

    pub fn payees(&self) -> &[Payee] {
        self.registry.payees()
    }

    pub fn payee(&self, index: usize) -> Option<&Payee> {
        self.registry.payee(index)
    }

    /// Ledger for `asset`, if anything of it has ever been released.
    pub fn ledger(&self, asset: &AssetId) -> Option<&AssetLedger> {
        self.ledgers.get(asset)
    }

    /// Assets with at least one release booked.
    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.ledgers.keys()
    }

    pub fn released(&self, payee: &AccountId, asset: &AssetId) -> u128 {
        self.ledgers
            .get(asset)
            .map(|ledger| ledger.released(payee))
            .unwrap_or(0)
    }

    pub fn total_released(&self, asset: &AssetId) -> u128 {
        self.ledgers
            .get(asset)
            .map(AssetLedger::total_released)
            .unwrap_or(0)
    }

    /// Amount of `asset` that `payee` could be released right now, given the
    /// instance currently holds `custody` of it. Non-payees always get 0.
    pub fn available(
        &self,
        payee: &AccountId,
        asset: &AssetId,
        custody: u128,
    ) -> Result<u128, SplitError> {
        match self.ledgers.get(asset) {
            Some(ledger) => ledger.pending_payment(&self.registry, payee, custody),
            None => AssetLedger::new().pending_payment(&self.registry, payee, custody),
        }
    }

    /// Book `payee`'s available amount of `asset` as released.
    ///
    /// This is the effects half of a release: the ledger is updated before the
    /// caller performs the transfer, so a reentrant release observes the new
    /// state and finds nothing due. The caller must settle the returned
    /// [`Payout`] and discard this engine state if the transfer fails.
    pub fn commit_release(
        &mut self,
        payee: &AccountId,
        asset: &AssetId,
        custody: u128,
    ) -> Result<Payout, SplitError> {
        if self.registry.share_of(payee) == 0 {
            return Err(SplitError::NotAPayee(payee.clone()));
        }
        let payment = self.available(payee, asset, custody)?;
        if payment == 0 {
            return Err(SplitError::NoPaymentDue(payee.clone()));
        }
        self.ledgers
            .entry(asset.clone())
            .or_default()
            .record(payee, payment)?;
        tracing::debug!(
            instance = %self.id,
            %payee,
            %asset,
            amount = payment,
            "release booked"
        );
        Ok(Payout {
            asset: asset.clone(),
            payee: payee.clone(),
            amount: payment,
        })
    }
}
