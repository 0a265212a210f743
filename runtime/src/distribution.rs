//! Distribution entry points and queries.

use splitz_ledger::{DistributionEngine, Payee};
use splitz_types::{AccountId, AssetId, ContractId};

use crate::error::RuntimeError;
use crate::event::SplitEvent;
use crate::runtime::Runtime;

impl Runtime {
    /// Create a new, independent distribution instance and return its address.
    pub fn create_instance(
        &mut self,
        payees: Vec<AccountId>,
        shares: Vec<u128>,
    ) -> Result<ContractId, RuntimeError> {
        self.invoke("create_instance", |rt| {
            let id = rt.state.factory.create_instance(payees, shares)?;
            rt.emit(SplitEvent::InstanceCreated { instance: id });
            let added: Vec<SplitEvent> = rt
                .instance(&id)?
                .payees()
                .iter()
                .map(|p| SplitEvent::PayeeAdded {
                    instance: id,
                    account: p.account.clone(),
                    share: p.share,
                })
                .collect();
            for event in added {
                rt.emit(event);
            }
            tracing::info!(instance = %id, "distribution instance created");
            Ok(id)
        })
    }

    /// Pay `payee` everything of `asset` currently due from `instance`.
    ///
    /// Anyone may trigger a release; funds only ever go to the payee. The
    /// ledger is updated before the transfer, so a recipient that re-enters
    /// finds nothing due, and a failed transfer reverts the whole release.
    pub fn release(
        &mut self,
        instance: ContractId,
        payee: &AccountId,
        asset: &AssetId,
    ) -> Result<u128, RuntimeError> {
        self.invoke("release", |rt| {
            let custody_account = instance.account();
            let custody = rt.state.bank.balance_of(&custody_account, asset);
            let payout = rt
                .state
                .factory
                .get_mut(&instance)
                .ok_or(RuntimeError::UnknownInstance(instance))?
                .commit_release(payee, asset, custody)?;

            rt.send(&custody_account, &payout.payee, &payout.asset, payout.amount)?;
            rt.emit(SplitEvent::released(instance, &payout));
            tracing::info!(
                %instance,
                payee = %payout.payee,
                asset = %payout.asset,
                amount = payout.amount,
                "payment released"
            );
            Ok(payout.amount)
        })
    }

    pub fn instance(&self, instance: &ContractId) -> Result<&DistributionEngine, RuntimeError> {
        self.state
            .factory
            .get(instance)
            .ok_or(RuntimeError::UnknownInstance(*instance))
    }

    /// Every instance address, in creation order.
    pub fn instances(&self) -> &[ContractId] {
        self.state.factory.created()
    }

    /// The instance's current holding of `asset`.
    pub fn custody_balance(&self, instance: &ContractId, asset: &AssetId) -> Result<u128, RuntimeError> {
        self.instance(instance)?;
        Ok(self.state.bank.balance_of(&instance.account(), asset))
    }

    /// Amount of `asset` that `payee` could be released right now.
    pub fn available(
        &self,
        instance: &ContractId,
        payee: &AccountId,
        asset: &AssetId,
    ) -> Result<u128, RuntimeError> {
        let custody = self.custody_balance(instance, asset)?;
        Ok(self.instance(instance)?.available(payee, asset, custody)?)
    }

    pub fn released(
        &self,
        instance: &ContractId,
        payee: &AccountId,
        asset: &AssetId,
    ) -> Result<u128, RuntimeError> {
        Ok(self.instance(instance)?.released(payee, asset))
    }

    pub fn total_released(&self, instance: &ContractId, asset: &AssetId) -> Result<u128, RuntimeError> {
        Ok(self.instance(instance)?.total_released(asset))
    }

    pub fn share_of(&self, instance: &ContractId, account: &AccountId) -> Result<u128, RuntimeError> {
        Ok(self.instance(instance)?.share_of(account))
    }

    pub fn total_shares(&self, instance: &ContractId) -> Result<u128, RuntimeError> {
        Ok(self.instance(instance)?.total_shares())
    }

    /// Registered payees in order.
    pub fn payees(&self, instance: &ContractId) -> Result<Vec<Payee>, RuntimeError> {
        Ok(self.instance(instance)?.payees().to_vec())
    }

    /// The payee registered at `index`, if any.
    pub fn payee(&self, instance: &ContractId, index: usize) -> Result<Option<Payee>, RuntimeError> {
        Ok(self.instance(instance)?.payee(index).cloned())
    }
}
