//! Pull-payment stores and the adapter that lets an instance pull from one.

use splitz_escrow::{EscrowError, PullPaymentStore};
use splitz_types::{AccountId, AssetId, ContractId, ContractKind};

use crate::error::RuntimeError;
use crate::event::SplitEvent;
use crate::runtime::Runtime;

impl Runtime {
    /// Deploy an empty pull-payment store and return its address.
    pub fn deploy_store(&mut self) -> Result<ContractId, RuntimeError> {
        self.invoke("deploy_store", |rt| {
            let nonce = rt.state.store_nonce;
            let id = ContractId::derive(ContractKind::PullPayment, rt.state.factory.deployer(), nonce);
            rt.state.store_nonce = nonce
                .checked_add(1)
                .ok_or(EscrowError::Overflow)?;
            rt.state.stores.insert(id, PullPaymentStore::new(id));
            tracing::info!(store = %id, "pull-payment store deployed");
            Ok(id)
        })
    }

    pub fn store(&self, store: &ContractId) -> Result<&PullPaymentStore, RuntimeError> {
        self.state
            .stores
            .get(store)
            .ok_or(RuntimeError::UnknownStore(*store))
    }

    /// Escrow `amount` of the native asset from `from` for `beneficiary`.
    pub fn deposit(
        &mut self,
        store: ContractId,
        from: &AccountId,
        beneficiary: &AccountId,
        amount: u128,
    ) -> Result<(), RuntimeError> {
        self.invoke("deposit", |rt| {
            rt.store(&store)?;
            rt.send(from, &store.account(), &AssetId::Native, amount)?;
            rt.state
                .stores
                .get_mut(&store)
                .ok_or(RuntimeError::UnknownStore(store))?
                .deposit(beneficiary, amount)?;
            rt.emit(SplitEvent::Deposited {
                store,
                beneficiary: beneficiary.clone(),
                amount,
            });
            tracing::info!(%store, %beneficiary, amount, "escrow deposit");
            Ok(())
        })
    }

    /// Pay out everything escrowed for `beneficiary`. Returns the amount paid;
    /// nothing pending is an `Ok(0)` that changes nothing.
    pub fn withdraw_payments(
        &mut self,
        store: ContractId,
        beneficiary: &AccountId,
    ) -> Result<u128, RuntimeError> {
        self.invoke("withdraw_payments", |rt| {
            let amount = rt
                .state
                .stores
                .get_mut(&store)
                .ok_or(RuntimeError::UnknownStore(store))?
                .take_payment(beneficiary);
            if amount == 0 {
                return Ok(0);
            }
            rt.send(&store.account(), beneficiary, &AssetId::Native, amount)?;
            rt.emit(SplitEvent::Withdrawn {
                store,
                beneficiary: beneficiary.clone(),
                amount,
            });
            tracing::info!(%store, %beneficiary, amount, "escrow withdrawal");
            Ok(amount)
        })
    }

    /// Amount currently escrowed for `beneficiary`.
    pub fn payments(&self, store: &ContractId, beneficiary: &AccountId) -> Result<u128, RuntimeError> {
        Ok(self.store(store)?.payments(beneficiary))
    }

    /// Have `instance` withdraw everything escrowed for it in `store`.
    ///
    /// The pulled funds land in the instance's custody and count as received,
    /// so they become distributable immediately. Any failure of the nested
    /// withdrawal, or an empty balance, fails this call as a whole.
    pub fn withdraw_from_contract(
        &mut self,
        instance: ContractId,
        store: ContractId,
    ) -> Result<u128, RuntimeError> {
        self.invoke("withdraw_from_contract", |rt| {
            rt.instance(&instance)?;
            let account = instance.account();
            if rt.payments(&store, &account)? == 0 {
                return Err(RuntimeError::EscrowTransfer {
                    store,
                    reason: "nothing pending".into(),
                });
            }
            let amount = rt
                .withdraw_payments(store, &account)
                .map_err(|e| RuntimeError::EscrowTransfer {
                    store,
                    reason: e.to_string(),
                })?;
            tracing::info!(%instance, %store, amount, "pulled escrowed funds");
            Ok(amount)
        })
    }
}
