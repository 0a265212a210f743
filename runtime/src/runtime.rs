//! The runtime: state, atomic invocation frames, and the transfer path.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use splitz_escrow::PullPaymentStore;
use splitz_types::{AccountId, AssetId, ContractId};

use crate::bank::Bank;
use crate::error::{RuntimeError, TransferError};
use crate::event::{EventBus, SplitEvent};
use crate::factory::InstanceFactory;
use crate::hook::{Receipt, RecipientHook};

/// Everything an invocation can change. Snapshotted on entry to every frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeState {
    pub(crate) bank: Bank,
    pub(crate) factory: InstanceFactory,
    pub(crate) stores: HashMap<ContractId, PullPaymentStore>,
    pub(crate) store_nonce: u64,
    /// Committed records, oldest first.
    pub(crate) journal: Vec<SplitEvent>,
}

impl RuntimeState {
    pub fn new(deployer: AccountId) -> Self {
        Self {
            bank: Bank::new(),
            factory: InstanceFactory::new(deployer),
            stores: HashMap::new(),
            store_nonce: 0,
            journal: Vec::new(),
        }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn factory(&self) -> &InstanceFactory {
        &self.factory
    }

    pub fn journal(&self) -> &[SplitEvent] {
        &self.journal
    }
}

/// Serialized, all-or-nothing execution of every entry point.
///
/// Hooks and subscribers are process-local and never part of [`RuntimeState`].
pub struct Runtime {
    pub(crate) state: RuntimeState,
    hooks: HashMap<AccountId, Arc<dyn RecipientHook>>,
    bus: EventBus,
    /// Records emitted by frames that have not fully committed yet.
    pending: Vec<SplitEvent>,
    depth: usize,
}

impl Runtime {
    /// A fresh runtime whose factory and stores derive addresses from `deployer`.
    pub fn new(deployer: AccountId) -> Self {
        Self::from_state(RuntimeState::new(deployer))
    }

    /// Resume from a previously saved state.
    pub fn from_state(state: RuntimeState) -> Self {
        Self {
            state,
            hooks: HashMap::new(),
            bus: EventBus::new(),
            pending: Vec::new(),
            depth: 0,
        }
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn into_state(self) -> RuntimeState {
        self.state
    }

    /// Attach `hook` to `account`, replacing any previous one.
    pub fn set_hook(&mut self, account: AccountId, hook: Arc<dyn RecipientHook>) {
        self.hooks.insert(account, hook);
    }

    pub fn clear_hook(&mut self, account: &AccountId) {
        self.hooks.remove(account);
    }

    /// Receive every record as its outermost invocation commits.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&SplitEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    /// Every committed record, oldest first.
    pub fn events(&self) -> &[SplitEvent] {
        &self.state.journal
    }

    pub fn balance_of(&self, account: &AccountId, asset: &AssetId) -> u128 {
        self.state.bank.balance_of(account, asset)
    }

    /// Fund `to` out of thin air. Harness-only: no record, no hook.
    pub fn mint(&mut self, to: &AccountId, asset: &AssetId, amount: u128) -> Result<(), RuntimeError> {
        self.invoke("mint", |rt| {
            rt.state.bank.mint(to, asset, amount)?;
            Ok(())
        })
    }

    /// Move funds between accounts on `from`'s behalf.
    ///
    /// Native funds landing in a distribution instance are recorded as
    /// received; token funds arrive silently and are picked up by the next
    /// availability query through the custody balance.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), RuntimeError> {
        self.invoke("transfer", |rt| {
            rt.send(from, to, asset, amount)?;
            Ok(())
        })
    }

    /// Run `op` as one atomic invocation.
    ///
    /// On error every change made inside, including those of nested
    /// invocations, is discarded along with their records. Records are
    /// published only when the outermost invocation succeeds.
    pub(crate) fn invoke<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, RuntimeError>,
    ) -> Result<T, RuntimeError> {
        let journal_mark = self.state.journal.len();
        let snapshot = self.snapshot();
        let mark = self.pending.len();
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        match result {
            Ok(value) => {
                if self.depth == 0 {
                    self.publish();
                }
                Ok(value)
            }
            Err(e) => {
                let mut journal = std::mem::take(&mut self.state.journal);
                journal.truncate(journal_mark);
                self.state = snapshot;
                self.state.journal = journal;
                self.pending.truncate(mark);
                tracing::warn!(op, depth = self.depth, error = %e, "invocation reverted");
                Err(e)
            }
        }
    }

    /// Copy of everything but the journal, which only grows at commit and is
    /// restored by truncation instead.
    fn snapshot(&mut self) -> RuntimeState {
        let journal = std::mem::take(&mut self.state.journal);
        let snapshot = self.state.clone();
        self.state.journal = journal;
        snapshot
    }

    /// Queue a record on the current invocation.
    pub(crate) fn emit(&mut self, event: SplitEvent) {
        self.pending.push(event);
    }

    fn publish(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            self.bus.emit(&event);
            self.state.journal.push(event);
        }
    }

    /// The transfer primitive as seen from inside an invocation: move the
    /// balance, record native receipts by instances, then run the
    /// recipient's hook. Must be the last state-touching step of any caller.
    pub(crate) fn send(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), TransferError> {
        self.state.bank.transfer(from, to, asset, amount)?;
        tracing::debug!(%from, %to, %asset, amount, "transfer");

        if asset.is_native() {
            if let Some(instance) = self.state.factory.instance_for_account(to) {
                self.emit(SplitEvent::PaymentReceived {
                    instance,
                    from: from.clone(),
                    amount,
                });
            }
        }

        if let Some(hook) = self.hooks.get(to).cloned() {
            let receipt = Receipt {
                from: from.clone(),
                to: to.clone(),
                asset: asset.clone(),
                amount,
            };
            hook.on_receive(self, &receipt)?;
        }
        Ok(())
    }
}
