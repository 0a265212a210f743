//! Records emitted by committed invocations, and their subscribers.

use serde::{Deserialize, Serialize};
use splitz_ledger::Payout;
use splitz_types::{AccountId, AssetId, AssetKind, ContractId, TokenId};

/// Observable records, published once the emitting invocation commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitEvent {
    /// The factory created a new distribution instance.
    InstanceCreated { instance: ContractId },
    /// A payee was registered during instance construction.
    PayeeAdded {
        instance: ContractId,
        account: AccountId,
        share: u128,
    },
    /// Native funds arrived in an instance's custody.
    PaymentReceived {
        instance: ContractId,
        from: AccountId,
        amount: u128,
    },
    /// Native funds were released to a payee.
    PaymentReleased {
        instance: ContractId,
        to: AccountId,
        amount: u128,
    },
    /// Token funds were released to a payee.
    TokenPaymentReleased {
        instance: ContractId,
        token: TokenId,
        to: AccountId,
        amount: u128,
    },
    /// Funds were escrowed for a beneficiary.
    Deposited {
        store: ContractId,
        beneficiary: AccountId,
        amount: u128,
    },
    /// A beneficiary's escrowed funds were paid out.
    Withdrawn {
        store: ContractId,
        beneficiary: AccountId,
        amount: u128,
    },
}

impl SplitEvent {
    /// The release record for a settled payout.
    pub fn released(instance: ContractId, payout: &Payout) -> Self {
        match &payout.asset {
            AssetId::Native => Self::PaymentReleased {
                instance,
                to: payout.payee.clone(),
                amount: payout.amount,
            },
            AssetId::Token(token) => Self::TokenPaymentReleased {
                instance,
                token: token.clone(),
                to: payout.payee.clone(),
                amount: payout.amount,
            },
        }
    }

    /// `(asset-kind, asset, recipient, amount)` for release records.
    pub fn as_release(&self) -> Option<(AssetKind, AssetId, &AccountId, u128)> {
        match self {
            Self::PaymentReleased { to, amount, .. } => {
                Some((AssetKind::Native, AssetId::Native, to, *amount))
            }
            Self::TokenPaymentReleased {
                token, to, amount, ..
            } => Some((AssetKind::Token, AssetId::Token(token.clone()), to, *amount)),
            _ => None,
        }
    }
}

/// Synchronous fan-out of committed records.
///
/// Listeners run inline on the committing call; keep them fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&SplitEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&SplitEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &SplitEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
