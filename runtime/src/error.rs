//! Runtime errors.

use splitz_escrow::EscrowError;
use splitz_ledger::SplitError;
use splitz_types::{AccountId, AssetId, ContractId};
use thiserror::Error;

/// Failure of the transfer primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient {asset} balance in {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountId,
        asset: AssetId,
        needed: u128,
        available: u128,
    },

    #[error("recipient {recipient} rejected the transfer: {reason}")]
    Rejected { recipient: AccountId, reason: String },

    #[error("arithmetic overflow in balance update")]
    Overflow,
}

/// Any failure of a runtime entry point. The invocation has been rolled back
/// by the time the caller sees one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Escrow(#[from] EscrowError),

    #[error("transfer failed: {0}")]
    TransferFailure(#[from] TransferError),

    #[error("pull from escrow store {store} failed: {reason}")]
    EscrowTransfer { store: ContractId, reason: String },

    #[error("unknown distribution instance {0}")]
    UnknownInstance(ContractId),

    #[error("unknown pull-payment store {0}")]
    UnknownStore(ContractId),
}
