//! Recipient hooks: code that runs when funds land on an account.

use splitz_types::{AccountId, AssetId};

use crate::error::TransferError;
use crate::runtime::Runtime;

/// A completed balance movement, as seen by the recipient's hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub from: AccountId,
    pub to: AccountId,
    pub asset: AssetId,
    pub amount: u128,
}

/// Behaviour attached to an account that receives funds.
///
/// The hook runs after the balances have moved and may call back into the
/// runtime. Returning an error fails the transfer, which rolls back the whole
/// invocation that triggered it.
pub trait RecipientHook: Send + Sync {
    fn on_receive(&self, runtime: &mut Runtime, receipt: &Receipt) -> Result<(), TransferError>;
}
