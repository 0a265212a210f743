//! Distribution ledger errors.

use splitz_types::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("payee {payee} has an invalid share (shares must be > 0)")]
    InvalidShare { payee: AccountId },

    #[error("payee {0} is already registered")]
    DuplicatePayee(AccountId),

    #[error("no payees")]
    NoPayees,

    #[error("payees and shares length mismatch: {payees} payees, {shares} shares")]
    LengthMismatch { payees: usize, shares: usize },

    #[error("invalid payee account {0:?}")]
    InvalidAccount(String),

    #[error("account {0} has no shares")]
    NotAPayee(AccountId),

    #[error("account {0} is not due payment")]
    NoPaymentDue(AccountId),

    #[error("arithmetic overflow in distribution computation")]
    Overflow,
}
