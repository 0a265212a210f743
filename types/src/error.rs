//! Parse errors for the identifier types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid account id: {0:?}")]
    InvalidAccount(String),

    #[error("invalid asset {0:?}: expected \"native\" or \"token:<address>\"")]
    InvalidAsset(String),

    #[error("invalid contract id: {0:?}")]
    InvalidContractId(String),
}
