//! Escrow-specific errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    #[error("arithmetic overflow in escrow balance")]
    Overflow,
}
