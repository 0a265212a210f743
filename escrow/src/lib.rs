//! Pull-payment escrow.
//!
//! Instead of pushing funds to a recipient (and failing if the recipient
//! rejects them), a payer deposits into a store keyed by beneficiary, and the
//! beneficiary, or anyone on its behalf, later pulls the balance out. A
//! failing recipient can then only block its own withdrawal.
//!
//! The store only keeps the books; the runtime moves the funds.

pub mod error;
pub mod store;

pub use error::EscrowError;
pub use store::PullPaymentStore;
