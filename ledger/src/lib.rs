//! Proportional-share distribution ledger.
//!
//! A fixed set of payees each hold an immutable share. Any asset held in an
//! instance's custody is distributable in proportion to those shares, net of
//! what each payee has already been paid:
//!
//! `available(p, a) = ⌊(custody(a) + total_released(a)) × share(p) / total_shares⌋ − released(a, p)`
//!
//! The ledger never stores a running "total received"; it is reconstructed
//! from the custody balance plus everything already released, so deposits
//! need no registration call.
//!
//! This crate is the pure state machine. Moving funds is the caller's job:
//! [`DistributionEngine::commit_release`] books the payment and returns a
//! [`Payout`] the caller must settle afterwards.

pub mod asset_ledger;
pub mod engine;
pub mod error;
pub mod registry;

pub use asset_ledger::AssetLedger;
pub use engine::{DistributionEngine, Payout};
pub use error::SplitError;
pub use registry::{Payee, ShareRegistry};
