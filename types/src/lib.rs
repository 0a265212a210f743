//! Fundamental types for the Splitz ledger.
//!
//! This crate defines the identifiers shared across every other crate in the
//! workspace: account ids, asset ids, and derived contract addresses.

pub mod account;
pub mod asset;
pub mod contract;
pub mod error;

pub use account::AccountId;
pub use asset::{AssetId, AssetKind, TokenId};
pub use contract::{ContractId, ContractKind};
pub use error::TypeError;
