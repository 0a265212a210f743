//! Account identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// An account that can hold balances and receive payouts.
///
/// Accounts are opaque strings. Contract custody accounts use the `0x`-hex
/// form of their [`ContractId`](crate::ContractId); external accounts may use
/// any non-empty identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id from a raw string.
    ///
    /// No validation happens here; use [`AccountId::is_valid`] or
    /// [`str::parse`] where an empty id must be rejected.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw account string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id plays the role of the zero address and is never valid.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl FromStr for AccountId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::new(s.trim());
        if id.is_valid() {
            Ok(id)
        } else {
            Err(TypeError::InvalidAccount(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_account_is_invalid() {
        assert!(!AccountId::new("").is_valid());
        assert!(!AccountId::new("   ").is_valid());
        assert!(AccountId::new("alice").is_valid());
    }

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        let id: AccountId = " bob ".parse().unwrap();
        assert_eq!(id.as_str(), "bob");
        assert!("".parse::<AccountId>().is_err());
    }
}
