//! Derived contract addresses for distribution instances and escrow stores.

use blake2::digest::consts::U20;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::account::AccountId;
use crate::error::TypeError;

/// What kind of contract an address was derived for.
///
/// The kind is mixed into the derivation so a distribution instance and a
/// pull-payment store deployed with the same nonce never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    Distribution,
    PullPayment,
}

impl ContractKind {
    fn tag(&self) -> &'static [u8] {
        match self {
            Self::Distribution => b"splitz/distribution",
            Self::PullPayment => b"splitz/pull-payment",
        }
    }
}

/// A 20-byte contract address.
///
/// Serializes as its `0x`-hex form in human-readable formats and as raw
/// bytes otherwise.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractId([u8; 20]);

impl ContractId {
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive the address of the `nonce`-th contract of `kind` deployed by `deployer`.
    ///
    /// `Blake2b-160(kind-tag ‖ deployer ‖ nonce_be)`
    pub fn derive(kind: ContractKind, deployer: &AccountId, nonce: u64) -> Self {
        let mut hasher = Blake2b::<U20>::new();
        hasher.update(kind.tag());
        hasher.update(deployer.as_str().as_bytes());
        hasher.update(nonce.to_be_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// The account that holds this contract's custody balances.
    pub fn account(&self) -> AccountId {
        AccountId::new(self.to_string())
    }
}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId(0x{})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for ContractId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("0x");
        let decoded =
            hex::decode(digits).map_err(|_| TypeError::InvalidContractId(s.to_string()))?;
        let bytes: [u8; 20] = decoded
            .try_into()
            .map_err(|_| TypeError::InvalidContractId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for ContractId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ContractId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}
