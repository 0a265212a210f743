//! Asset identifiers: the native settlement asset and fungible tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Address of a fungible token contract.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which transfer primitive an asset settles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// The environment's native settlement asset.
    Native,
    /// A fungible token moved by a token-transfer invocation.
    Token,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Token => "token",
        }
    }
}

/// Any asset that can sit in custody and be distributed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Native,
    Token(TokenId),
}

impl AssetId {
    /// Shorthand for `AssetId::Token(TokenId::new(raw))`.
    pub fn token(raw: impl Into<String>) -> Self {
        Self::Token(TokenId::new(raw))
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Native => AssetKind::Native,
            Self::Token(_) => AssetKind::Token,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The token address, or `None` for the native asset.
    pub fn token_id(&self) -> Option<&TokenId> {
        match self {
            Self::Native => None,
            Self::Token(token) => Some(token),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(token) => write!(f, "token:{token}"),
        }
    }
}

impl FromStr for AssetId {
    type Err = TypeError;

    /// Parses `native` or `token:<address>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("native") {
            return Ok(Self::Native);
        }
        match s.strip_prefix("token:") {
            Some(token) if !token.trim().is_empty() => Ok(Self::token(token.trim())),
            _ => Err(TypeError::InvalidAsset(s.to_string())),
        }
    }
}
