//! The payment chain discriminant and per-chain metadata.
//!
//! The purchase flow supports three networks. [`Chain`] replaces the string
//! discriminant a storefront would otherwise thread through its state with a
//! tagged variant, and carries the per-chain constants the rest of the crate
//! needs: the native token symbol, the market-data instrument, and the number
//! of decimals in the chain's smallest unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A blockchain network the storefront accepts payment on.
///
/// # Serialization
///
/// Serializes to/from a lowercase string: `"eip155"`, `"solana"`, `"sui"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// EIP-155 chains (Ethereum and compatibles). Native asset: ETH.
    Eip155,
    /// Solana. Native asset: SOL.
    Solana,
    /// Sui. Native asset: SUI.
    Sui,
}

/// All supported chains, in display order.
pub const ALL_CHAINS: [Chain; 3] = [Chain::Eip155, Chain::Solana, Chain::Sui];

impl Chain {
    /// Returns the native token symbol (e.g., `"ETH"`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eip155 => "ETH",
            Self::Solana => "SOL",
            Self::Sui => "SUI",
        }
    }

    /// Returns the market-data instrument pair for the native token.
    #[must_use]
    pub const fn instrument(self) -> &'static str {
        match self {
            Self::Eip155 => "ETH-USD",
            Self::Solana => "SOL-USD",
            Self::Sui => "SUI-USD",
        }
    }

    /// Returns the CAIP-2 namespace for this chain family.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Eip155 => "eip155",
            Self::Solana => "solana",
            Self::Sui => "sui",
        }
    }

    /// Number of decimals between the display unit and the chain's smallest
    /// unit (wei, lamports, MIST).
    #[must_use]
    pub const fn native_decimals(self) -> u32 {
        match self {
            Self::Eip155 => 18,
            Self::Solana | Self::Sui => 9,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

/// Error returned when parsing an unknown chain name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown chain {0:?}")]
pub struct ChainParseError(String);

impl FromStr for Chain {
    type Err = ChainParseError;

    /// Parses a chain from its canonical name or a common alias
    /// (`"eth"`/`"evm"` for EIP-155, `"sol"` for Solana).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eip155" | "eth" | "evm" => Ok(Self::Eip155),
            "solana" | "sol" => Ok(Self::Solana),
            "sui" => Ok(Self::Sui),
            other => Err(ChainParseError(other.into())),
        }
    }
}
