//! Sui chain primitives.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use paylane::error::TransferError;

/// MIST per SUI (10^9).
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// A Sui account or object address: 32 bytes, rendered as 0x-prefixed hex.
///
/// # Serialization
///
/// Serializes to/from the canonical `0x`-prefixed lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiAddress([u8; 32]);

impl SuiAddress {
    /// Creates an address from its raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Error returned when parsing an invalid Sui address string.
///
/// A valid address is `0x` followed by exactly 64 hex digits.
#[derive(Debug, thiserror::Error)]
#[error("Invalid Sui address {0:?}")]
pub struct SuiAddressParseError(String);

impl FromStr for SuiAddress {
    type Err = SuiAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .ok_or_else(|| SuiAddressParseError(s.into()))?;
        let mut bytes = [0u8; 32];
        if hex_part.len() != 64 {
            return Err(SuiAddressParseError(s.into()));
        }
        hex::decode_to_slice(hex_part, &mut bytes).map_err(|_| SuiAddressParseError(s.into()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for SuiAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

/// Converts a display-unit SUI amount into MIST, truncating below one MIST.
///
/// # Errors
///
/// Returns [`TransferError::InvalidAmount`] for negative amounts or amounts
/// that do not fit in a `u64`.
pub fn mist_from_decimal(amount: Decimal) -> Result<u64, TransferError> {
    if amount.is_sign_negative() {
        return Err(TransferError::InvalidAmount(format!(
            "negative amount {amount}"
        )));
    }
    amount
        .checked_mul(Decimal::from(MIST_PER_SUI))
        .map(|m| m.trunc())
        .and_then(|m| m.to_u64())
        .ok_or_else(|| TransferError::InvalidAmount(format!("amount {amount} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    const ADDR: &str = "0x73f1994d596eaa98fab2c7b2a40d91a2f2eaf2e9a5dedbf4f6289db945a6b8f4";

    #[test]
    fn test_address_roundtrip() {
        let address = SuiAddress::from_str(ADDR).unwrap();
        assert_eq!(address.to_string(), ADDR);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{ADDR}\""));
        let back: SuiAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_address_rejects_bad_input() {
        assert!(SuiAddress::from_str("73f1994d").is_err());
        assert!(SuiAddress::from_str("0x1234").is_err());
        assert!(
            SuiAddress::from_str(
                "0xzz f1994d596eaa98fab2c7b2a40d91a2f2eaf2e9a5dedbf4f6289db945a6b8"
            )
            .is_err()
        );
    }

    #[test]
    fn test_mist_conversion() {
        let dec = |s: &str| Decimal::from_str(s).unwrap();
        assert_eq!(mist_from_decimal(dec("1")).unwrap(), MIST_PER_SUI);
        assert_eq!(mist_from_decimal(dec("20")).unwrap(), 20 * MIST_PER_SUI);
        // Sub-MIST digits are truncated.
        assert_eq!(mist_from_decimal(dec("0.0000000015")).unwrap(), 1);
        assert!(mist_from_decimal(dec("-0.1")).is_err());
        assert!(mist_from_decimal(dec("20000000000")).is_err());
    }
}
