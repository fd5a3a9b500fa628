//! EVM chain primitives.

use alloy_primitives::Address;
use alloy_primitives::hex::FromHexError;
use serde::{Deserialize, Serialize};

use paylane::chain::Chain;
use paylane::checkout::CheckoutConfig;

/// An EIP-155 chain ID (e.g., 1 for Ethereum mainnet, 8453 for Base).
pub type ChainId = u64;

/// Formats a chain ID as a CAIP-2 identifier.
///
/// Example: `caip2(8453)` returns `"eip155:8453"`.
#[must_use]
pub fn caip2(chain_id: ChainId) -> String {
    format!("eip155:{chain_id}")
}

/// Parses a CAIP-2 identifier into an EIP-155 chain ID.
///
/// Returns `None` if the input is not a valid `eip155:` prefixed string.
#[must_use]
pub fn parse_caip2(caip: &str) -> Option<ChainId> {
    caip.strip_prefix("eip155:").and_then(|s| s.parse().ok())
}

/// Configuration for the EIP-155 payment branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip155Config {
    /// The chain the wallet must be on before sending.
    pub chain_id: ChainId,
    /// Recipient of the native transfer.
    pub recipient: Address,
}

impl Eip155Config {
    /// Derives the branch config from the caller-supplied checkout table,
    /// parsing the EIP-155 recipient into an [`Address`].
    ///
    /// # Errors
    ///
    /// Returns the hex parse error if the table's recipient is not a valid
    /// 20-byte address.
    pub fn from_checkout(
        config: &CheckoutConfig,
        chain_id: ChainId,
    ) -> Result<Self, FromHexError> {
        Ok(Self {
            chain_id,
            recipient: config.recipients.for_chain(Chain::Eip155).parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylane::checkout::RecipientTable;

    fn checkout_config() -> CheckoutConfig {
        CheckoutConfig {
            recipients: RecipientTable {
                eip155: "0xb51b48008453213C78F9A3e65985776Ee17ccA65".into(),
                solana: "Bf1qfj9ATZZQPYTvJEYjpumaKzpXDkH6Cq7i6XHG5nza".into(),
                sui: "0x73f1994d596eaa98fab2c7b2a40d91a2f2eaf2e9a5dedbf4f6289db945a6b8f4".into(),
            },
            confirmation_timeout_secs: 30,
        }
    }

    #[test]
    fn test_config_from_checkout_table() {
        let config = Eip155Config::from_checkout(&checkout_config(), 8453).unwrap();
        assert_eq!(config.chain_id, 8453);
        assert_eq!(
            config.recipient.to_string(),
            "0xb51b48008453213C78F9A3e65985776Ee17ccA65"
        );
    }

    #[test]
    fn test_config_from_checkout_rejects_bad_recipient() {
        let mut table = checkout_config();
        table.recipients.eip155 = "not-an-address".into();
        assert!(Eip155Config::from_checkout(&table, 1).is_err());
    }

    #[test]
    fn test_caip2_roundtrip() {
        assert_eq!(caip2(1), "eip155:1");
        assert_eq!(parse_caip2("eip155:8453"), Some(8453));
        assert_eq!(parse_caip2("solana:mainnet"), None);
        assert_eq!(parse_caip2("eip155:abc"), None);
    }

    #[test]
    fn test_config_deserialize() {
        let config: Eip155Config = serde_json::from_str(
            r#"{"chainId":1,"recipient":"0xb51b48008453213C78F9A3e65985776Ee17ccA65"}"#,
        )
        .unwrap();
        assert_eq!(config.chain_id, 1);
        assert_eq!(
            config.recipient.to_string(),
            "0xb51b48008453213C78F9A3e65985776Ee17ccA65"
        );
    }
}
