//! The Sui wallet capability seam.

use serde::{Deserialize, Serialize};
use std::fmt;

use paylane::error::TransferError;
use paylane::wallet::BoxFuture;

use crate::types::SuiAddress;

/// A native-SUI payment, expressed in Sui's object model: split
/// `amount_mist` off the wallet's gas coin and transfer the resulting
/// fragment to `recipient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIntent {
    /// Destination address for the split coin.
    pub recipient: SuiAddress,
    /// Fragment size in MIST.
    pub amount_mist: u64,
}

/// A Sui transaction digest, as returned by sign-and-execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDigest(String);

impl TransactionDigest {
    /// Creates a digest from its base58 string form.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability set consumed from a Sui wallet connector.
///
/// The connector owns transaction construction: it turns the intent into a
/// programmable transaction over its own gas coin, signs it, and executes
/// it in a single step. Connect and disconnect stay with the connector.
pub trait SuiWallet: Send + Sync {
    /// Whether a wallet session is currently connected.
    fn is_connected(&self) -> bool;

    /// The connected account address, if any.
    fn address(&self) -> Option<SuiAddress>;

    /// Builds, signs, and executes the transfer, returning the transaction
    /// digest once the network acknowledges it.
    fn sign_and_execute(
        &self,
        intent: TransferIntent,
    ) -> BoxFuture<'_, Result<TransactionDigest, TransferError>>;
}
