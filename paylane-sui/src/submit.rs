//! The Sui transfer submitter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use paylane::chain::Chain;
use paylane::checkout::CheckoutConfig;
use paylane::error::TransferError;
use paylane::wallet::{BoxFuture, TransferReceipt, TransferSubmitter, WalletSession};

use crate::types::{SuiAddress, SuiAddressParseError, mist_from_decimal};
use crate::wallet::{SuiWallet, TransferIntent};

/// Configuration for the Sui payment branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiConfig {
    /// Recipient of the split coin fragment.
    pub recipient: SuiAddress,
}

impl SuiConfig {
    /// Derives the branch config from the caller-supplied checkout table,
    /// parsing the Sui recipient into a [`SuiAddress`].
    ///
    /// # Errors
    ///
    /// Returns the parse error if the table's recipient is not a valid
    /// 0x-prefixed 32-byte hex address.
    pub fn from_checkout(config: &CheckoutConfig) -> Result<Self, SuiAddressParseError> {
        Ok(Self {
            recipient: config.recipients.for_chain(Chain::Sui).parse()?,
        })
    }
}

/// Submits native-SUI transfers through a [`SuiWallet`].
#[derive(Debug)]
pub struct SuiSubmitter<W> {
    wallet: W,
    config: SuiConfig,
}

impl<W> SuiSubmitter<W> {
    /// Creates a submitter over a wallet and branch configuration.
    pub const fn new(wallet: W, config: SuiConfig) -> Self {
        Self { wallet, config }
    }
}

impl<W: SuiWallet> WalletSession for SuiSubmitter<W> {
    fn is_connected(&self) -> bool {
        self.wallet.is_connected()
    }

    fn address(&self) -> Option<String> {
        self.wallet.address().map(|a| a.to_string())
    }
}

impl<W: SuiWallet> TransferSubmitter for SuiSubmitter<W> {
    fn submit_transfer(
        &self,
        amount: Decimal,
    ) -> BoxFuture<'_, Result<TransferReceipt, TransferError>> {
        Box::pin(async move {
            if !self.wallet.is_connected() {
                return Err(TransferError::NotConnected);
            }
            let amount_mist = mist_from_decimal(amount)?;
            let intent = TransferIntent {
                recipient: self.config.recipient,
                amount_mist,
            };

            let digest = self.wallet.sign_and_execute(intent).await?;
            #[cfg(feature = "telemetry")]
            tracing::debug!(%digest, "transfer executed");

            Ok(TransferReceipt {
                reference: digest.to_string(),
            })
        })
    }
}
