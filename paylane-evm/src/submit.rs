//! The EIP-155 transfer submitter.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use paylane::error::TransferError;
use paylane::wallet::{BoxFuture, TransferReceipt, TransferSubmitter, WalletSession};

use crate::chain::Eip155Config;
use crate::wallet::Eip155Wallet;

/// Wei per ETH (10^18), as a decimal multiplier.
const WEI_PER_ETH: Decimal = Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

/// Converts a display-unit ETH amount into wei, truncating below 1 wei.
///
/// # Errors
///
/// Returns [`TransferError::InvalidAmount`] for negative amounts or amounts
/// that do not fit the conversion range.
pub fn wei_from_decimal(amount: Decimal) -> Result<U256, TransferError> {
    if amount.is_sign_negative() {
        return Err(TransferError::InvalidAmount(format!(
            "negative amount {amount}"
        )));
    }
    let wei = amount
        .checked_mul(WEI_PER_ETH)
        .ok_or_else(|| TransferError::InvalidAmount(format!("amount {amount} out of range")))?
        .trunc();
    let wei = wei
        .to_u128()
        .ok_or_else(|| TransferError::InvalidAmount(format!("amount {amount} out of range")))?;
    Ok(U256::from(wei))
}

/// Submits native-ETH transfers through an [`Eip155Wallet`].
///
/// Before sending, the wallet's active network is compared against the
/// configured target and a switch is requested on mismatch. Submission
/// acknowledges with the transaction hash; no receipt is awaited.
#[derive(Debug)]
pub struct Eip155Submitter<W> {
    wallet: W,
    config: Eip155Config,
}

impl<W> Eip155Submitter<W> {
    /// Creates a submitter over a wallet and branch configuration.
    pub const fn new(wallet: W, config: Eip155Config) -> Self {
        Self { wallet, config }
    }
}

impl<W: Eip155Wallet> WalletSession for Eip155Submitter<W> {
    fn is_connected(&self) -> bool {
        self.wallet.is_connected()
    }

    fn address(&self) -> Option<String> {
        self.wallet.address().map(|a| a.to_string())
    }
}

impl<W: Eip155Wallet> TransferSubmitter for Eip155Submitter<W> {
    fn submit_transfer(
        &self,
        amount: Decimal,
    ) -> BoxFuture<'_, Result<TransferReceipt, TransferError>> {
        Box::pin(async move {
            if !self.wallet.is_connected() {
                return Err(TransferError::NotConnected);
            }
            let value = wei_from_decimal(amount)?;

            let active = self.wallet.active_chain_id().await?;
            if active != self.config.chain_id {
                #[cfg(feature = "telemetry")]
                tracing::debug!(
                    active,
                    target = self.config.chain_id,
                    "requesting network switch"
                );
                self.wallet.switch_chain(self.config.chain_id).await?;
            }

            let hash = self.wallet.send_native(self.config.recipient, value).await?;
            Ok(TransferReceipt {
                reference: hash.to_string(),
            })
        })
    }
}
