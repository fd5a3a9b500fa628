//! Purchase flow orchestration and configuration.
//!
//! [`Checkout`] owns the catalog, a subscription to the shared price state,
//! and one registered [`TransferSubmitter`] per chain. Quoting recomputes
//! the displayed token amount synchronously from the currently-held prices;
//! purchasing recomputes it again at submission time (no price is locked in
//! between) and routes the transfer through the selected chain's submitter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::catalog::{Catalog, Product};
use crate::chain::Chain;
use crate::convert::{format_token_amount, token_amount};
use crate::error::PurchaseError;
use crate::price::SpotPrices;
use crate::wallet::TransferSubmitter;

/// Default bound on confirmation waits, in seconds.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 60;

/// Recipient addresses per chain, in each chain's canonical string form.
///
/// The flow has no baked-in recipients; this table is the single place the
/// caller supplies them. Each chain crate derives its typed branch config
/// from the table (`Eip155Config::from_checkout` and friends), parsing the
/// address into the chain's native representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientTable {
    /// EIP-155 recipient (0x-prefixed 20-byte hex).
    pub eip155: String,
    /// Solana recipient (base58 public key).
    pub solana: String,
    /// Sui recipient (0x-prefixed 32-byte hex).
    pub sui: String,
}

impl RecipientTable {
    /// Returns the recipient address for a chain.
    #[must_use]
    pub fn for_chain(&self, chain: Chain) -> &str {
        match chain {
            Chain::Eip155 => &self.eip155,
            Chain::Solana => &self.solana,
            Chain::Sui => &self.sui,
        }
    }
}

/// Caller-supplied checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// Per-chain recipient addresses.
    pub recipients: RecipientTable,
    /// Bound on chain confirmation waits, in seconds.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
}

const fn default_confirmation_timeout_secs() -> u64 {
    DEFAULT_CONFIRMATION_TIMEOUT_SECS
}

impl CheckoutConfig {
    /// Returns the confirmation-wait bound as a [`Duration`].
    #[must_use]
    pub const fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

/// A displayable conversion of a product's USD price into a token amount,
/// computed from the currently-held spot prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The chain the quote is for.
    pub chain: Chain,
    /// USD price of the product.
    pub price_usd: Decimal,
    /// Spot price used for the conversion.
    pub spot: Decimal,
    /// Exact token amount.
    pub token_amount: Decimal,
    /// Token amount rendered with six fractional digits.
    pub display_amount: String,
}

/// Acknowledgment of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// The chain the payment was made on.
    pub chain: Chain,
    /// The purchased product's id.
    pub product_id: String,
    /// The token amount that was transferred, in display units.
    pub token_amount: Decimal,
    /// Chain-specific transaction reference.
    pub reference: String,
}

/// The purchase flow orchestrator.
pub struct Checkout {
    catalog: Catalog,
    prices: watch::Receiver<SpotPrices>,
    wallets: HashMap<Chain, Arc<dyn TransferSubmitter>>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("catalog", &self.catalog)
            .field("chains", &self.wallets.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Checkout {
    /// Creates a checkout over a catalog and a price subscription.
    #[must_use]
    pub fn new(catalog: Catalog, prices: watch::Receiver<SpotPrices>) -> Self {
        Self {
            catalog,
            prices,
            wallets: HashMap::new(),
        }
    }

    /// Registers the transfer submitter for a chain.
    #[must_use]
    pub fn with_wallet(mut self, chain: Chain, wallet: Arc<dyn TransferSubmitter>) -> Self {
        self.wallets.insert(chain, wallet);
        self
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether a connected wallet session exists for the chain.
    #[must_use]
    pub fn is_wallet_connected(&self, chain: Chain) -> bool {
        self.wallets
            .get(&chain)
            .is_some_and(|w| w.is_connected())
    }

    fn product(&self, product_id: &str) -> Result<&Product, PurchaseError> {
        self.catalog
            .product(product_id)
            .ok_or_else(|| PurchaseError::UnknownProduct(product_id.into()))
    }

    fn amount_for(
        &self,
        price_usd: Decimal,
        chain: Chain,
    ) -> Result<(Decimal, Decimal), PurchaseError> {
        let spot = self
            .prices
            .borrow()
            .get(chain)
            .ok_or(PurchaseError::PriceUnavailable(chain))?;
        let amount = token_amount(price_usd, spot)?;
        Ok((spot, amount))
    }

    /// Quotes a product on a chain from the currently-held prices.
    ///
    /// Purely synchronous: switching chains while prices are loaded never
    /// triggers a fetch.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::UnknownProduct`] or
    /// [`PurchaseError::PriceUnavailable`].
    pub fn quote(&self, product_id: &str, chain: Chain) -> Result<Quote, PurchaseError> {
        let product = self.product(product_id)?;
        let (spot, amount) = self.amount_for(product.price_usd, chain)?;
        Ok(Quote {
            chain,
            price_usd: product.price_usd,
            spot,
            token_amount: amount,
            display_amount: format_token_amount(amount),
        })
    }

    /// Purchases a product on a chain.
    ///
    /// The token amount is computed at submission time from whatever price
    /// state is currently held. The wallet-connected check short-circuits
    /// before any submission is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError`] distinguishing an unknown product, a
    /// missing or disconnected wallet, an unavailable price, and the
    /// [`crate::error::TransferError`] taxonomy for submission failures.
    pub async fn purchase(
        &self,
        product_id: &str,
        chain: Chain,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let product = self.product(product_id)?;
        let wallet = self
            .wallets
            .get(&chain)
            .ok_or(PurchaseError::NoWallet(chain))?;
        if !wallet.is_connected() {
            return Err(PurchaseError::NotConnected(chain));
        }

        let (_spot, amount) = self.amount_for(product.price_usd, chain)?;

        #[cfg(feature = "telemetry")]
        tracing::info!(
            product = product_id,
            %chain,
            amount = %amount,
            "submitting purchase transfer"
        );

        let receipt = wallet.submit_transfer(amount).await.map_err(|err| {
            #[cfg(feature = "telemetry")]
            tracing::warn!(product = product_id, %chain, error = %err, "purchase failed");
            PurchaseError::Transfer(err)
        })?;

        #[cfg(feature = "telemetry")]
        tracing::info!(
            product = product_id,
            %chain,
            reference = %receipt.reference,
            "purchase confirmed"
        );

        Ok(PurchaseReceipt {
            chain,
            product_id: product.id.clone(),
            token_amount: amount,
            reference: receipt.reference,
        })
    }
}
