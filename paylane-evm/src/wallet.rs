//! The EIP-155 wallet capability seam and an alloy-backed implementation.

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use url::Url;

use paylane::error::TransferError;
use paylane::wallet::BoxFuture;

use crate::chain::ChainId;

/// Capability set consumed from an EVM wallet connector.
///
/// Mirrors what browser wallet stacks expose to a storefront: the session
/// state, a native-transfer send, and a network-switch request. Connect and
/// disconnect stay with the connector.
pub trait Eip155Wallet: Send + Sync {
    /// Whether a wallet session is currently connected.
    fn is_connected(&self) -> bool;

    /// The connected account address, if any.
    fn address(&self) -> Option<Address>;

    /// The chain the wallet is currently on.
    fn active_chain_id(&self) -> BoxFuture<'_, Result<ChainId, TransferError>>;

    /// Asks the wallet to switch to the given chain.
    fn switch_chain(&self, chain_id: ChainId) -> BoxFuture<'_, Result<(), TransferError>>;

    /// Signs and broadcasts a native-asset transfer, returning the
    /// transaction hash as soon as the node accepts it.
    fn send_native(&self, to: Address, value: U256)
    -> BoxFuture<'_, Result<TxHash, TransferError>>;
}

/// Maps a provider error message onto the transfer taxonomy.
///
/// Wallet connectors and nodes report rejection and balance failures as
/// message text; this is the single classification rule for the EVM branch.
#[must_use]
pub fn classify_provider_error(message: &str) -> TransferError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("insufficient funds") {
        TransferError::InsufficientFunds
    } else if lower.contains("user rejected") || lower.contains("user denied") {
        TransferError::RejectedByUser
    } else {
        TransferError::Rpc(message.to_owned())
    }
}

/// An [`Eip155Wallet`] backed by an in-process signer and an alloy provider.
///
/// The provider is pinned to one RPC endpoint, so a switch request to any
/// other chain fails; a browser-connector implementation would forward the
/// request to the wallet instead.
#[derive(Debug)]
pub struct ProviderWallet {
    provider: DynProvider,
    address: Address,
    chain_id: ChainId,
}

impl ProviderWallet {
    /// Builds a wallet from a local signer and an HTTP RPC endpoint for the
    /// given chain.
    #[must_use]
    pub fn connect(signer: PrivateKeySigner, rpc_url: Url, chain_id: ChainId) -> Self {
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(rpc_url)
            .erased();
        #[cfg(feature = "telemetry")]
        tracing::info!(%address, chain_id, "Using EVM provider wallet");
        Self {
            provider,
            address,
            chain_id,
        }
    }
}

impl Eip155Wallet for ProviderWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn address(&self) -> Option<Address> {
        Some(self.address)
    }

    fn active_chain_id(&self) -> BoxFuture<'_, Result<ChainId, TransferError>> {
        Box::pin(async move {
            self.provider
                .get_chain_id()
                .await
                .map_err(|e| classify_provider_error(&e.to_string()))
        })
    }

    fn switch_chain(&self, chain_id: ChainId) -> BoxFuture<'_, Result<(), TransferError>> {
        let pinned = self.chain_id;
        Box::pin(async move {
            if chain_id == pinned {
                Ok(())
            } else {
                Err(TransferError::NetworkSwitch(format!(
                    "provider wallet is pinned to chain {pinned}, cannot switch to {chain_id}"
                )))
            }
        })
    }

    fn send_native(
        &self,
        to: Address,
        value: U256,
    ) -> BoxFuture<'_, Result<TxHash, TransferError>> {
        Box::pin(async move {
            let tx = TransactionRequest::default()
                .with_from(self.address)
                .with_to(to)
                .with_value(value);
            let pending = self
                .provider
                .send_transaction(tx)
                .await
                .map_err(|e| classify_provider_error(&e.to_string()))?;
            Ok(*pending.tx_hash())
        })
    }
}
