//! Wallet session and transfer submitter seams.
//!
//! The flow never talks to a wallet-connector SDK directly. Each chain crate
//! implements [`TransferSubmitter`] around an injected wallet session, and
//! the checkout orchestrator only sees this trait. Sessions are explicit
//! objects passed in by the caller, not ambient globals.

use rust_decimal::Decimal;
use std::future::Future;
use std::pin::Pin;

use crate::error::TransferError;

/// Boxed future returned by the object-safe wallet traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only view of a per-chain wallet session.
///
/// Lifecycle (connect/disconnect) is owned by the external wallet connector;
/// this crate only reads it.
pub trait WalletSession: Send + Sync {
    /// Whether a wallet is currently connected for this chain.
    fn is_connected(&self) -> bool;

    /// The connected address, if any, in the chain's canonical display form.
    fn address(&self) -> Option<String>;
}

/// Acknowledgment of a submitted transfer.
///
/// The reference is the chain's identifier for the transaction: a tx hash on
/// EIP-155 chains, a signature on Solana, a digest on Sui.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Chain-specific transaction reference.
    pub reference: String,
}

/// A chain-specific native-asset transfer procedure.
///
/// Implementations are constructed with their recipient address and chain
/// configuration; the flow only supplies the token amount, computed at
/// submission time. The amount is in display units of the chain's native
/// token (ETH, SOL, SUI); conversion to the smallest unit is the
/// implementation's concern.
pub trait TransferSubmitter: WalletSession {
    /// Submits a native transfer of `amount` display units to the configured
    /// recipient and waits for the chain's acknowledgment.
    fn submit_transfer(
        &self,
        amount: Decimal,
    ) -> BoxFuture<'_, Result<TransferReceipt, TransferError>>;
}
