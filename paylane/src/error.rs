//! Transfer and purchase error taxonomies.
//!
//! Every chain-specific submitter normalizes its wallet and RPC failures
//! into [`TransferError`], so callers can distinguish at least "rejected by
//! user", "insufficient funds", and "network unreachable" instead of seeing
//! one generic failure. [`PurchaseError`] wraps the transfer taxonomy with
//! the flow-level failure modes that occur before any submission is
//! attempted.

use std::time::Duration;

use crate::chain::Chain;
use crate::convert::ConvertError;

/// Errors that can occur while submitting a native-asset transfer.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// No wallet session exists for the chain.
    #[error("wallet is not connected")]
    NotConnected,

    /// The user declined the transaction in their wallet.
    #[error("transfer rejected by user")]
    RejectedByUser,

    /// The wallet's balance cannot cover the transfer.
    #[error("insufficient balance for transfer")]
    InsufficientFunds,

    /// The wallet declined to switch to the requested network.
    #[error("network switch failed: {0}")]
    NetworkSwitch(String),

    /// The transfer amount could not be expressed in the chain's smallest
    /// unit (negative, too large, or otherwise malformed).
    #[error("invalid transfer amount: {0}")]
    InvalidAmount(String),

    /// Transport-level failure talking to an RPC endpoint.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The chain acknowledged the submission but rejected the transaction.
    #[error("transaction rejected by chain: {0}")]
    ChainRejected(String),

    /// The confirmation wait exceeded its deadline. The transaction may
    /// still land on chain.
    #[error("timed out after {0:?} waiting for confirmation")]
    ConfirmationTimeout(Duration),
}

/// Errors that can occur during the purchase flow.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    /// The product id is not in the catalog.
    #[error("unknown product {0:?}")]
    UnknownProduct(String),

    /// No submitter has been registered for the selected chain.
    #[error("no wallet adapter registered for chain {0}")]
    NoWallet(Chain),

    /// The selected chain's wallet session is not connected. Raised before
    /// any submission is attempted.
    #[error("wallet for chain {0} is not connected")]
    NotConnected(Chain),

    /// No spot price is held for the selected chain's token yet.
    #[error("no spot price available for {0}")]
    PriceUnavailable(Chain),

    /// The USD price could not be converted to a token amount.
    #[error("amount conversion failed: {0}")]
    Convert(#[from] ConvertError),

    /// The transfer submission itself failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}
