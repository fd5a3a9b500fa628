//! The Solana wallet capability seam.

use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;

use paylane::error::TransferError;
use paylane::wallet::BoxFuture;

/// Capability set consumed from a Solana wallet connector.
///
/// Mirrors the sign-and-send surface injected-provider wallets expose: the
/// connector signs the prepared transaction and broadcasts it, returning
/// the submission signature. Connect and disconnect stay with the
/// connector.
pub trait SolanaWallet: Send + Sync {
    /// Whether a wallet session is currently connected.
    fn is_connected(&self) -> bool;

    /// The connected account's public key, if any.
    fn pubkey(&self) -> Option<Pubkey>;

    /// Signs and broadcasts the transaction, returning its signature.
    fn sign_and_send(
        &self,
        transaction: VersionedTransaction,
    ) -> BoxFuture<'_, Result<Signature, TransferError>>;
}
