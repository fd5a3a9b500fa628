//! RPC client abstraction for Solana.
//!
//! The submitter only needs two calls: a recent blockhash for transaction
//! validity and a signature-status probe for confirmation. [`SolanaRpc`]
//! narrows the client surface to those, with an implementation for the
//! nonblocking `solana-client` RPC client.

use solana_commitment_config::CommitmentConfig;
use solana_message::Hash;
use solana_signature::Signature;

use paylane::error::TransferError;
use paylane::wallet::BoxFuture;

/// The RPC surface consumed by the Solana transfer branch.
pub trait SolanaRpc: Send + Sync {
    /// Fetches a recent blockhash to anchor transaction validity.
    fn latest_blockhash(&self) -> BoxFuture<'_, Result<Hash, TransferError>>;

    /// Probes whether a submitted transaction has reached confirmed
    /// commitment. `Ok(false)` means not yet visible; a transaction the
    /// chain processed and rejected is an error.
    fn is_confirmed(&self, signature: Signature) -> BoxFuture<'_, Result<bool, TransferError>>;
}

impl SolanaRpc for solana_client::nonblocking::rpc_client::RpcClient {
    fn latest_blockhash(&self) -> BoxFuture<'_, Result<Hash, TransferError>> {
        Box::pin(async move {
            self.get_latest_blockhash()
                .await
                .map_err(|e| TransferError::Rpc(e.to_string()))
        })
    }

    fn is_confirmed(&self, signature: Signature) -> BoxFuture<'_, Result<bool, TransferError>> {
        Box::pin(async move {
            let status = self
                .get_signature_status_with_commitment(&signature, CommitmentConfig::confirmed())
                .await
                .map_err(|e| TransferError::Rpc(e.to_string()))?;
            match status {
                Some(Ok(())) => Ok(true),
                Some(Err(err)) => Err(TransferError::ChainRejected(format!("{err:?}"))),
                None => Ok(false),
            }
        })
    }
}
