//! The Solana transfer submitter.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use solana_message::v0::Message as MessageV0;
use solana_message::{Hash, VersionedMessage};
use solana_pubkey::{ParsePubkeyError, Pubkey};
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;
use std::time::Duration;

use paylane::chain::Chain;
use paylane::checkout::CheckoutConfig;
use paylane::error::TransferError;
use paylane::wallet::{BoxFuture, TransferReceipt, TransferSubmitter, WalletSession};

use crate::rpc::SolanaRpc;
use crate::wallet::SolanaWallet;

/// Lamports per SOL (10^9).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Converts a display-unit SOL amount into lamports, truncating below one
/// lamport.
///
/// # Errors
///
/// Returns [`TransferError::InvalidAmount`] for negative amounts or amounts
/// that do not fit in a `u64`.
pub fn lamports_from_decimal(amount: Decimal) -> Result<u64, TransferError> {
    if amount.is_sign_negative() {
        return Err(TransferError::InvalidAmount(format!(
            "negative amount {amount}"
        )));
    }
    amount
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .map(|l| l.trunc())
        .and_then(|l| l.to_u64())
        .ok_or_else(|| TransferError::InvalidAmount(format!("amount {amount} out of range")))
}

/// Builds the unsigned single-instruction native transfer, compiled into a
/// v0 message against the given recent blockhash.
///
/// # Errors
///
/// Returns [`TransferError::InvalidAmount`] if message compilation fails.
pub fn build_transfer_transaction(
    from: Pubkey,
    to: Pubkey,
    lamports: u64,
    recent_blockhash: Hash,
) -> Result<VersionedTransaction, TransferError> {
    let instruction = solana_system_interface::instruction::transfer(&from, &to, lamports);
    let message = MessageV0::try_compile(&from, &[instruction], &[], recent_blockhash)
        .map_err(|e| TransferError::InvalidAmount(format!("{e:?}")))?;
    Ok(VersionedTransaction {
        signatures: vec![],
        message: VersionedMessage::V0(message),
    })
}

/// Configuration for the Solana payment branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolanaConfig {
    /// Recipient of the native transfer.
    pub recipient: Pubkey,
    /// Bound on the confirmation wait.
    pub confirmation_timeout: Duration,
    /// Interval between signature-status probes.
    pub confirmation_poll_interval: Duration,
}

impl SolanaConfig {
    /// Creates a config with the default 60s confirmation bound and 1s
    /// probe interval.
    #[must_use]
    pub const fn new(recipient: Pubkey) -> Self {
        Self {
            recipient,
            confirmation_timeout: Duration::from_secs(60),
            confirmation_poll_interval: Duration::from_secs(1),
        }
    }

    /// Derives the branch config from the caller-supplied checkout table,
    /// parsing the Solana recipient and carrying the table's confirmation
    /// bound.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the table's recipient is not a valid
    /// base58 public key.
    pub fn from_checkout(config: &CheckoutConfig) -> Result<Self, ParsePubkeyError> {
        Ok(Self {
            recipient: config.recipients.for_chain(Chain::Solana).parse()?,
            confirmation_timeout: config.confirmation_timeout(),
            confirmation_poll_interval: Duration::from_secs(1),
        })
    }
}

/// Submits native-SOL transfers through a [`SolanaWallet`], confirming over
/// a [`SolanaRpc`].
#[derive(Debug)]
pub struct SolanaSubmitter<W, R> {
    wallet: W,
    rpc: R,
    config: SolanaConfig,
}

impl<W, R> SolanaSubmitter<W, R> {
    /// Creates a submitter over a wallet, an RPC client, and branch
    /// configuration.
    pub const fn new(wallet: W, rpc: R, config: SolanaConfig) -> Self {
        Self {
            wallet,
            rpc,
            config,
        }
    }
}

async fn await_confirmation<R: SolanaRpc>(
    rpc: &R,
    signature: Signature,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), TransferError> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if rpc.is_confirmed(signature).await? {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(TransferError::ConfirmationTimeout(timeout));
        }
        tokio::time::sleep(poll_interval).await;
    }
}

impl<W: SolanaWallet, R: SolanaRpc> WalletSession for SolanaSubmitter<W, R> {
    fn is_connected(&self) -> bool {
        self.wallet.is_connected()
    }

    fn address(&self) -> Option<String> {
        self.wallet.pubkey().map(|p| p.to_string())
    }
}

impl<W: SolanaWallet, R: SolanaRpc> TransferSubmitter for SolanaSubmitter<W, R> {
    fn submit_transfer(
        &self,
        amount: Decimal,
    ) -> BoxFuture<'_, Result<TransferReceipt, TransferError>> {
        Box::pin(async move {
            let payer = match (self.wallet.is_connected(), self.wallet.pubkey()) {
                (true, Some(payer)) => payer,
                _ => return Err(TransferError::NotConnected),
            };
            let lamports = lamports_from_decimal(amount)?;

            let recent_blockhash = self.rpc.latest_blockhash().await?;
            let transaction =
                build_transfer_transaction(payer, self.config.recipient, lamports, recent_blockhash)?;

            let signature = self.wallet.sign_and_send(transaction).await?;
            #[cfg(feature = "telemetry")]
            tracing::debug!(%signature, "transfer submitted, awaiting confirmation");

            await_confirmation(
                &self.rpc,
                signature,
                self.config.confirmation_timeout,
                self.config.confirmation_poll_interval,
            )
            .await?;

            Ok(TransferReceipt {
                reference: signature.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_lamports_conversion() {
        assert_eq!(lamports_from_decimal(dec("1")).unwrap(), LAMPORTS_PER_SOL);
        assert_eq!(lamports_from_decimal(dec("0.333333")).unwrap(), 333_333_000);
        // Sub-lamport digits are truncated.
        assert_eq!(lamports_from_decimal(dec("0.0000000019")).unwrap(), 1);
        assert!(lamports_from_decimal(dec("-1")).is_err());
        assert!(lamports_from_decimal(dec("20000000000")).is_err());
    }

    #[test]
    fn test_transfer_transaction_shape() {
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        let tx = build_transfer_transaction(from, to, 42, Hash::default()).unwrap();

        assert!(tx.signatures.is_empty());
        let VersionedMessage::V0(message) = &tx.message else {
            panic!("expected a v0 message");
        };
        assert_eq!(message.instructions.len(), 1);
        assert_eq!(message.account_keys[0], from);
        assert!(message.account_keys.contains(&to));
        assert!(
            message
                .account_keys
                .contains(&solana_system_interface::program::ID)
        );
    }

    struct MockSolWallet {
        connected: bool,
        pubkey: Pubkey,
    }

    impl SolanaWallet for MockSolWallet {
        fn is_connected(&self) -> bool {
            self.connected
        }

        fn pubkey(&self) -> Option<Pubkey> {
            self.connected.then_some(self.pubkey)
        }

        fn sign_and_send(
            &self,
            transaction: VersionedTransaction,
        ) -> BoxFuture<'_, Result<Signature, TransferError>> {
            assert!(!transaction.message.static_account_keys().is_empty());
            Box::pin(async move { Ok(Signature::default()) })
        }
    }

    /// RPC that confirms after a configurable number of probes.
    struct MockRpc {
        confirm_after: usize,
        probes: AtomicUsize,
    }

    impl SolanaRpc for MockRpc {
        fn latest_blockhash(&self) -> BoxFuture<'_, Result<Hash, TransferError>> {
            Box::pin(async move { Ok(Hash::default()) })
        }

        fn is_confirmed(&self, _signature: Signature) -> BoxFuture<'_, Result<bool, TransferError>> {
            let probe = self.probes.fetch_add(1, Ordering::SeqCst);
            let confirmed = probe + 1 >= self.confirm_after;
            Box::pin(async move { Ok(confirmed) })
        }
    }

    fn config_with(timeout: Duration, poll: Duration) -> SolanaConfig {
        SolanaConfig {
            recipient: Pubkey::new_unique(),
            confirmation_timeout: timeout,
            confirmation_poll_interval: poll,
        }
    }

    #[tokio::test]
    async fn test_submit_polls_until_confirmed() {
        let wallet = MockSolWallet {
            connected: true,
            pubkey: Pubkey::new_unique(),
        };
        let rpc = MockRpc {
            confirm_after: 3,
            probes: AtomicUsize::new(0),
        };
        let submitter = SolanaSubmitter::new(
            wallet,
            rpc,
            config_with(Duration::from_secs(5), Duration::from_millis(5)),
        );
        let receipt = submitter.submit_transfer(dec("0.333333")).await.unwrap();
        assert_eq!(receipt.reference, Signature::default().to_string());
        assert_eq!(submitter.rpc.probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_confirmation_wait_is_bounded() {
        let wallet = MockSolWallet {
            connected: true,
            pubkey: Pubkey::new_unique(),
        };
        let rpc = MockRpc {
            confirm_after: usize::MAX,
            probes: AtomicUsize::new(0),
        };
        let submitter = SolanaSubmitter::new(
            wallet,
            rpc,
            config_with(Duration::from_millis(30), Duration::from_millis(5)),
        );
        let err = submitter.submit_transfer(dec("1")).await.unwrap_err();
        assert!(matches!(err, TransferError::ConfirmationTimeout(_)));
    }

    fn checkout_config(timeout_secs: u64) -> CheckoutConfig {
        CheckoutConfig {
            recipients: paylane::checkout::RecipientTable {
                eip155: "0xb51b48008453213C78F9A3e65985776Ee17ccA65".into(),
                solana: "Bf1qfj9ATZZQPYTvJEYjpumaKzpXDkH6Cq7i6XHG5nza".into(),
                sui: "0x73f1994d596eaa98fab2c7b2a40d91a2f2eaf2e9a5dedbf4f6289db945a6b8f4".into(),
            },
            confirmation_timeout_secs: timeout_secs,
        }
    }

    #[test]
    fn test_config_from_checkout_table() {
        let config = SolanaConfig::from_checkout(&checkout_config(30)).unwrap();
        assert_eq!(
            config.recipient.to_string(),
            "Bf1qfj9ATZZQPYTvJEYjpumaKzpXDkH6Cq7i6XHG5nza"
        );
        assert_eq!(config.confirmation_timeout, Duration::from_secs(30));

        let mut bad = checkout_config(30);
        bad.recipients.solana = "not-base58!".into();
        assert!(SolanaConfig::from_checkout(&bad).is_err());
    }

    #[tokio::test]
    async fn test_checkout_timeout_bounds_the_wait() {
        let wallet = MockSolWallet {
            connected: true,
            pubkey: Pubkey::new_unique(),
        };
        let rpc = MockRpc {
            confirm_after: usize::MAX,
            probes: AtomicUsize::new(0),
        };
        // A zero-second bound from the table expires after the first probe.
        let config = SolanaConfig::from_checkout(&checkout_config(0)).unwrap();
        let submitter = SolanaSubmitter::new(wallet, rpc, config);
        let err = submitter.submit_transfer(dec("1")).await.unwrap_err();
        assert!(matches!(
            err,
            TransferError::ConfirmationTimeout(timeout) if timeout == Duration::ZERO
        ));
    }

    #[tokio::test]
    async fn test_disconnected_wallet_short_circuits() {
        let wallet = MockSolWallet {
            connected: false,
            pubkey: Pubkey::new_unique(),
        };
        let rpc = MockRpc {
            confirm_after: 1,
            probes: AtomicUsize::new(0),
        };
        let submitter = SolanaSubmitter::new(
            wallet,
            rpc,
            config_with(Duration::from_secs(1), Duration::from_millis(5)),
        );
        let err = submitter.submit_transfer(dec("1")).await.unwrap_err();
        assert!(matches!(err, TransferError::NotConnected));
    }
}
