#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Solana chain support for the paylane checkout SDK.
//!
//! This crate implements the native-SOL branch of the purchase flow. The
//! transfer is a single system-program instruction compiled into a v0
//! message against a recent blockhash. Signing and broadcast go through the
//! injected [`SolanaWallet`] (mirroring a connector's sign-and-send
//! capability); confirmation is then polled over RPC by submission
//! signature, bounded by a configurable deadline.
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod rpc;
pub mod submit;
pub mod wallet;

pub use rpc::SolanaRpc;
pub use submit::{
    LAMPORTS_PER_SOL, SolanaConfig, SolanaSubmitter, build_transfer_transaction,
    lamports_from_decimal,
};
pub use wallet::SolanaWallet;
