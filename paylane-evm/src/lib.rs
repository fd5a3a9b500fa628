#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EIP-155 (EVM) chain support for the paylane checkout SDK.
//!
//! This crate implements the native-ETH branch of the purchase flow: an
//! [`Eip155Wallet`] capability trait mirroring what browser wallet
//! connectors expose (send a native transfer, report and switch the active
//! network), a [`ProviderWallet`] backed by an alloy provider for
//! signer-in-process use, and an [`Eip155Submitter`] that plugs into
//! [`paylane::checkout::Checkout`].
//!
//! Submission acknowledges as soon as the transaction hash is returned by
//! the node; EVM receipts are not awaited here.
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod chain;
pub mod submit;
pub mod wallet;

pub use chain::{ChainId, Eip155Config, caip2, parse_caip2};
pub use submit::{Eip155Submitter, wei_from_decimal};
pub use wallet::{Eip155Wallet, ProviderWallet, classify_provider_error};
