#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Sui chain support for the paylane checkout SDK.
//!
//! This crate implements the native-SUI branch of the purchase flow. On Sui
//! a payment splits a fragment off the wallet's gas coin and transfers that
//! fragment to the recipient; the [`TransferIntent`] describes exactly that
//! shape, and the injected [`SuiWallet`] turns it into a programmable
//! transaction, signs it, and executes it in one step, returning the
//! transaction digest. All Sui protocol work lives behind the wallet
//! connector.
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod submit;
pub mod types;
pub mod wallet;

pub use submit::{SuiConfig, SuiSubmitter};
pub use types::{MIST_PER_SUI, SuiAddress, SuiAddressParseError, mist_from_decimal};
pub use wallet::{SuiWallet, TransactionDigest, TransferIntent};
