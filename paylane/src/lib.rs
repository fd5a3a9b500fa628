#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core checkout flow for the paylane multi-chain storefront SDK.
//!
//! This crate provides the chain-agnostic pieces of a storefront purchase
//! flow: a static product catalog with fixed USD prices, a polled spot-price
//! feed, exact USD-to-token amount conversion, and a checkout orchestrator
//! that submits native-asset transfers through injected per-chain wallet
//! adapters.
//!
//! Chain-specific submitters are provided by separate crates:
//!
//! - `paylane-evm` for EIP-155 chains (Ethereum and compatibles)
//! - `paylane-svm` for Solana
//! - `paylane-sui` for Sui
//!
//! # Overview
//!
//! A [`price::PriceFeed`] polls a market-data endpoint and fans the latest
//! [`price::SpotPrices`] out to any number of subscribers over a watch
//! channel. A [`checkout::Checkout`] holds the catalog, a price subscription,
//! and one [`wallet::TransferSubmitter`] per chain; at purchase time it
//! recomputes the token amount from the currently-held prices and routes the
//! transfer to the selected chain's submitter. All submitter failures are
//! normalized into the [`error::TransferError`] taxonomy.
//!
//! # Modules
//!
//! - [`catalog`] - Products and the immutable catalog
//! - [`chain`] - The payment chain discriminant and per-chain metadata
//! - [`checkout`] - Purchase flow orchestration and configuration
//! - [`convert`] - USD-to-token amount conversion
//! - [`error`] - Transfer and purchase error taxonomies
//! - [`price`] - Spot price state, market-data client, and shared poller
//! - [`wallet`] - Wallet session and transfer submitter seams
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod catalog;
pub mod chain;
pub mod checkout;
pub mod convert;
pub mod error;
pub mod price;
pub mod wallet;
