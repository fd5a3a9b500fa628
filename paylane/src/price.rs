//! Spot price state, market-data client, and shared poller.
//!
//! One [`PriceFeed`] polls the market-data endpoint for all three
//! instruments and fans the latest [`SpotPrices`] out over a watch channel.
//! Anything that needs a price subscribes; nothing issues its own redundant
//! fetch.
//!
//! Fetch failures retain the previous price set. An instrument missing from
//! an otherwise successful response keeps its previous value rather than
//! snapping to a hardcoded default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use url::Url;

use crate::chain::{ALL_CHAINS, Chain};

/// Default market-data tick endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://data-api.coindesk.com/spot/v1/latest/tick";

/// Default market parameter.
pub const DEFAULT_MARKET: &str = "coinbase";

/// Default interval between price fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// USD spot prices for the native tokens of all supported chains.
///
/// Replaced wholesale on every successful fetch; no history is retained.
/// A chain whose price has never been fetched reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotPrices {
    /// ETH-USD spot price.
    pub eth: Option<Decimal>,
    /// SOL-USD spot price.
    pub sol: Option<Decimal>,
    /// SUI-USD spot price.
    pub sui: Option<Decimal>,
}

impl SpotPrices {
    /// Returns the spot price for a chain's native token, if held.
    #[must_use]
    pub const fn get(&self, chain: Chain) -> Option<Decimal> {
        match chain {
            Chain::Eip155 => self.eth,
            Chain::Solana => self.sol,
            Chain::Sui => self.sui,
        }
    }

    /// Sets the spot price for a chain's native token.
    pub const fn set(&mut self, chain: Chain, spot: Decimal) {
        match chain {
            Chain::Eip155 => self.eth = Some(spot),
            Chain::Solana => self.sol = Some(spot),
            Chain::Sui => self.sui = Some(spot),
        }
    }

    /// Builder-style price assignment, useful for seeding initial state.
    #[must_use]
    pub const fn with_price(mut self, chain: Chain, spot: Decimal) -> Self {
        self.set(chain, spot);
        self
    }
}

/// Configuration for the market-data price feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFeedConfig {
    /// Tick endpoint URL (without query parameters).
    pub endpoint: Url,
    /// Market parameter sent with each request (e.g. `"coinbase"`).
    pub market: String,
    /// Seconds between fetches.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint URL is valid"),
            market: DEFAULT_MARKET.into(),
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Errors that can occur while fetching prices.
#[derive(Debug, thiserror::Error)]
pub enum PriceFeedError {
    /// HTTP transport failure.
    #[error("price request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("price endpoint returned status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

/// One instrument entry in the tick response.
///
/// The endpoint exposes both a best-ask and a last-trade field depending on
/// mapping flags; the best ask is preferred as the conservative quote and
/// the last price is the fallback.
#[derive(Debug, Deserialize)]
struct TickEntry {
    #[serde(rename = "BEST_ASK")]
    best_ask: Option<Decimal>,
    #[serde(rename = "PRICE")]
    price: Option<Decimal>,
}

impl TickEntry {
    fn spot(&self) -> Option<Decimal> {
        self.best_ask.or(self.price).filter(|p| *p > Decimal::ZERO)
    }
}

#[derive(Debug, Deserialize)]
struct TickResponse {
    #[serde(rename = "Data")]
    data: HashMap<String, TickEntry>,
}

/// Client for the market-data tick endpoint.
#[derive(Debug, Clone)]
pub struct PriceFeed {
    client: reqwest::Client,
    endpoint: Url,
    market: String,
    poll_interval: Duration,
    request_timeout: Duration,
}

impl PriceFeed {
    /// Creates a feed from configuration.
    #[must_use]
    pub fn new(config: &PriceFeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            market: config.market.clone(),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Fetches the latest prices once.
    ///
    /// The returned set starts from `previous`: instruments present in the
    /// response overwrite their entry, instruments absent retain it.
    ///
    /// # Errors
    ///
    /// Returns [`PriceFeedError`] on transport failure, a non-success
    /// status, or an undecodable body. The caller is expected to keep
    /// `previous` in that case.
    pub async fn fetch_once(&self, previous: &SpotPrices) -> Result<SpotPrices, PriceFeedError> {
        let instruments = ALL_CHAINS
            .iter()
            .map(|c| c.instrument())
            .collect::<Vec<_>>()
            .join(",");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("market", self.market.as_str()),
                ("instruments", instruments.as_str()),
                ("apply_mapping", "true"),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PriceFeedError::UnexpectedStatus(status));
        }
        let tick: TickResponse = response.json().await?;

        let mut next = previous.clone();
        for chain in ALL_CHAINS {
            if let Some(spot) = tick.data.get(chain.instrument()).and_then(TickEntry::spot) {
                next.set(chain, spot);
            }
        }
        Ok(next)
    }

    /// Spawns the shared poller: one fetch immediately, then one per
    /// configured interval, publishing each successful result to the
    /// returned handle's watch channel.
    ///
    /// `initial` seeds the channel (and acts as the fallback set until the
    /// first successful fetch).
    #[must_use]
    pub fn spawn(self, initial: SpotPrices) -> PriceFeedHandle {
        let (tx, rx) = watch::channel(initial);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let previous = tx.borrow().clone();
                match self.fetch_once(&previous).await {
                    Ok(next) => {
                        tx.send_replace(next);
                    }
                    Err(err) => {
                        #[cfg(feature = "telemetry")]
                        tracing::warn!(error = %err, "price fetch failed; keeping previous prices");
                        let _ = err;
                    }
                }
            }
        });
        PriceFeedHandle { rx, task }
    }
}

/// Handle to the spawned price poller.
///
/// Dropping the handle aborts the poller, which is the only way a fetch in
/// flight gets cancelled.
#[derive(Debug)]
pub struct PriceFeedHandle {
    rx: watch::Receiver<SpotPrices>,
    task: JoinHandle<()>,
}

impl PriceFeedHandle {
    /// Returns a new subscription to the price state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SpotPrices> {
        self.rx.clone()
    }

    /// Returns a copy of the currently-held price set.
    #[must_use]
    pub fn latest(&self) -> SpotPrices {
        self.rx.borrow().clone()
    }
}

impl Drop for PriceFeedHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
