use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use common::{Config, Error, PriceFeed, PriceSnapshot, Quote, Result};

use crate::retry::with_retry;
use crate::{CoinGeckoClient, YahooClient};

const USER_AGENT: &str = concat!("pricebot/", env!("CARGO_PKG_VERSION"));

/// Live market data: crypto prices from CoinGecko, the reference index from
/// Yahoo Finance. Each fetch is retried a bounded number of times.
pub struct MarketClient {
    coingecko: CoinGeckoClient,
    yahoo: YahooClient,
    index_symbol: String,
    retries: u32,
    retry_backoff: Duration,
}

impl MarketClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .timeout(cfg.http_timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        info!(
            coingecko = %cfg.coingecko_base_url,
            yahoo = %cfg.yahoo_base_url,
            index = %cfg.index_symbol,
            retries = cfg.fetch_retries,
            "MarketClient initialized"
        );

        Ok(Self {
            coingecko: CoinGeckoClient::new(&cfg.coingecko_base_url, http.clone()),
            yahoo: YahooClient::new(&cfg.yahoo_base_url, http),
            index_symbol: cfg.index_symbol.clone(),
            retries: cfg.fetch_retries,
            retry_backoff: Duration::from_secs(1),
        })
    }
}

#[async_trait]
impl PriceFeed for MarketClient {
    async fn snapshot(&self, ids: &[&str]) -> Result<PriceSnapshot> {
        let quotes = with_retry("coingecko", self.retries, self.retry_backoff, || {
            self.coingecko.simple_price(ids)
        })
        .await?;
        Ok(PriceSnapshot::new(quotes))
    }

    async fn index_quote(&self) -> Result<Quote> {
        with_retry("yahoo", self.retries, self.retry_backoff, || {
            self.yahoo.index_quote(&self.index_symbol)
        })
        .await
    }
}
