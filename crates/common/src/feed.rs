use async_trait::async_trait;

use crate::{PriceSnapshot, Quote, Result, UserId};

/// Abstraction over the market-data providers.
///
/// `market::MarketClient` implements this against CoinGecko and Yahoo
/// Finance. Tests substitute an in-memory feed.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch price and 24h change for every provider id in `ids`.
    ///
    /// Ids the provider does not know are absent from the snapshot rather
    /// than an error.
    async fn snapshot(&self, ids: &[&str]) -> Result<PriceSnapshot>;

    /// Latest close and percent change from the open for the reference index.
    async fn index_quote(&self) -> Result<Quote>;
}

/// Outbound message delivery to a single user's chat.
///
/// Delivery is best-effort; callers log failures and carry on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()>;
}
