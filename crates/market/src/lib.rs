pub mod client;
pub mod coingecko;
pub mod retry;
pub mod yahoo;

pub use client::MarketClient;
pub use coingecko::CoinGeckoClient;
pub use yahoo::YahooClient;

use reqwest::Client;

use common::{Error, Result};

/// GET `url` and return the body, turning transport failures and non-2xx
/// statuses into errors.
pub(crate) async fn get_text(http: &Client, url: url::Url) -> Result<String> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Http(e.to_string()))?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

    if !status.is_success() {
        return Err(Error::Provider(format!("HTTP {status}: {body}")));
    }
    Ok(body)
}
