use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use common::{Error, Quote, Result};

/// CoinGecko `simple/price` client. Public endpoint, no API key.
pub struct CoinGeckoClient {
    base_url: String,
    http: Client,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// USD price and 24h change for each id. Ids CoinGecko does not return
    /// are simply missing from the map.
    pub async fn simple_price(&self, ids: &[&str]) -> Result<HashMap<String, Quote>> {
        let url = Url::parse_with_params(
            &format!("{}/simple/price", self.base_url),
            &[
                ("ids", ids.join(",").as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ],
        )
        .map_err(|e| Error::Config(format!("bad CoinGecko URL: {e}")))?;

        debug!(ids = ?ids, "Fetching CoinGecko prices");
        let body = crate::get_text(&self.http, url).await?;
        parse_simple_price(&body)
    }
}

/// Parse a `simple/price` body: `{"bitcoin": {"usd": 1.0, "usd_24h_change": 0.5}, ...}`.
pub fn parse_simple_price(body: &str) -> Result<HashMap<String, Quote>> {
    let raw: HashMap<String, SimplePriceEntry> =
        serde_json::from_str(body).map_err(|e| Error::Provider(e.to_string()))?;

    Ok(raw
        .into_iter()
        .filter_map(|(id, entry)| {
            let price = entry.usd?;
            Some((
                id,
                Quote {
                    price,
                    change_pct: entry.usd_24h_change.unwrap_or(0.0),
                },
            ))
        })
        .collect())
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SimplePriceEntry {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}
