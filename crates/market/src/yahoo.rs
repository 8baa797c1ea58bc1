use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use common::{Error, Quote, Result};

/// Yahoo Finance chart client, used for the reference index quote.
pub struct YahooClient {
    base_url: String,
    http: Client,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Latest daily close and percent change from the day's open.
    pub async fn index_quote(&self, symbol: &str) -> Result<Quote> {
        let url = Url::parse_with_params(
            &format!(
                "{}/v8/finance/chart/{}",
                self.base_url,
                symbol.replace('^', "%5E")
            ),
            &[("range", "1d"), ("interval", "1d")],
        )
        .map_err(|e| Error::Config(format!("bad Yahoo URL: {e}")))?;

        debug!(symbol, "Fetching index quote");
        let body = crate::get_text(&self.http, url).await?;
        parse_chart(&body)
    }
}

/// Extract the quote from a chart body. Uses the last bar that has both an
/// open and a close.
pub fn parse_chart(body: &str) -> Result<Quote> {
    let resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| Error::Provider(e.to_string()))?;

    if let Some(err) = resp.chart.error {
        return Err(Error::Provider(format!("Yahoo chart error: {err}")));
    }

    let bars = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .and_then(|r| r.indicators.quote.into_iter().next())
        .ok_or_else(|| Error::Provider("Yahoo chart response has no quote data".into()))?;

    let (open, close) = bars
        .open
        .iter()
        .zip(bars.close.iter())
        .rev()
        .find_map(|(o, c)| Some(((*o)?, (*c)?)))
        .ok_or_else(|| Error::Provider("Yahoo chart response has no complete bar".into()))?;

    if open <= 0.0 {
        return Err(Error::Provider(format!("Yahoo chart open price is {open}")));
    }

    Ok(Quote {
        price: close,
        change_pct: (close - open) / open * 100.0,
    })
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    quote: Vec<Bars>,
}

#[derive(Deserialize)]
struct Bars {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}
