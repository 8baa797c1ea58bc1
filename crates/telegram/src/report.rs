use tracing::warn;

use common::{format, symbols, PriceFeed, PriceSnapshot, Quote};

/// Reply sent when either upstream fetch fails.
pub const UNAVAILABLE: &str = "⚠️ Price data is unavailable right now. Try again later.";

/// Fetch fresh prices and the index quote concurrently and format the
/// report. Any fetch failure yields [`UNAVAILABLE`].
pub async fn price_report(feed: &dyn PriceFeed) -> String {
    let ids = symbols::provider_ids();
    let (snapshot, index) = tokio::join!(feed.snapshot(&ids), feed.index_quote());

    match (snapshot, index) {
        (Ok(snapshot), Ok(index)) => format_report(&snapshot, &index),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Price query failed");
            UNAVAILABLE.to_string()
        }
    }
}

/// One `SYMBOL: $price (±change%)` line per known symbol present in the
/// snapshot, in table order, then the index line.
pub fn format_report(snapshot: &PriceSnapshot, index: &Quote) -> String {
    symbols::KNOWN_SYMBOLS
        .iter()
        .filter_map(|(ticker, id)| snapshot.get(id).map(|q| quote_line(ticker, q)))
        .chain(std::iter::once(quote_line(symbols::INDEX_LABEL, index)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_line(label: &str, quote: &Quote) -> String {
    format!(
        "{label}: {} ({})",
        format::usd(quote.price),
        format::signed_pct(quote.change_pct)
    )
}
