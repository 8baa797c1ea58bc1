//! The fixed set of tickers the bot supports.
//!
//! Each entry maps the short ticker users type to the CoinGecko id used when
//! fetching prices. Extend by editing [`KNOWN_SYMBOLS`].

/// Ticker → CoinGecko id, in report order.
pub const KNOWN_SYMBOLS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("CRO", "crypto-com-chain"),
];

/// Display label for the reference index line in price reports.
pub const INDEX_LABEL: &str = "S&P500";

/// Provider id for an uppercase ticker, if the ticker is supported.
pub fn provider_id(symbol: &str) -> Option<&'static str> {
    KNOWN_SYMBOLS
        .iter()
        .find(|(ticker, _)| *ticker == symbol)
        .map(|(_, id)| *id)
}

pub fn is_known(symbol: &str) -> bool {
    provider_id(symbol).is_some()
}

/// All provider ids, in table order.
pub fn provider_ids() -> Vec<&'static str> {
    KNOWN_SYMBOLS.iter().map(|(_, id)| *id).collect()
}

/// Comma-separated list of supported tickers, for user-facing messages.
pub fn supported_list() -> String {
    KNOWN_SYMBOLS
        .iter()
        .map(|(ticker, _)| *ticker)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(provider_id("BTC"), Some("bitcoin"));
        assert_eq!(provider_id("CRO"), Some("crypto-com-chain"));
        assert_eq!(provider_id("btc"), None);
        assert_eq!(provider_id("DOGE"), None);
    }

    #[test]
    fn ids_follow_table_order() {
        assert_eq!(provider_ids(), vec!["bitcoin", "ethereum", "crypto-com-chain"]);
        assert_eq!(supported_list(), "BTC, ETH, CRO");
    }
}
