use std::time::Duration;

/// All configuration loaded from environment variables at startup.
/// A missing `BOT_TOKEN` causes an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    // Alert checker
    pub check_interval: Duration,

    // Market data
    pub coingecko_base_url: String,
    pub yahoo_base_url: String,
    pub index_symbol: String,
    pub fetch_retries: u32,
    pub http_timeout: Duration,
}

impl Config {
    pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 6 * 60 * 60;
    pub const DEFAULT_COINGECKO_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";
    pub const DEFAULT_YAHOO_BASE_URL: &'static str = "https://query1.finance.yahoo.com";
    pub const DEFAULT_INDEX_SYMBOL: &'static str = "^GSPC";

    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics if `BOT_TOKEN` is missing.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("BOT_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                panic!("Required environment variable 'BOT_TOKEN' is not set. Check your .env file.")
            });

        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Config {
            bot_token,
            check_interval: Duration::from_secs(
                parsed("CHECK_INTERVAL_SECS")
                    .filter(|&secs| secs > 0)
                    .unwrap_or(Self::DEFAULT_CHECK_INTERVAL_SECS),
            ),
            coingecko_base_url: lookup("COINGECKO_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_COINGECKO_BASE_URL.to_string()),
            yahoo_base_url: lookup("YAHOO_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_YAHOO_BASE_URL.to_string()),
            index_symbol: lookup("INDEX_SYMBOL")
                .unwrap_or_else(|| Self::DEFAULT_INDEX_SYMBOL.to_string()),
            fetch_retries: parsed("FETCH_RETRIES").map(|v| v as u32).unwrap_or(2),
            http_timeout: Duration::from_secs(parsed("HTTP_TIMEOUT_SECS").unwrap_or(10)),
        }
    }
}
