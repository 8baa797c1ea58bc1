use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Telegram chat id of the user who registered an alert.
///
/// In a private chat this equals the user's id, so it is also where
/// replies and notifications go.
pub type UserId = i64;

/// Direction of an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Fires while the price is strictly below the threshold.
    Below,
    /// Fires while the price is strictly above the threshold.
    Above,
}

impl Comparator {
    pub fn from_symbol(op: char) -> Option<Self> {
        match op {
            '<' => Some(Comparator::Below),
            '>' => Some(Comparator::Above),
            _ => None,
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparator::Below => write!(f, "<"),
            Comparator::Above => write!(f, ">"),
        }
    }
}

/// A user-registered price condition. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Uppercase ticker, e.g. "BTC".
    pub symbol: String,
    pub comparator: Comparator,
    pub threshold: f64,
}

impl Alert {
    pub fn new(symbol: impl Into<String>, comparator: Comparator, threshold: f64) -> Self {
        Self {
            symbol: symbol.into(),
            comparator,
            threshold,
        }
    }

    pub fn is_triggered(&self, price: f64) -> bool {
        match self.comparator {
            Comparator::Below => price < self.threshold,
            Comparator::Above => price > self.threshold,
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.comparator, self.threshold)
    }
}

/// Current price and percent change for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// USD price.
    pub price: f64,
    /// Percent change, e.g. `1.5` = +1.5%.
    pub change_pct: f64,
}

/// Prices for a set of assets fetched in one upstream call.
/// Keyed by provider id (e.g. "bitcoin"), not ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub quotes: HashMap<String, Quote>,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn new(quotes: HashMap<String, Quote>) -> Self {
        Self {
            quotes,
            fetched_at: Utc::now(),
        }
    }

    pub fn get(&self, provider_id: &str) -> Option<&Quote> {
        self.quotes.get(provider_id)
    }

    /// Price for a ticker, resolved through the known-symbol table.
    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        crate::symbols::provider_id(symbol)
            .and_then(|id| self.get(id))
            .map(|q| q.price)
    }
}
