pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod symbols;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use feed::{Notifier, PriceFeed};
pub use types::*;
