use std::sync::Arc;

use teloxide::Bot;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use alerts::{AlertChecker, AlertStore};
use common::{Config, Notifier, PriceFeed};
use market::MarketClient;
use telegram_ctrl::{start_bot, BotDeps, TelegramNotifier};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(interval = ?cfg.check_interval, "PriceBot starting");

    // ── Collaborators ─────────────────────────────────────────────────────────
    let feed: Arc<dyn PriceFeed> = match MarketClient::new(&cfg) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Failed to initialize market data client");
            std::process::exit(1);
        }
    };
    let bot = Bot::new(cfg.bot_token.clone());
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(bot.clone()));

    // ── Shared state ──────────────────────────────────────────────────────────
    let store = AlertStore::new();

    // ── Alert checker ─────────────────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let checker = AlertChecker::new(store.clone(), feed.clone(), notifier, cfg.check_interval);
    let checker_handle = tokio::spawn(checker.run(shutdown_rx));

    // ── Telegram bot (runs until ctrl-c) ──────────────────────────────────────
    start_bot(bot, BotDeps { store, feed }).await;

    info!("Shutdown signal received. Stopping alert checker.");
    let _ = shutdown_tx.send(true);
    if let Err(e) = checker_handle.await {
        error!(error = %e, "Alert checker task panicked");
    }
    info!("Exiting.");
}
