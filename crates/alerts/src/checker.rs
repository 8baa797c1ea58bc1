use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use common::{format, symbols, Alert, Notifier, PriceFeed, Result};

use crate::AlertStore;

/// Counters for one evaluation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Alerts compared against a price.
    pub evaluated: usize,
    /// Alerts whose condition held.
    pub triggered: usize,
    /// Notifications the dispatcher accepted.
    pub delivered: usize,
    /// Alerts with an unknown symbol or no price in the snapshot.
    pub skipped: usize,
}

/// Periodically checks every stored alert against fresh prices.
///
/// One price snapshot is fetched per cycle, shared by all users and alerts.
/// There is no deduplication: an alert whose condition stays true notifies
/// its owner on every cycle.
pub struct AlertChecker {
    store: AlertStore,
    feed: Arc<dyn PriceFeed>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl AlertChecker {
    pub fn new(
        store: AlertStore,
        feed: Arc<dyn PriceFeed>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            feed,
            notifier,
            interval,
        }
    }

    /// Run cycles forever, one per `interval`, the first immediately.
    ///
    /// A failed cycle is logged and the next one runs on schedule. Missed
    /// ticks are not replayed. Returns once `shutdown` becomes `true` or its
    /// sender is dropped. Call from `tokio::spawn`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval = ?self.interval, "AlertChecker running");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_cycle().await {
                        Ok(report) => info!(
                            evaluated = report.evaluated,
                            triggered = report.triggered,
                            delivered = report.delivered,
                            skipped = report.skipped,
                            "Alert cycle complete"
                        ),
                        Err(e) => error!(error = %e, "Alert cycle failed, retrying next interval"),
                    }
                }

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("AlertChecker shutting down");
                        return;
                    }
                }
            }
        }
    }

    /// Fetch one snapshot and evaluate every stored alert against it.
    ///
    /// Fails only if the snapshot fetch fails; in that case nothing is sent.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let snapshot = self.feed.snapshot(&symbols::provider_ids()).await?;
        let entries = self.store.all_entries().await;
        debug!(alerts = entries.len(), quotes = snapshot.quotes.len(), "Evaluating alerts");

        let mut report = CycleReport::default();

        for (user_id, alert) in &entries {
            let Some(provider_id) = symbols::provider_id(&alert.symbol) else {
                debug!(user_id, symbol = %alert.symbol, "Skipping alert with unknown symbol");
                report.skipped += 1;
                continue;
            };

            let Some(quote) = snapshot.get(provider_id) else {
                warn!(symbol = %alert.symbol, provider_id, "No price in snapshot, skipping alert");
                report.skipped += 1;
                continue;
            };

            report.evaluated += 1;
            if !alert.is_triggered(quote.price) {
                continue;
            }

            report.triggered += 1;
            info!(user_id, alert = %alert, price = quote.price, "Alert triggered");

            let text = notification_text(alert, quote.price);
            match self.notifier.notify(*user_id, &text).await {
                Ok(()) => report.delivered += 1,
                Err(e) => warn!(user_id, error = %e, "Failed to deliver alert notification"),
            }
        }

        Ok(report)
    }
}

/// One-line notification for a triggered alert.
pub fn notification_text(alert: &Alert, price: f64) -> String {
    format!("🔔 {alert} | Current price: {}", format::usd(price))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
