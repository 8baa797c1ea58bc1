use std::sync::Arc;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::UserId,
    utils::command::BotCommands,
};
use tracing::{debug, info};

use alerts::{parse_alert, AlertStore};
use common::PriceFeed;

use crate::report::price_report;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Dependencies injected into every handler via `dptree`.
#[derive(Clone)]
pub struct BotDeps {
    pub store: AlertStore,
    pub feed: Arc<dyn PriceFeed>,
}

/// Telegram bot commands exposed to users.
#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "Send `alert BTC < 65000` to get notified when a price crosses a threshold.\n\nCommands:"
)]
pub enum Command {
    #[command(description = "Show current prices")]
    Start,
    #[command(description = "Show current prices")]
    Status,
    #[command(description = "List your alerts")]
    Alerts,
    #[command(description = "Show this help")]
    Help,
}

/// Start the Telegram bot in long-polling mode. Returns after ctrl-c.
pub async fn start_bot(bot: Bot, deps: BotDeps) {
    let deps = Arc::new(deps);

    info!("Telegram bot starting (long-polling)");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_prices))
        .branch(case![Command::Status].endpoint(handle_prices))
        .branch(case![Command::Alerts].endpoint(handle_alerts))
        .branch(case![Command::Help].endpoint(handle_help));

    let text_handler = dptree::filter_map(|msg: Message| msg.text().map(str::to_owned))
        .endpoint(handle_text);

    Update::filter_message()
        .filter_map(|msg: Message| msg.from().map(|u| u.id))
        .branch(command_handler)
        .branch(text_handler)
}

async fn handle_prices(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let text = price_report(deps.feed.as_ref()).await;
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn handle_alerts(
    bot: Bot,
    msg: Message,
    user_id: UserId,
    deps: Arc<BotDeps>,
) -> HandlerResult {
    let text = alerts_text(&deps.store, user_key(user_id)).await;
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    user_id: UserId,
    text: String,
    deps: Arc<BotDeps>,
) -> HandlerResult {
    if let Some(reply) = interpret_text(&deps.store, user_key(user_id), &text).await {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}

/// Alerts are keyed by the sender's Telegram id, which doubles as the chat
/// id of their private chat with the bot.
fn user_key(user_id: UserId) -> common::UserId {
    user_id.0 as common::UserId
}

/// React to free text. Returns the reply to send, or `None` to stay silent.
///
/// Only alert commands get a reply: a confirmation when the alert is stored,
/// otherwise the reason it was refused. Everything else is ignored.
pub async fn interpret_text(store: &AlertStore, user_id: common::UserId, text: &str) -> Option<String> {
    match parse_alert(text)? {
        Ok(alert) => {
            let reply = format!("✅ Alert saved: {alert}");
            store.register(user_id, alert).await;
            Some(reply)
        }
        Err(e) => {
            debug!(user_id, text, error = ?e, "Rejected alert command");
            Some(e.to_string())
        }
    }
}

/// The user's alerts, one per line, in registration order.
pub async fn alerts_text(store: &AlertStore, user_id: common::UserId) -> String {
    let alerts = store.alerts_for(user_id).await;
    if alerts.is_empty() {
        return "You have no alerts. Example: alert BTC < 65000".to_string();
    }

    let mut text = format!("Your alerts ({}):", alerts.len());
    for (i, alert) in alerts.iter().enumerate() {
        text.push_str(&format!("\n{}. {alert}", i + 1));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Alert, Comparator};

    #[tokio::test]
    async fn valid_alert_is_stored_and_confirmed() {
        let store = AlertStore::new();

        let reply = interpret_text(&store, 10, "alert btc < 65000").await;

        assert_eq!(reply.as_deref(), Some("✅ Alert saved: BTC < 65000"));
        assert_eq!(
            store.alerts_for(10).await,
            vec![Alert::new("BTC", Comparator::Below, 65_000.0)]
        );
        assert!(store.alerts_for(11).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_alert_gets_usage_hint_and_stores_nothing() {
        let store = AlertStore::new();

        for text in ["alert", "alert BTC 65000", "alert BTC < lots", "ALERT ETH >> 5"] {
            let reply = interpret_text(&store, 10, text).await;
            assert_eq!(reply.as_deref(), Some("⚠️ Format: alert BTC < 65000"), "{text:?}");
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_symbol_is_refused() {
        let store = AlertStore::new();

        let reply = interpret_text(&store, 10, "alert SOL > 100").await.unwrap();

        assert!(reply.contains("Unknown symbol SOL"), "{reply}");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn other_text_is_silently_ignored() {
        let store = AlertStore::new();

        for text in ["hi", "how much is btc?", "65000", ""] {
            assert_eq!(interpret_text(&store, 10, text).await, None, "{text:?}");
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn alert_listing() {
        let store = AlertStore::new();
        assert_eq!(
            alerts_text(&store, 1).await,
            "You have no alerts. Example: alert BTC < 65000"
        );

        interpret_text(&store, 1, "alert BTC < 65000").await;
        interpret_text(&store, 1, "alert eth>4000.5").await;
        interpret_text(&store, 2, "alert CRO > 1").await;

        assert_eq!(
            alerts_text(&store, 1).await,
            "Your alerts (2):\n1. BTC < 65000\n2. ETH > 4000.5"
        );
    }

    #[test]
    fn help_lists_every_command() {
        let help = Command::descriptions().to_string();
        for cmd in ["/start", "/status", "/alerts", "/help"] {
            assert!(help.contains(cmd), "{cmd} missing from help");
        }
    }
}
