use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use common::{Error, Notifier, Result, UserId};

/// Delivers alert notifications as Telegram messages.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(user_id), text)
            .await
            .map(|_| ())
            .map_err(|e| Error::Telegram(e.to_string()))
    }
}
