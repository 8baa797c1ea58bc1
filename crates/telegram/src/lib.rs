pub mod commands;
pub mod notify;
pub mod report;

pub use commands::{start_bot, BotDeps};
pub use notify::TelegramNotifier;
