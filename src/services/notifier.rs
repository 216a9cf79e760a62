//! Delivery of generated signals.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{info, warn};

use crate::bot::formatting::format_signal_message;
use crate::models::signal::SignalResult;
use crate::services::error::NotifyError;

#[async_trait]
pub trait SignalNotifier: Send + Sync {
    async fn deliver(&self, signal: &SignalResult) -> Result<(), NotifyError>;
}

/// Sends signals to a single Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self {
            bot,
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl SignalNotifier for TelegramNotifier {
    async fn deliver(&self, signal: &SignalResult) -> Result<(), NotifyError> {
        self.bot
            .send_message(self.chat_id, format_signal_message(signal))
            .parse_mode(ParseMode::Html)
            .await?;

        info!(
            symbol = %signal.symbol(),
            chat_id = self.chat_id.0,
            "signal delivered to telegram"
        );
        Ok(())
    }
}

/// Fallback used when no admin chat is configured: the signal only reaches the log.
pub struct LogNotifier;

#[async_trait]
impl SignalNotifier for LogNotifier {
    async fn deliver(&self, signal: &SignalResult) -> Result<(), NotifyError> {
        warn!(
            symbol = %signal.symbol(),
            direction = %signal.direction(),
            entry = signal.entry(),
            stop_loss = signal.stop_loss(),
            take_profits = ?signal.take_profits(),
            "signal found but ADMIN_CHAT_ID is not set"
        );
        Ok(())
    }
}
