//! Signal Bot
//!
//! Telegram bot answering /signal commands, plus the periodic scanner that
//! pushes signals to the admin chat.

use dotenvy::dotenv;
use rsi_signals::bot::{schema, BotContext};
use rsi_signals::config::AppConfig;
use rsi_signals::core::scanner::{Scanner, ScannerConfig};
use rsi_signals::core::scheduler::ScanScheduler;
use rsi_signals::logging;
use rsi_signals::services::{
    BinanceMarketDataProvider, LogNotifier, MarketDataProvider, SignalNotifier, TelegramNotifier,
};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::try_init_logging(&config.environment)?;

    info!("Starting Signal Bot");
    info!(environment = %config.environment, "Environment");

    let bot = Bot::new(config.require_bot_token()?);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(
        BinanceMarketDataProvider::with_base_url(config.exchange_base_url.clone())?,
    );

    let notifier: Arc<dyn SignalNotifier> = match config.admin_chat_id {
        Some(chat_id) => {
            info!(chat_id, "Scanner signals go to admin chat");
            Arc::new(TelegramNotifier::new(bot.clone(), chat_id))
        }
        None => {
            warn!("ADMIN_CHAT_ID is not set - scanner signals will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let scanner = Arc::new(Scanner::new(
        provider.clone(),
        notifier,
        ScannerConfig::from_app_config(&config),
    ));
    let scheduler = ScanScheduler::new(scanner, config.scan_interval_seconds)?;
    scheduler.start().await;

    let context = Arc::new(BotContext {
        provider,
        signal_config: config.signal.clone(),
        timeframe: config.timeframe.clone(),
        candle_limit: config.candle_limit,
    });

    info!("Bot is running and waiting for updates...");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Shutting down bot...");
    scheduler.stop().await;
    info!("Bot stopped");

    Ok(())
}
