//! Telegram command handlers.

use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};

use crate::bot::formatting::{escape, format_outcome_message};
use crate::services::market_data::MarketDataProvider;
use crate::signals::{SignalConfig, SignalEngine};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show your chat id and the command list.")]
    Start,
    #[command(description = "show this help.")]
    Help,
    #[command(description = "analyze a symbol, e.g. /signal BTC/USDT")]
    Signal(String),
}

/// Dependencies shared by every command handler.
pub struct BotContext {
    pub provider: Arc<dyn MarketDataProvider>,
    pub signal_config: SignalConfig,
    pub timeframe: String,
    pub candle_limit: usize,
}

pub fn schema() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(
        dptree::entry()
            .filter_command::<Command>()
            .endpoint(handle_command),
    )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> Result<(), HandlerError> {
    let reply = match cmd {
        Command::Start => start_message(msg.chat.id.0),
        Command::Help => Command::descriptions().to_string(),
        Command::Signal(arg) => match parse_symbol(&arg) {
            None => "⚠️ Usage: /signal &lt;symbol&gt;\nExample: <code>/signal BTC/USDT</code>".to_string(),
            Some(symbol) => {
                bot.send_message(msg.chat.id, format!("🔍 Analyzing {symbol}..."))
                    .await?;
                analyze(&ctx, &symbol).await
            }
        },
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Fetch candles, run the engine and render the reply. Failures become reply text.
pub async fn analyze(ctx: &BotContext, symbol: &str) -> String {
    let candles = match ctx
        .provider
        .get_candles(symbol, &ctx.timeframe, ctx.candle_limit)
        .await
    {
        Ok(candles) => candles,
        Err(e) => {
            error!(symbol = %symbol, error = %e, "failed to fetch candles for /signal");
            return format!("❌ Error fetching data for {}", escape(symbol));
        }
    };

    match SignalEngine::decide(symbol, &candles, &ctx.signal_config) {
        Ok(outcome) => {
            info!(symbol = %symbol, signal = outcome.is_signal(), "/signal analyzed");
            format_outcome_message(symbol, &outcome)
        }
        Err(e) => {
            error!(symbol = %symbol, error = %e, "invalid signal configuration");
            "❌ An error occurred while analyzing.".to_string()
        }
    }
}

/// First whitespace-separated token, upper-cased.
pub fn parse_symbol(arg: &str) -> Option<String> {
    arg.split_whitespace().next().map(str::to_uppercase)
}

fn start_message(chat_id: i64) -> String {
    format!(
        "👋 Hello! I am your trading signal bot.\nYour chat id is: <code>{chat_id}</code> (set it as ADMIN_CHAT_ID to receive scanner signals)\n\nCommands:\n/signal &lt;symbol&gt; - get a manual signal (e.g. /signal BTC/USDT)\n/help - list commands"
    )
}
