//! Back-test the RSI/ATR signal rule against recent exchange history.

use clap::Parser;
use dotenvy::dotenv;
use rsi_signals::backtest::{BacktestConfig, Backtester};
use rsi_signals::config::AppConfig;
use rsi_signals::logging;
use rsi_signals::services::{BinanceMarketDataProvider, MarketDataProvider};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "backtest", about = "Replay the signal rule over historical candles")]
struct Args {
    /// Symbol to test, e.g. BTC/USDT
    #[arg(short, long, default_value = "BTC/USDT")]
    symbol: String,

    /// Candle timeframe (defaults to DEFAULT_TIMEFRAME)
    #[arg(short, long)]
    timeframe: Option<String>,

    /// Number of candles to fetch (exchange maximum is 1000)
    #[arg(short, long, default_value_t = 1000)]
    limit: usize,

    #[arg(long, default_value_t = 1000.0)]
    initial_balance: f64,

    /// Amount lost per stopped-out trade
    #[arg(long, default_value_t = 10.0)]
    risk_per_trade: f64,

    /// First candle index allowed to produce a signal
    #[arg(long, default_value_t = 50)]
    warmup: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let args = Args::parse();

    let config = AppConfig::from_env()?;
    logging::try_init_logging(&config.environment)?;

    let timeframe = args.timeframe.unwrap_or_else(|| config.timeframe.clone());
    info!(symbol = %args.symbol, timeframe = %timeframe, limit = args.limit, "Fetching historical data");

    let provider = BinanceMarketDataProvider::with_base_url(config.exchange_base_url.clone())?;
    let candles = provider
        .get_candles(&args.symbol, &timeframe, args.limit)
        .await?;

    let backtester = Backtester::new(BacktestConfig {
        initial_balance: args.initial_balance,
        risk_per_trade: args.risk_per_trade,
        warmup: args.warmup,
        signal: config.signal,
    });
    let report = backtester.run(&args.symbol.to_uppercase(), &candles)?;

    println!("{report}");
    Ok(())
}
