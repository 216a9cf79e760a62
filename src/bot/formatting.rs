//! Human-readable rendering of signal outcomes (Telegram HTML).

use crate::models::signal::{SignalDirection, SignalOutcome, SignalResult};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Prices below 10 keep four decimals, everything else two.
pub fn format_price(value: f64) -> String {
    if value < 10.0 {
        format!("{value:.4}")
    } else {
        format!("{value:.2}")
    }
}

pub fn format_signal_message(signal: &SignalResult) -> String {
    let direction = match signal.direction() {
        SignalDirection::Long => "🟢 LONG",
        SignalDirection::Short => "🔴 SHORT",
    };

    let mut msg = format!(
        "📊 <b>Trading Signal: {}</b>\n{RULE}\n<b>Direction:</b> {direction}\n<b>Entry:</b> <code>{}</code>\n<b>ATR:</b> <code>{}</code> | <b>RSI:</b> <code>{}</code>\n\n🛑 <b>Stop-Loss:</b> <code>{}</code>\n\n",
        escape(signal.symbol()),
        format_price(signal.entry()),
        format_price(signal.atr()),
        format_price(signal.rsi()),
        format_price(signal.stop_loss()),
    );

    for (i, tp) in signal.take_profits().iter().enumerate() {
        msg.push_str(&format!(
            "🎯 <b>Take-Profit {}:</b> <code>{}</code>\n",
            i + 1,
            format_price(*tp)
        ));
    }

    msg.push_str(&format!(
        "{RULE}\n🕒 {}\n⚠️ <i>Trade at your own risk.</i>",
        signal.timestamp().format("%Y-%m-%d %H:%M UTC")
    ));
    msg
}

/// Reply text for an on-demand analysis of `symbol`.
pub fn format_outcome_message(symbol: &str, outcome: &SignalOutcome) -> String {
    match outcome {
        SignalOutcome::Signal(signal) => format_signal_message(signal),
        SignalOutcome::NoSignal { rsi, atr } => format!(
            "⏸ <b>No signal for {}</b>\nRSI <code>{}</code> is inside the neutral band (ATR <code>{}</code>).",
            escape(symbol),
            format_price(*rsi),
            format_price(*atr),
        ),
        SignalOutcome::InsufficientData {
            required,
            available,
        } => format!(
            "⚠️ <b>Not enough data for {}</b>\nIndicators need {required} candles, got {available}.",
            escape(symbol),
        ),
    }
}

/// Escape the characters Telegram's HTML parse mode treats as markup.
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
