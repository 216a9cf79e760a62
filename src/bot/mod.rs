//! Chat bot surface: command handling and message rendering.

pub mod commands;
pub mod formatting;

pub use commands::{schema, BotContext, Command};
pub use formatting::{format_outcome_message, format_signal_message};
