//! Signal decision: threshold rule, configuration and errors.

pub mod config;
pub mod engine;
pub mod error;

pub use config::SignalConfig;
pub use engine::SignalEngine;
pub use error::SignalConfigError;
