//! Error types for the bot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    /// Invalid pattern definition. Fatal at startup, never raised afterwards.
    #[error("invalid pattern {pattern_id}: {detail}")]
    CatalogValidation { pattern_id: u32, detail: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The results endpoint answered but the payload is unusable.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// A matched pattern's action cannot produce a bet side for its sequence.
    /// The signal is skipped, the loop continues.
    #[error("pattern {pattern_id}: cannot resolve bet: {reason}")]
    UnresolvableAction { pattern_id: u32, reason: String },

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}
