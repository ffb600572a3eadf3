//! Configuration loading
//!
//! Layers `config.toml` (optional) with `BACBO_*` environment overrides.

use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
    #[serde(default)]
    pub signal: SignalConfig,
}

/// Results API polling parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Bounded attempts per cycle before the fetch degrades to "no data".
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay")]
    pub retry_max_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Send the idle "monitoring" notice when no bet is pending.
    #[serde(default = "default_true")]
    pub notify_monitoring: bool,
    /// Forward loop errors to the chat (off by default, they go to logs).
    #[serde(default)]
    pub notify_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: String,
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternsConfig {
    #[serde(default = "default_patterns_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    /// Signals for rounds older than this are suppressed.
    #[serde(default = "default_max_round_age")]
    pub max_round_age_secs: u64,
}

fn default_api_url() -> String {
    "https://api.casinoscores.com/svc-evolution-game-events/api/bacbo/latest".to_string()
}
fn default_poll_interval() -> u64 {
    5
}
fn default_request_timeout() -> u64 {
    5
}
fn default_fetch_retries() -> u32 {
    3
}
fn default_retry_base_delay() -> u64 {
    500
}
fn default_retry_max_delay() -> u64 {
    5000
}
fn default_true() -> bool {
    true
}
fn default_history_path() -> String {
    "game_history.json".to_string()
}
fn default_history_capacity() -> usize {
    100
}
fn default_patterns_path() -> String {
    "patterns.json".to_string()
}
fn default_max_round_age() -> u64 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_request_timeout(),
            fetch_retries: default_fetch_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
            retry_max_delay_ms: default_retry_max_delay(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            capacity: default_history_capacity(),
        }
    }
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            path: default_patterns_path(),
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            max_round_age_secs: default_max_round_age(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file plus `BACBO_*` env overrides.
    /// A missing file is fine; defaults cover everything except Telegram
    /// credentials.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("BACBO").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
