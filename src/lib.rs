//! Bac Bo Signal Bot
//!
//! Polls the casino results API, matches the recent outcome history against
//! a hand-authored pattern catalog and pushes betting signals to a Telegram
//! chat.
//!
//! ```text
//! ResultsClient → HistoryBuffer → Matcher → Resolver → SignalEngine → Notifier
//!                                     ↑
//!                              PatternCatalog
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod matcher;
pub mod notify;
pub mod resolver;
pub mod telegram;
pub mod types;

#[cfg(test)]
mod types_tests;
#[cfg(test)]
mod catalog_tests;
#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod matcher_tests;
