//! Results API client
//!
//! Polls the casino results endpoint for the latest round. The canonical
//! response contract is the single-latest-event object; the older
//! list-of-events variant is a migration concern and not handled here.
//!
//! Transport failures are retried with bounded exponential backoff and
//! degrade to "no data" for the cycle. The client never advances the dedup
//! cursor itself; the caller does that only after committing the event to
//! the history buffer.

use crate::config::ApiConfig;
use crate::error::{BotError, Result};
use crate::types::{GameEvent, Outcome, RoundStatus};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub struct ResultsClient {
    http: Client,
    url: String,
    retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

/// Upstream ids show up both as numbers and strings depending on the feed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoundId {
    Num(i64),
    Str(String),
}

impl RoundId {
    fn into_string(self) -> String {
        match self {
            RoundId::Num(n) => n.to_string(),
            RoundId::Str(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRound {
    id: RoundId,
    data: RoundData,
}

#[derive(Debug, Deserialize)]
struct RoundData {
    #[serde(rename = "startedAt")]
    started_at: String,
    status: String,
    result: RoundResult,
}

#[derive(Debug, Deserialize)]
struct RoundResult {
    outcome: String,
}

/// Exponential backoff schedule: `base * 2^attempt`, capped at `max`.
pub fn backoff_delay(base: Duration, max: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    base.saturating_mul(factor).min(max)
}

fn parse_event(round: LatestRound) -> Result<GameEvent> {
    let started_at: DateTime<Utc> = round
        .data
        .started_at
        .parse()
        .map_err(|e| BotError::InvalidResponse(format!("bad startedAt: {}", e)))?;

    let outcome = match round.data.result.outcome.as_str() {
        "BankerWon" => Outcome::BankerWon,
        "PlayerWon" => Outcome::PlayerWon,
        "Tie" => Outcome::Tie,
        other => {
            return Err(BotError::InvalidResponse(format!(
                "unknown outcome {:?}",
                other
            )))
        }
    };

    let status = match round.data.status.as_str() {
        "Resolved" => RoundStatus::Resolved,
        _ => RoundStatus::Pending,
    };

    Ok(GameEvent {
        id: round.id.into_string(),
        started_at,
        status,
        outcome,
    })
}

impl ResultsClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            retries: config.fetch_retries.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        })
    }

    /// Fetch the latest round, or `None` when there is nothing new or the
    /// call failed. Never fatal to the monitoring loop.
    pub async fn fetch_latest(&self, last_seen: Option<&str>) -> Option<GameEvent> {
        let round = match self.fetch_with_retry().await {
            Ok(round) => round,
            Err(e) => {
                tracing::error!("Fetch failed after {} attempts: {}", self.retries, e);
                return None;
            }
        };

        let event = match parse_event(round) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Discarding unusable API response: {}", e);
                return None;
            }
        };

        if last_seen == Some(event.id.as_str()) {
            tracing::debug!("No new round (still {})", event.id);
            return None;
        }

        Some(event)
    }

    async fn fetch_with_retry(&self) -> Result<LatestRound> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(round) => return Ok(round),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.retries {
                        return Err(e);
                    }
                    let delay = backoff_delay(self.base_delay, self.max_delay, attempt - 1);
                    tracing::warn!(
                        "Fetch attempt {}/{} failed: {}, retrying in {:?}",
                        attempt,
                        self.retries,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn fetch_once(&self) -> Result<LatestRound> {
        let round = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(round)
    }
}

#[cfg(test)]
pub(crate) fn parse_event_json(raw: &str) -> Result<GameEvent> {
    let round: LatestRound = serde_json::from_str(raw)?;
    parse_event(round)
}
