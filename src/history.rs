//! Bounded, persisted history of observed rounds
//!
//! Newest last. Appends are deduplicated by event id; eviction only happens
//! from the front when capacity is exceeded. The buffer is saved after every
//! successful append so a restart resumes with recent context.

use crate::error::Result;
use crate::types::{GameEvent, Outcome};
use std::collections::VecDeque;
use std::path::Path;

#[derive(Debug)]
pub struct HistoryBuffer {
    events: VecDeque<GameEvent>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Load persisted history. A missing or corrupt file is not fatal: it
    /// logs and falls back to an empty buffer.
    pub fn load(path: impl AsRef<Path>, capacity: usize) -> Self {
        let path = path.as_ref();
        let events: Vec<GameEvent> = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(events) => events,
                Err(e) => {
                    tracing::warn!("Corrupt history file {}: {}, starting empty", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("Cannot read history file {}: {}, starting empty", path.display(), e);
                Vec::new()
            }
        };

        let mut buffer = Self::new(capacity);
        for event in events {
            buffer.append(event);
        }
        buffer
    }

    /// Save the buffer as a JSON list, already truncated to capacity.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let events: Vec<&GameEvent> = self.events.iter().collect();
        let raw = serde_json::to_string(&events)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Append one event. A duplicate id is a no-op and returns false.
    pub fn append(&mut self, event: GameEvent) -> bool {
        if self.events.iter().any(|e| e.id == event.id) {
            tracing::debug!("Duplicate event {} ignored", event.id);
            return false;
        }

        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
        true
    }

    /// Most recent `n` outcome symbols, oldest-first.
    pub fn tail_symbols(&self, n: usize) -> Vec<Outcome> {
        let skip = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip).map(|e| e.outcome).collect()
    }

    /// Id of the newest event, used as the fetch dedup cursor.
    pub fn latest_id(&self) -> Option<&str> {
        self.events.back().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
