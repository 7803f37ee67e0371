//! Session journal of logged cards.
//!
//! Every reply that carries a card is recorded with its raw utterance and a
//! local timestamp. Entries are kept newest first, the way the history view
//! lists them. Nothing is persisted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::{CardType, LogCard, ResponseResult};

/// One logged card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub card: LogCard,
    /// What the user typed
    pub raw: String,
    pub logged_at: DateTime<Local>,
}

impl LogEntry {
    /// First two values, as in the dashboard's recent-entries table
    pub fn summary(&self) -> String {
        self.card.data.values().take(2).collect::<Vec<_>>().join(" · ")
    }

    /// Every `label: value` pair, as in the history timeline
    pub fn details(&self) -> String {
        self.card
            .data
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join(" · ")
    }

    /// `HH:MM`, 24-hour
    pub fn time_label(&self) -> String {
        self.logged_at.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<LogEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the card of `response`, if any. Returns the new entry.
    pub fn record(&mut self, raw: &str, response: &ResponseResult) -> Option<&LogEntry> {
        self.record_at(raw, response, Local::now())
    }

    pub fn record_at(
        &mut self,
        raw: &str,
        response: &ResponseResult,
        logged_at: DateTime<Local>,
    ) -> Option<&LogEntry> {
        let card = response.card.clone()?;
        self.entries.insert(
            0,
            LogEntry {
                id: Uuid::new_v4(),
                card,
                raw: raw.to_string(),
                logged_at,
            },
        );
        self.entries.first()
    }

    /// Newest first
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, card_type: CardType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.card.card_type == card_type)
            .count()
    }
}
