//! Bounded per-date history of view counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Count;

/// One observation: `{"date": "2024-01-01", "views": 5}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub views: Count,
}

/// Ordered oldest to newest, at most one entry per date.
///
/// Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Record `views` for `date`, keeping at most `max_entries`.
    ///
    /// A re-run on the same date replaces the last entry instead of
    /// appending. A backdated run that hits an older entry replaces that
    /// one, so each date appears once. When the length exceeds the bound,
    /// the oldest entries are dropped.
    pub fn record(&mut self, date: NaiveDate, views: Count, max_entries: usize) {
        // Searching from the tail hits the same-day re-run first.
        match self.entries.iter_mut().rev().find(|e| e.date == date) {
            Some(existing) => existing.views = views,
            None => self.entries.push(HistoryEntry { date, views }),
        }

        if self.entries.len() > max_entries {
            let excess = self.entries.len() - max_entries;
            self.entries.drain(..excess);
        }
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }
}
