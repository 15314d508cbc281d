use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    GameStart,
    Income,
    Expense,
    Spending,
    Maintenance,
    MaintenanceShortfall,
    RandomEvent,
    KeyPointCaptured,
}

/// One line of a nation's economic log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Number of turns the nation had completed when this was written.
    pub turn: u32,
    pub kind: HistoryKind,
    pub message: String,
}

/// Bounded, append-only economic log. Once `capacity` is reached the oldest
/// entry is dropped for each new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    dropped: u64,
}

impl HistoryLog {
    /// A capacity of 0 is treated as 1 so the newest entry is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries evicted since the log was created.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
