use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::history::{HistoryEntry, HistoryKind, HistoryLog};
use super::key_point::{HexId, KeyPoint};

/// A logistics anchor on the map that units draw supply from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyBase {
    pub coords: (f64, f64),
    /// Remaining supply; drawn down by maintenance and never refilled here.
    pub supply_limit: u32,
}

impl SupplyBase {
    pub fn new(x: f64, y: f64, supply_limit: u32) -> Self {
        Self {
            coords: (x, y),
            supply_limit,
        }
    }
}

/// Economic state of one nation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NationAccount {
    pub name: String,
    pub economic_points: u32,
    pub supply_points: u32,
    pub bases: Vec<SupplyBase>,
    /// Objectives this nation holds, keyed by hex.
    pub key_points: BTreeMap<HexId, KeyPoint>,
    pub history: HistoryLog,
    pub turns_processed: u32,
}

impl NationAccount {
    pub fn new(
        name: impl Into<String>,
        economic_points: u32,
        supply_points: u32,
        history_capacity: usize,
    ) -> Self {
        Self {
            name: name.into(),
            economic_points,
            supply_points,
            bases: Vec::new(),
            key_points: BTreeMap::new(),
            history: HistoryLog::with_capacity(history_capacity),
            turns_processed: 0,
        }
    }

    /// Append a history entry stamped with the current turn count.
    pub fn record(&mut self, kind: HistoryKind, message: String) {
        self.history.push(HistoryEntry {
            turn: self.turns_processed,
            kind,
            message,
        });
    }

    /// Sum of the remaining supply limits across all bases.
    pub fn total_base_supply(&self) -> u64 {
        self.bases.iter().map(|b| u64::from(b.supply_limit)).sum()
    }
}
