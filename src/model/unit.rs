use serde::{Deserialize, Serialize};

/// A unit on the map as the game interface hands it to the economy.
/// Not stored by the economy; passed in per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub nation: String,
    pub x: f64,
    pub y: f64,
    /// Supply drawn per whole unit of distance to the nearest base.
    pub maintenance_cost: u32,
    pub supply_needed: u32,
}

impl Unit {
    pub fn new(name: impl Into<String>, nation: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            nation: nation.into(),
            x,
            y,
            maintenance_cost: 1,
            supply_needed: 0,
        }
    }

    pub fn maintenance_cost(mut self, cost: u32) -> Self {
        self.maintenance_cost = cost;
        self
    }

    pub fn supply_needed(mut self, amount: u32) -> Self {
        self.supply_needed = amount;
        self
    }
}
