//! Per-nation economy: resource pools, supply bases, key points and the
//! end-of-turn pipeline.
//!
//! Every operation looks the nation up first and fails with
//! [`EconomyError::NationNotFound`] on a miss. Guarded operations either apply
//! completely or leave the account untouched.

mod events;
mod key_points;
mod maintenance;
mod report;

use std::collections::BTreeMap;

use rand::RngCore;
use tracing::{debug, info, warn};

pub use events::{
    AllyContribution, AlliedSupport, EconomicEvent, EconomicEventKind, RANDOM_EVENTS,
};
pub use maintenance::{MaintenanceReport, UnitDraw, UnitShortfall};

use crate::config::EconomyConfig;
use crate::error::EconomyError;
use crate::model::{HexId, HistoryKind, KeyPoint, NationAccount, SupplyBase};

pub type EconomyResult<T> = Result<T, EconomyError>;

/// Result of a clamped deduction: what was actually taken and what could not be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduction {
    pub charged: u32,
    pub shortfall: u32,
}

/// Everything `process_turn` did for one nation.
#[derive(Debug, Clone)]
pub struct TurnSummary {
    pub nation: String,
    /// Turn number just completed (1-based).
    pub turn: u32,
    pub economic_points: u32,
    /// Flat maintenance outcome: total charged, or the shortfall error.
    pub maintenance: EconomyResult<u64>,
    pub event: EconomicEvent,
    pub report: String,
}

/// Owns the economic state of every nation in a game.
///
/// Mutations take `&mut self`; whoever holds the system mutably is the single
/// turn owner. Hosts that share it across threads must lock it themselves.
#[derive(Debug, Clone)]
pub struct EconomySystem {
    config: EconomyConfig,
    nations: BTreeMap<String, NationAccount>,
    /// Uncaptured objectives loaded from the map file.
    key_points: BTreeMap<HexId, KeyPoint>,
}

impl Default for EconomySystem {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_points(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

impl EconomySystem {
    /// Economy with the default campaign nations.
    pub fn new() -> Self {
        Self::from_config(EconomyConfig::default())
    }

    pub fn from_config(config: EconomyConfig) -> Self {
        let mut nations = BTreeMap::new();
        for setup in &config.nations {
            let economic_points = setup.economic_points.min(config.max_economic_points);
            let supply_points = setup.supply_points.min(config.max_supply_points);
            let mut account = NationAccount::new(
                setup.name.clone(),
                economic_points,
                supply_points,
                config.history_capacity,
            );
            account.bases = setup
                .bases
                .iter()
                .map(|b| SupplyBase::new(b.x, b.y, b.supply_limit))
                .collect();
            account.record(
                HistoryKind::GameStart,
                format!(
                    "Game start: {} has {economic_points} economic points and {supply_points} supply points.",
                    setup.name
                ),
            );
            if nations.insert(setup.name.clone(), account).is_some() {
                warn!(nation = %setup.name, "duplicate nation in config; later entry wins");
            }
        }
        Self {
            config,
            nations,
            key_points: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn nations(&self) -> impl Iterator<Item = &NationAccount> {
        self.nations.values()
    }

    pub fn get_nation_data(&self, nation: &str) -> Option<&NationAccount> {
        self.nations.get(nation)
    }

    fn account(&self, nation: &str) -> EconomyResult<&NationAccount> {
        match self.nations.get(nation) {
            Some(account) => Ok(account),
            None => {
                warn!(nation, "no economic data for nation");
                Err(EconomyError::NationNotFound(nation.to_string()))
            }
        }
    }

    fn account_mut(&mut self, nation: &str) -> EconomyResult<&mut NationAccount> {
        match self.nations.get_mut(nation) {
            Some(account) => Ok(account),
            None => {
                warn!(nation, "no economic data for nation");
                Err(EconomyError::NationNotFound(nation.to_string()))
            }
        }
    }

    // -- Point adjustments --

    /// Add `amount` (may be negative) to economic points. Returns the new value.
    pub fn modify_economic_points(&mut self, nation: &str, amount: i64) -> EconomyResult<u32> {
        let max = self.config.max_economic_points;
        let account = self.account_mut(nation)?;
        account.economic_points =
            clamp_points(i64::from(account.economic_points).saturating_add(amount), max);
        debug!(nation, amount, value = account.economic_points, "economic points changed");
        Ok(account.economic_points)
    }

    /// Add `amount` (may be negative) to supply points. Returns the new value.
    pub fn modify_supply_points(&mut self, nation: &str, amount: i64) -> EconomyResult<u32> {
        let max = self.config.max_supply_points;
        let account = self.account_mut(nation)?;
        account.supply_points =
            clamp_points(i64::from(account.supply_points).saturating_add(amount), max);
        debug!(nation, amount, value = account.supply_points, "supply points changed");
        Ok(account.supply_points)
    }

    /// Put both pools back to the configured reset values. Bases and history are kept.
    pub fn reset_economy(&mut self, nation: &str) -> EconomyResult<()> {
        let economic = self.config.reset_economic_points.min(self.config.max_economic_points);
        let supply = self.config.reset_supply_points.min(self.config.max_supply_points);
        let account = self.account_mut(nation)?;
        account.economic_points = economic;
        account.supply_points = supply;
        info!(nation, "economy reset to starting values");
        Ok(())
    }

    pub fn add_income(&mut self, nation: &str, amount: u32) -> EconomyResult<u32> {
        let max = self.config.max_economic_points;
        let account = self.account_mut(nation)?;
        account.economic_points =
            clamp_points(i64::from(account.economic_points) + i64::from(amount), max);
        let message = format!(
            "Income: {amount}. Economic points now {}",
            account.economic_points
        );
        info!(nation, "{message}");
        account.record(HistoryKind::Income, message);
        Ok(account.economic_points)
    }

    /// Deduct `amount`, stopping at zero. The part that could not be paid is
    /// reported as the shortfall rather than rejected.
    pub fn add_expense(&mut self, nation: &str, amount: u32) -> EconomyResult<Deduction> {
        let account = self.account_mut(nation)?;
        let charged = amount.min(account.economic_points);
        let shortfall = amount - charged;
        account.economic_points -= charged;

        let mut message = format!(
            "Expense: {amount}. Economic points now {}",
            account.economic_points
        );
        if shortfall > 0 {
            message.push_str(&format!(" ({shortfall} could not be covered)"));
            warn!(nation, amount, shortfall, "expense exceeded economic points");
        } else {
            info!(nation, "{message}");
        }
        account.record(HistoryKind::Expense, message);
        Ok(Deduction { charged, shortfall })
    }

    /// Spend economic points on something named by `description`.
    /// Rejected without change when the nation cannot afford it.
    pub fn spend_economic_points(
        &mut self,
        nation: &str,
        amount: u32,
        description: &str,
    ) -> EconomyResult<u32> {
        let account = self.account_mut(nation)?;
        if amount > account.economic_points {
            warn!(
                nation,
                amount,
                available = account.economic_points,
                "cannot spend economic points"
            );
            return Err(EconomyError::InsufficientEconomicPoints {
                required: u64::from(amount),
                available: account.economic_points,
            });
        }
        account.economic_points -= amount;
        let message = format!(
            "Spent {amount} economic points on {description}. Remaining: {}",
            account.economic_points
        );
        info!(nation, "{message}");
        account.record(HistoryKind::Spending, message);
        Ok(account.economic_points)
    }

    /// Convert `cost` economic points into `amount` supply points.
    /// Returns the new supply point total.
    pub fn produce_supply(&mut self, nation: &str, cost: u32, amount: u32) -> EconomyResult<u32> {
        let max = self.config.max_supply_points;
        let account = self.account_mut(nation)?;
        if account.economic_points < cost {
            warn!(
                nation,
                required = cost,
                available = account.economic_points,
                "not enough economic points to produce supply"
            );
            return Err(EconomyError::InsufficientEconomicPoints {
                required: u64::from(cost),
                available: account.economic_points,
            });
        }
        account.economic_points -= cost;
        account.supply_points =
            clamp_points(i64::from(account.supply_points) + i64::from(amount), max);
        info!(nation, cost, amount, "produced supply");
        Ok(account.supply_points)
    }

    // -- Setup --

    pub fn add_base(
        &mut self,
        nation: &str,
        x: f64,
        y: f64,
        supply_limit: u32,
    ) -> EconomyResult<()> {
        let account = self.account_mut(nation)?;
        account.bases.push(SupplyBase::new(x, y, supply_limit));
        debug!(nation, x, y, supply_limit, "supply base added");
        Ok(())
    }

    /// Add a base with the configured default supply limit.
    pub fn add_default_base(&mut self, nation: &str, x: f64, y: f64) -> EconomyResult<()> {
        let limit = self.config.default_base_supply_limit;
        self.add_base(nation, x, y, limit)
    }

    // -- Turn pipeline --

    /// End-of-turn hook: income, flat maintenance, one random event, report.
    ///
    /// A maintenance shortfall is recorded in the summary and does not stop the
    /// rest of the turn.
    pub fn process_turn(
        &mut self,
        nation: &str,
        income: u32,
        cost_per_unit: u32,
        unit_count: u32,
        rng: &mut dyn RngCore,
    ) -> EconomyResult<TurnSummary> {
        self.account(nation)?;
        info!(nation, income, cost_per_unit, unit_count, "processing turn");

        self.add_income(nation, income)?;
        let maintenance = match self.pay_unit_maintenance(nation, cost_per_unit, unit_count) {
            Err(EconomyError::NationNotFound(n)) => return Err(EconomyError::NationNotFound(n)),
            other => other,
        };
        let event = self.random_event(nation, rng)?;

        let account = self.account_mut(nation)?;
        account.turns_processed += 1;
        let turn = account.turns_processed;
        let economic_points = account.economic_points;
        let report = self.generate_report(nation)?;

        Ok(TurnSummary {
            nation: nation.to_string(),
            turn,
            economic_points,
            maintenance,
            event,
            report,
        })
    }
}
