use tracing::{debug, info, warn};

use super::{EconomyResult, EconomySystem};
use crate::error::EconomyError;
use crate::model::{HistoryKind, SupplyBase, Unit};

/// A unit that drew its upkeep from a base.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDraw {
    pub unit: String,
    /// Index into the nation's `bases`.
    pub base: usize,
    pub distance: f64,
    pub cost: u64,
}

/// A unit whose nearest base could not cover its upkeep.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitShortfall {
    pub unit: String,
    pub base: usize,
    pub distance: f64,
    pub required: u64,
    pub available: u32,
}

/// Outcome of a distance-based maintenance pass, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceReport {
    pub supplied: Vec<UnitDraw>,
    pub shortfalls: Vec<UnitShortfall>,
    /// Units skipped because the nation has no base to draw from.
    pub unsupplied: Vec<String>,
}

/// Index of the closest base and its distance. Ties keep the earlier base.
/// NaN distances (a NaN coordinate on either side) never match.
fn nearest_base_index(bases: &[SupplyBase], x: f64, y: f64) -> Option<(usize, f64)> {
    let mut nearest: Option<(usize, f64)> = None;
    for (index, base) in bases.iter().enumerate() {
        let distance = EconomySystem::calculate_distance(x, y, base.coords.0, base.coords.1);
        if distance.is_nan() {
            continue;
        }
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }
    nearest
}

impl EconomySystem {
    pub fn calculate_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
    }

    /// Closest base of `nation` to `(x, y)` and its distance.
    pub fn find_nearest_base(
        &self,
        nation: &str,
        x: f64,
        y: f64,
    ) -> EconomyResult<(&SupplyBase, f64)> {
        let account = self.account(nation)?;
        match nearest_base_index(&account.bases, x, y) {
            Some((index, distance)) => {
                let base = &account.bases[index];
                debug!(nation, coords = ?base.coords, distance, "nearest base");
                Ok((base, distance))
            }
            None => {
                warn!(nation, x, y, "no supply base within reach");
                Err(EconomyError::NoBases(nation.to_string()))
            }
        }
    }

    /// Whether `base` still holds the supply `unit` needs.
    pub fn check_supply(unit: &Unit, base: &SupplyBase) -> bool {
        if base.supply_limit < unit.supply_needed {
            warn!(
                unit = %unit.name,
                nation = %unit.nation,
                coords = ?base.coords,
                "base cannot cover unit supply"
            );
            return false;
        }
        true
    }

    /// Flat upkeep of `cost_per_unit * unit_count` from the nation's supply
    /// points. Returns the total charged.
    pub fn pay_unit_maintenance(
        &mut self,
        nation: &str,
        cost_per_unit: u32,
        unit_count: u32,
    ) -> EconomyResult<u64> {
        let account = self.account_mut(nation)?;
        let total_cost = u64::from(cost_per_unit) * u64::from(unit_count);
        let available = account.supply_points;

        if u64::from(available) < total_cost {
            let message = format!(
                "Not enough supply points for {unit_count} units: required {total_cost}, available {available}"
            );
            warn!(nation, "{message}");
            account.record(HistoryKind::MaintenanceShortfall, message);
            return Err(EconomyError::InsufficientSupplyPoints {
                required: total_cost,
                available,
            });
        }

        // total_cost <= supply_points, so it fits in u32
        account.supply_points = (u64::from(available) - total_cost) as u32;
        let message = format!(
            "Upkeep for {unit_count} units: {total_cost}. Supply points left: {}",
            account.supply_points
        );
        info!(nation, "{message}");
        account.record(HistoryKind::Maintenance, message);
        Ok(total_cost)
    }

    /// Draw each unit's upkeep from its nearest base.
    ///
    /// Cost is `floor(distance) * maintenance_cost`, saturating, so a unit
    /// arbitrarily far away is a shortfall. Units settle closest first, so a
    /// contested base serves nearby units before distant ones. A base that
    /// cannot cover a unit is left untouched for that unit. Units with no base
    /// at a comparable distance (no bases, or NaN coordinates) are listed as
    /// unsupplied.
    pub fn calculate_maintenance(
        &mut self,
        nation: &str,
        units: &[Unit],
    ) -> EconomyResult<MaintenanceReport> {
        let account = self.account_mut(nation)?;
        let mut report = MaintenanceReport::default();

        let mut assignments = Vec::with_capacity(units.len());
        for unit in units {
            match nearest_base_index(&account.bases, unit.x, unit.y) {
                Some((base, distance)) => assignments.push((unit, base, distance)),
                None => report.unsupplied.push(unit.name.clone()),
            }
        }
        if !report.unsupplied.is_empty() {
            warn!(
                nation,
                skipped = report.unsupplied.len(),
                "no reachable supply base; units skipped"
            );
        }

        // Stable sort: equal distances keep the caller's order.
        assignments.sort_by(|a, b| a.2.total_cmp(&b.2));

        for (unit, index, distance) in assignments {
            // `as` saturates: +inf becomes u64::MAX.
            let cost = (distance.floor() as u64).saturating_mul(u64::from(unit.maintenance_cost));
            let base = &mut account.bases[index];
            let available = base.supply_limit;
            if u64::from(available) >= cost {
                base.supply_limit = (u64::from(available) - cost) as u32;
                debug!(
                    nation,
                    unit = %unit.name,
                    cost,
                    coords = ?base.coords,
                    distance,
                    "unit drew supply"
                );
                report.supplied.push(UnitDraw {
                    unit: unit.name.clone(),
                    base: index,
                    distance,
                    cost,
                });
            } else {
                warn!(
                    nation,
                    unit = %unit.name,
                    required = cost,
                    available,
                    coords = ?base.coords,
                    "base cannot cover unit upkeep"
                );
                report.shortfalls.push(UnitShortfall {
                    unit: unit.name.clone(),
                    base: index,
                    distance,
                    required: cost,
                    available,
                });
            }
        }

        Ok(report)
    }
}
