//! Turn-gated game session around an [`EconomySystem`].
//!
//! Two players alternate. Only the active nation may place or move units, and
//! `end_turn` runs the economy's turn pipeline exactly once for the nation
//! whose turn is ending. The session owns the economy, so it is the only
//! writer while a game is in progress.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::economy::{EconomySystem, MaintenanceReport, TurnSummary};
use crate::error::{EconomyError, SessionError};
use crate::model::{HexId, KeyPoint, Unit};

/// Flat per-turn economy inputs used by `end_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSettings {
    pub income: u32,
    pub cost_per_unit: u32,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            income: 100,
            cost_per_unit: 10,
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    economy: EconomySystem,
    players: [String; 2],
    active: usize,
    turns_completed: u32,
    settings: TurnSettings,
    hex_control: BTreeMap<HexId, String>,
    units: BTreeMap<HexId, Unit>,
    rng: SmallRng,
}

impl GameSession {
    /// Start a game between two distinct nations known to `economy`.
    /// `first` moves first. The same `seed` replays the same random events.
    pub fn new(
        economy: EconomySystem,
        first: &str,
        second: &str,
        seed: u64,
    ) -> Result<Self, SessionError> {
        if first == second {
            return Err(SessionError::SameNation(first.to_string()));
        }
        for nation in [first, second] {
            if economy.get_nation_data(nation).is_none() {
                return Err(EconomyError::NationNotFound(nation.to_string()).into());
            }
        }
        info!(first, second, seed, "game session started");
        Ok(Self {
            economy,
            players: [first.to_string(), second.to_string()],
            active: 0,
            turns_completed: 0,
            settings: TurnSettings::default(),
            hex_control: BTreeMap::new(),
            units: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn with_settings(mut self, settings: TurnSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn economy(&self) -> &EconomySystem {
        &self.economy
    }

    /// Mutable access for scenario setup (bases, key points) between turns.
    pub fn economy_mut(&mut self) -> &mut EconomySystem {
        &mut self.economy
    }

    pub fn into_economy(self) -> EconomySystem {
        self.economy
    }

    pub fn current_nation(&self) -> &str {
        &self.players[self.active]
    }

    pub fn turns_completed(&self) -> u32 {
        self.turns_completed
    }

    pub fn is_turn_active(&self, nation: &str) -> bool {
        self.current_nation() == nation
    }

    fn require_active(&self, nation: &str) -> Result<(), SessionError> {
        if self.is_turn_active(nation) {
            return Ok(());
        }
        if !self.players.iter().any(|p| p == nation) {
            return Err(SessionError::NotAPlayer(nation.to_string()));
        }
        Err(SessionError::NotYourTurn {
            nation: nation.to_string(),
            active: self.current_nation().to_string(),
        })
    }

    // -- Map state --

    pub fn controller(&self, hex: &HexId) -> Option<&str> {
        self.hex_control.get(hex).map(String::as_str)
    }

    pub fn unit_at(&self, hex: &HexId) -> Option<&Unit> {
        self.units.get(hex)
    }

    pub fn units_of<'a>(&'a self, nation: &'a str) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units.values().filter(move |u| u.nation == nation)
    }

    /// Record that the active `nation` now controls `hex`. When control
    /// changes hands, any key point on the hex is captured and returned.
    pub fn claim_hex(
        &mut self,
        hex: &HexId,
        nation: &str,
    ) -> Result<Option<KeyPoint>, SessionError> {
        self.require_active(nation)?;
        let previous = self.hex_control.insert(hex.clone(), nation.to_string());
        if previous.as_deref() == Some(nation) {
            return Ok(None);
        }
        debug!(hex = %hex, nation, ?previous, "hex changed control");
        match self.economy.capture_key_point(nation, hex) {
            Ok(key_point) => Ok(Some(key_point)),
            Err(EconomyError::KeyPointNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Put `unit` on a free hex and take control of it.
    pub fn place_unit(
        &mut self,
        hex: HexId,
        unit: Unit,
    ) -> Result<Option<KeyPoint>, SessionError> {
        self.require_active(&unit.nation)?;
        if self.units.contains_key(&hex) {
            return Err(SessionError::HexOccupied(hex));
        }
        let nation = unit.nation.clone();
        debug!(hex = %hex, unit = %unit.name, nation = %nation, "unit placed");
        self.units.insert(hex.clone(), unit);
        self.claim_hex(&hex, &nation)
    }

    /// Move the active nation's unit between hexes, taking control of the target.
    pub fn move_unit(
        &mut self,
        from: &HexId,
        to: HexId,
    ) -> Result<Option<KeyPoint>, SessionError> {
        let nation = match self.units.get(from) {
            Some(unit) => unit.nation.clone(),
            None => return Err(SessionError::NoUnit(from.clone())),
        };
        self.require_active(&nation)?;
        if self.units.contains_key(&to) {
            return Err(SessionError::HexOccupied(to));
        }
        let Some(unit) = self.units.remove(from) else {
            return Err(SessionError::NoUnit(from.clone()));
        };
        self.units.insert(to.clone(), unit);
        self.claim_hex(&to, &nation)
    }

    /// Take a unit off the map. Control of the hex stays with its nation.
    pub fn remove_unit(&mut self, hex: &HexId) -> Result<Unit, SessionError> {
        let nation = match self.units.get(hex) {
            Some(unit) => unit.nation.clone(),
            None => return Err(SessionError::NoUnit(hex.clone())),
        };
        self.require_active(&nation)?;
        self.units
            .remove(hex)
            .ok_or_else(|| SessionError::NoUnit(hex.clone()))
    }

    // -- Turn flow --

    /// Draw upkeep for the active nation's units from their nearest bases.
    pub fn settle_unit_supply(&mut self) -> Result<MaintenanceReport, SessionError> {
        let nation = self.current_nation().to_string();
        let units: Vec<Unit> = self.units_of(&nation).cloned().collect();
        Ok(self.economy.calculate_maintenance(&nation, &units)?)
    }

    /// Run the economy pipeline for the active nation, then pass the turn.
    pub fn end_turn(&mut self) -> Result<TurnSummary, SessionError> {
        let nation = self.current_nation().to_string();
        let unit_count = u32::try_from(self.units_of(&nation).count()).unwrap_or(u32::MAX);
        let summary = self.economy.process_turn(
            &nation,
            self.settings.income,
            self.settings.cost_per_unit,
            unit_count,
            &mut self.rng,
        )?;

        self.active = 1 - self.active;
        self.turns_completed += 1;
        info!(
            ended = %nation,
            next = %self.current_nation(),
            turns = self.turns_completed,
            "turn passed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyPointKind;

    fn session() -> GameSession {
        GameSession::new(EconomySystem::new(), "Polska", "Niemcy", 42).unwrap()
    }

    #[test]
    fn rejects_same_or_unknown_nation() {
        assert_eq!(
            GameSession::new(EconomySystem::new(), "Polska", "Polska", 1).unwrap_err(),
            SessionError::SameNation("Polska".to_string())
        );
        assert_eq!(
            GameSession::new(EconomySystem::new(), "Polska", "Litwa", 1).unwrap_err(),
            SessionError::Economy(EconomyError::NationNotFound("Litwa".to_string()))
        );
    }

    #[test]
    fn end_turn_alternates_nations() {
        let mut s = session();
        assert_eq!(s.current_nation(), "Polska");
        let first = s.end_turn().unwrap();
        assert_eq!(first.nation, "Polska");
        assert_eq!(s.current_nation(), "Niemcy");
        let second = s.end_turn().unwrap();
        assert_eq!(second.nation, "Niemcy");
        assert_eq!(s.current_nation(), "Polska");
        assert_eq!(s.turns_completed(), 2);
        assert_eq!(s.economy().get_nation_data("Polska").unwrap().turns_processed, 1);
        assert_eq!(s.economy().get_nation_data("Niemcy").unwrap().turns_processed, 1);
    }

    #[test]
    fn only_active_nation_places_units() {
        let mut s = session();
        let err = s
            .place_unit(HexId::new("1_1"), Unit::new("1 PzDiv", "Niemcy", 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotYourTurn { .. }));
        let err = s
            .place_unit(HexId::new("1_1"), Unit::new("x", "Litwa", 1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, SessionError::NotAPlayer("Litwa".to_string()));

        s.place_unit(HexId::new("1_1"), Unit::new("7 DP", "Polska", 1.0, 1.0))
            .unwrap();
        assert_eq!(s.controller(&HexId::new("1_1")), Some("Polska"));
        let err = s
            .place_unit(HexId::new("1_1"), Unit::new("8 DP", "Polska", 1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, SessionError::HexOccupied(HexId::new("1_1")));
    }

    #[test]
    fn end_turn_charges_only_active_units() {
        let mut s = session();
        for i in 0..3 {
            s.place_unit(
                HexId::from_coords(i, 0),
                Unit::new(format!("{i} DP"), "Polska", f64::from(i), 0.0),
            )
            .unwrap();
        }
        let summary = s.end_turn().unwrap();
        assert_eq!(summary.maintenance, Ok(30));

        let summary = s.end_turn().unwrap();
        assert_eq!(summary.maintenance, Ok(0));
    }

    #[test]
    fn capture_on_control_change() {
        let mut s = session();
        s.economy_mut().set_key_points(BTreeMap::from([(
            HexId::new("3_3"),
            KeyPoint::new(KeyPointKind::City, 100),
        )]));

        let captured = s
            .place_unit(HexId::new("3_3"), Unit::new("7 DP", "Polska", 3.0, 3.0))
            .unwrap();
        assert_eq!(captured, Some(KeyPoint::new(KeyPointKind::City, 100)));
        assert_eq!(
            s.economy().get_nation_data("Polska").unwrap().economic_points,
            1300
        );

        // Re-claiming or a later takeover does not pay again.
        assert_eq!(s.claim_hex(&HexId::new("3_3"), "Polska").unwrap(), None);
        s.end_turn().unwrap();
        assert_eq!(s.claim_hex(&HexId::new("3_3"), "Niemcy").unwrap(), None);
        assert_eq!(s.controller(&HexId::new("3_3")), Some("Niemcy"));
        let niemcy = s.economy().get_nation_data("Niemcy").unwrap();
        assert_eq!(niemcy.economic_points, 2000);
        assert!(niemcy.key_points.is_empty());
    }

    #[test]
    fn off_turn_claim_is_rejected_and_awards_nothing() {
        let mut s = session();
        let hex = HexId::new("3_3");
        s.economy_mut().set_key_points(BTreeMap::from([(
            hex.clone(),
            KeyPoint::new(KeyPointKind::City, 100),
        )]));

        assert_eq!(
            s.claim_hex(&hex, "Niemcy").unwrap_err(),
            SessionError::NotYourTurn {
                nation: "Niemcy".to_string(),
                active: "Polska".to_string(),
            }
        );
        assert_eq!(
            s.claim_hex(&hex, "Litwa").unwrap_err(),
            SessionError::NotAPlayer("Litwa".to_string())
        );
        assert_eq!(s.controller(&hex), None);
        assert!(s.economy().key_points().contains_key(&hex));
        assert_eq!(
            s.economy().get_nation_data("Niemcy").unwrap().economic_points,
            2000
        );
    }

    #[test]
    fn move_and_remove_units() {
        let mut s = session();
        s.place_unit(HexId::new("0_0"), Unit::new("7 DP", "Polska", 0.0, 0.0))
            .unwrap();
        s.move_unit(&HexId::new("0_0"), HexId::new("0_1")).unwrap();
        assert!(s.unit_at(&HexId::new("0_0")).is_none());
        assert_eq!(s.controller(&HexId::new("0_1")), Some("Polska"));
        assert_eq!(
            s.move_unit(&HexId::new("5_5"), HexId::new("0_2")).unwrap_err(),
            SessionError::NoUnit(HexId::new("5_5"))
        );

        s.end_turn().unwrap();
        assert!(matches!(
            s.remove_unit(&HexId::new("0_1")).unwrap_err(),
            SessionError::NotYourTurn { .. }
        ));
        s.end_turn().unwrap();
        let unit = s.remove_unit(&HexId::new("0_1")).unwrap();
        assert_eq!(unit.name, "7 DP");
        assert_eq!(s.controller(&HexId::new("0_1")), Some("Polska"));
    }

    #[test]
    fn settle_unit_supply_uses_active_units() {
        let mut s = session();
        s.place_unit(
            HexId::new("5_7"),
            Unit::new("7 DP", "Polska", 5.0, 7.0).maintenance_cost(10),
        )
        .unwrap();
        let report = s.settle_unit_supply().unwrap();
        assert_eq!(report.supplied.len(), 1);
        assert_eq!(report.supplied[0].cost, 20);
    }

    #[test]
    fn same_seed_replays_same_events() {
        let mut a = session();
        let mut b = session();
        for _ in 0..6 {
            assert_eq!(a.end_turn().unwrap().event, b.end_turn().unwrap().event);
        }
    }
}
