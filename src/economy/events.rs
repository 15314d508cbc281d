use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use tracing::info;

use super::{EconomyResult, EconomySystem, clamp_points};
use crate::model::HistoryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EconomicEventKind {
    EconomicCrisis,
    EconomicBoom,
    SupplyShortage,
    SupplyDelivery,
}

impl EconomicEventKind {
    pub fn label(self) -> &'static str {
        match self {
            EconomicEventKind::EconomicCrisis => "Economic crisis",
            EconomicEventKind::EconomicBoom => "Economic boom",
            EconomicEventKind::SupplyShortage => "Supply shortage",
            EconomicEventKind::SupplyDelivery => "Supply delivery",
        }
    }
}

/// A random economic event and the deltas it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomicEvent {
    pub kind: EconomicEventKind,
    pub economic_delta: i64,
    pub supply_delta: i64,
}

pub const RANDOM_EVENTS: [EconomicEvent; 4] = [
    EconomicEvent {
        kind: EconomicEventKind::EconomicCrisis,
        economic_delta: -500,
        supply_delta: 0,
    },
    EconomicEvent {
        kind: EconomicEventKind::EconomicBoom,
        economic_delta: 500,
        supply_delta: 0,
    },
    EconomicEvent {
        kind: EconomicEventKind::SupplyShortage,
        economic_delta: 0,
        supply_delta: -200,
    },
    EconomicEvent {
        kind: EconomicEventKind::SupplyDelivery,
        economic_delta: 0,
        supply_delta: 200,
    },
];

/// What one ally sent this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllyContribution {
    pub ally: String,
    /// Percentage roll in 1..=100.
    pub roll: u32,
    pub support: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlliedSupport {
    pub contributions: Vec<AllyContribution>,
    pub total: u32,
}

impl EconomySystem {
    /// Draw one event uniformly from [`RANDOM_EVENTS`] and apply both deltas.
    pub fn random_event(
        &mut self,
        nation: &str,
        rng: &mut dyn RngCore,
    ) -> EconomyResult<EconomicEvent> {
        let max_economic = self.config.max_economic_points;
        let max_supply = self.config.max_supply_points;
        let account = self.account_mut(nation)?;

        let event = RANDOM_EVENTS[rng.random_range(0..RANDOM_EVENTS.len())];
        account.economic_points = clamp_points(
            i64::from(account.economic_points) + event.economic_delta,
            max_economic,
        );
        account.supply_points = clamp_points(
            i64::from(account.supply_points) + event.supply_delta,
            max_supply,
        );

        let message = format!(
            "Event: {}. Economic points change: {}, supply points change: {}",
            event.kind.label(),
            event.economic_delta,
            event.supply_delta
        );
        info!(nation, "{message}");
        account.record(HistoryKind::RandomEvent, message);
        Ok(event)
    }

    /// Each ally rolls 1..=100 and sends that percentage of its maximum
    /// support. The sum arrives as a single income.
    pub fn calculate_support_from_allies(
        &mut self,
        nation: &str,
        allies: &BTreeMap<String, u32>,
        rng: &mut dyn RngCore,
    ) -> EconomyResult<AlliedSupport> {
        self.account(nation)?;

        let mut contributions = Vec::with_capacity(allies.len());
        let mut total: u32 = 0;
        for (ally, &max_support) in allies {
            let roll: u32 = rng.random_range(1..=100);
            // support <= max_support, so it fits in u32
            let support = (u64::from(max_support) * u64::from(roll) / 100) as u32;
            info!(nation, ally = %ally, roll, support, "allied support");
            total = total.saturating_add(support);
            contributions.push(AllyContribution {
                ally: ally.clone(),
                roll,
                support,
            });
        }

        self.add_income(nation, total)?;
        Ok(AlliedSupport {
            contributions,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::{EconomyConfig, MAX_ECONOMIC_POINTS, MAX_SUPPLY_POINTS};
    use crate::error::EconomyError;
    use crate::testutil::seeded_rng;

    #[test]
    fn event_applies_both_deltas() {
        let mut economy = EconomySystem::new();
        let mut rng = seeded_rng(3);
        let event = economy.random_event("Polska", &mut rng).unwrap();
        let polska = economy.get_nation_data("Polska").unwrap();
        assert_eq!(i64::from(polska.economic_points), 1200 + event.economic_delta);
        assert_eq!(i64::from(polska.supply_points), 800 + event.supply_delta);

        let entry = polska.history.last().unwrap();
        assert_eq!(entry.kind, HistoryKind::RandomEvent);
        assert!(entry.message.contains(event.kind.label()));
    }

    #[test]
    fn every_event_is_drawn_eventually() {
        let mut economy = EconomySystem::new();
        let mut rng = seeded_rng(11);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            let event = economy.random_event("Niemcy", &mut rng).unwrap();
            assert!(RANDOM_EVENTS.contains(&event));
            seen.insert(format!("{:?}", event.kind));
        }
        assert_eq!(seen.len(), RANDOM_EVENTS.len());
    }

    #[test]
    fn events_respect_clamps() {
        let mut config = EconomyConfig::default();
        config.nations[0].economic_points = 0;
        config.nations[0].supply_points = MAX_SUPPLY_POINTS;
        let mut economy = EconomySystem::from_config(config);
        let mut rng = seeded_rng(5);
        for _ in 0..100 {
            economy.random_event("Polska", &mut rng).unwrap();
            let polska = economy.get_nation_data("Polska").unwrap();
            assert!(polska.economic_points <= MAX_ECONOMIC_POINTS);
            assert!(polska.supply_points <= MAX_SUPPLY_POINTS);
        }
    }

    #[test]
    fn allied_support_sums_into_one_income() {
        let mut economy = EconomySystem::new();
        let mut rng = seeded_rng(9);
        let allies = BTreeMap::from([
            ("Francja".to_string(), 200),
            ("Wielka Brytania".to_string(), 300),
        ]);
        let history_before = economy.get_nation_data("Polska").unwrap().history.len();

        let support = economy
            .calculate_support_from_allies("Polska", &allies, &mut rng)
            .unwrap();

        assert_eq!(support.contributions.len(), 2);
        for c in &support.contributions {
            assert!((1..=100).contains(&c.roll));
            let max = allies[&c.ally];
            assert_eq!(c.support, max * c.roll / 100);
        }
        let sum: u32 = support.contributions.iter().map(|c| c.support).sum();
        assert_eq!(support.total, sum);

        let polska = economy.get_nation_data("Polska").unwrap();
        assert_eq!(polska.economic_points, 1200 + sum);
        assert_eq!(polska.history.len(), history_before + 1);
    }

    #[test]
    fn allied_support_for_unknown_nation_rolls_nothing() {
        let mut economy = EconomySystem::new();
        let mut rng = seeded_rng(9);
        let allies = BTreeMap::from([("Francja".to_string(), 200)]);
        assert_eq!(
            economy.calculate_support_from_allies("Litwa", &allies, &mut rng),
            Err(EconomyError::NationNotFound("Litwa".to_string()))
        );
    }
}
