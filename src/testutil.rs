use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{BaseSetup, EconomyConfig};
use crate::economy::EconomySystem;

pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Default campaign economy with `nation`'s bases replaced by `(x, y, supply_limit)` triples.
pub fn economy_with_bases(nation: &str, bases: &[(f64, f64, u32)]) -> EconomySystem {
    let mut config = EconomyConfig::default();
    let setup = config
        .nations
        .iter_mut()
        .find(|n| n.name == nation)
        .unwrap_or_else(|| panic!("economy_with_bases: unknown nation {nation}"));
    setup.bases = bases
        .iter()
        .map(|&(x, y, supply_limit)| BaseSetup { x, y, supply_limit })
        .collect();
    EconomySystem::from_config(config)
}

/// Assert a nation's economic and supply points.
pub fn assert_points(economy: &EconomySystem, nation: &str, economic: u32, supply: u32) {
    let account = economy
        .get_nation_data(nation)
        .unwrap_or_else(|| panic!("assert_points: unknown nation {nation}"));
    assert_eq!(
        (account.economic_points, account.supply_points),
        (economic, supply),
        "{nation}: (economic, supply) points"
    );
}

pub fn assert_approx(actual: f64, expected: f64, tolerance: f64, msg: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{msg}: expected ~{expected} (+-{tolerance}), got {actual}"
    );
}
