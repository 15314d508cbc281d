use std::collections::BTreeMap;
use std::path::PathBuf;

use campaign_economy::flush::flush_to_jsonl;
use campaign_economy::{
    EconomyConfig, EconomySystem, GameSession, HexId, KeyPoint, KeyPointKind, Unit,
};
use tracing_subscriber::prelude::*;

// Usage: turn_debug [map_data.json] [economy_config.json]
fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let map_data = args.next().map(PathBuf::from);
    let config = match args.next() {
        Some(path) => match EconomyConfig::from_path(&PathBuf::from(path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}; using default config");
                EconomyConfig::default()
            }
        },
        None => EconomyConfig::default(),
    };

    let mut economy = EconomySystem::from_config(config);
    match &map_data {
        Some(path) => {
            economy.load_key_points(path);
        }
        None => economy.set_key_points(BTreeMap::from([
            (HexId::from_coords(9, 8), KeyPoint::with_default_value(KeyPointKind::City)),
            (HexId::from_coords(14, 18), KeyPoint::with_default_value(KeyPointKind::Bridge)),
            (HexId::from_coords(4, 12), KeyPoint::with_default_value(KeyPointKind::Junction)),
        ])),
    }

    let mut session = match GameSession::new(economy, "Polska", "Niemcy", 1939) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("cannot start session: {err}");
            return;
        }
    };

    let polish = [("Armia Kraków", 5, 6), ("Armia Łódź", 9, 8), ("Armia Pomorze", 4, 12)];
    let german = [("XVI AK", 16, 15), ("XIX AK", 14, 18)];

    for (name, col, row) in polish {
        let unit = Unit::new(name, "Polska", f64::from(col), f64::from(row)).maintenance_cost(5);
        if let Err(err) = session.place_unit(HexId::from_coords(col, row), unit) {
            eprintln!("{err}");
        }
    }
    report_turn(&mut session);

    for (name, col, row) in german {
        let unit = Unit::new(name, "Niemcy", f64::from(col), f64::from(row)).maintenance_cost(5);
        if let Err(err) = session.place_unit(HexId::from_coords(col, row), unit) {
            eprintln!("{err}");
        }
    }
    report_turn(&mut session);

    for _ in 0..4 {
        report_turn(&mut session);
    }

    let economy = session.into_economy();
    for nation in ["Polska", "Niemcy"] {
        if let Ok(history) = economy.show_history(nation) {
            eprintln!("{history}");
        }
    }

    let out = std::env::temp_dir().join("campaign_economy_debug");
    match flush_to_jsonl(&economy, &out) {
        Ok(()) => eprintln!("Exported to {}", out.display()),
        Err(err) => eprintln!("export failed: {err}"),
    }
}

fn report_turn(session: &mut GameSession) {
    match session.settle_unit_supply() {
        Ok(report) => eprintln!(
            "{}: {} units supplied, {} short, {} without a base",
            session.current_nation(),
            report.supplied.len(),
            report.shortfalls.len(),
            report.unsupplied.len()
        ),
        Err(err) => eprintln!("{err}"),
    }
    match session.end_turn() {
        Ok(summary) => eprintln!(
            "Turn {} for {}: event {:?}, maintenance {:?}\n{}",
            summary.turn, summary.nation, summary.event.kind, summary.maintenance, summary.report
        ),
        Err(err) => eprintln!("{err}"),
    }
}
