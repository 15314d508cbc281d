#![allow(dead_code)]

use campaign_economy::{EconomySystem, KeyPointKind};

/// Campaign economy with one extra Polish base and a key point each side holds.
pub fn build_test_economy() -> EconomySystem {
    let mut economy = EconomySystem::new();
    economy.add_base("Polska", 2.0, 9.0, 250).unwrap();
    economy
        .add_key_point("Polska", 4, 3, KeyPointKind::City, 100)
        .unwrap();
    economy
        .add_key_point("Niemcy", 18, 2, KeyPointKind::Bridge, 50)
        .unwrap();
    economy
}

/// Map data file in the editor's layout: terrain plus key points.
pub const MAP_DATA: &str = r#"{
    "terrain": {
        "4_3": {"move_mod": -1, "defense_mod": 2},
        "7_2": {"move_mod": 0, "defense_mod": 0}
    },
    "key_points": {
        "4_3": {"type": "miasto", "value": 100},
        "7_2": {"type": "most", "value": 50},
        "9_9": {"type": "fortyfikacja", "value": 150}
    }
}"#;

pub fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
