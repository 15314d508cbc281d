use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::{EconomyResult, EconomySystem};
use crate::error::{EconomyError, KeyPointFileError};
use crate::model::{HexId, HistoryKind, KeyPoint, KeyPointKind};

/// The part of the map editor's data file the economy reads. Other sections
/// (terrain and so on) are ignored.
#[derive(Debug, Deserialize)]
struct KeyPointFile {
    #[serde(default)]
    key_points: BTreeMap<HexId, KeyPoint>,
}

impl EconomySystem {
    /// Record an objective held by `nation` on hex `(col, row)`.
    pub fn add_key_point(
        &mut self,
        nation: &str,
        col: i32,
        row: i32,
        kind: KeyPointKind,
        value: u32,
    ) -> EconomyResult<HexId> {
        let account = self.account_mut(nation)?;
        let hex = HexId::from_coords(col, row);
        info!(nation, hex = %hex, kind = %kind, value, "key point added");
        account.key_points.insert(hex.clone(), KeyPoint::new(kind, value));
        Ok(hex)
    }

    /// Parse the `key_points` section of a map data file.
    pub fn read_key_points(
        path: &Path,
    ) -> Result<BTreeMap<HexId, KeyPoint>, KeyPointFileError> {
        let contents = fs::read_to_string(path).map_err(|source| KeyPointFileError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let file: KeyPointFile =
            serde_json::from_str(&contents).map_err(|source| KeyPointFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(file.key_points)
    }

    /// Replace the capturable key points with those in `path`. A missing or
    /// malformed file leaves no key points. Returns how many were loaded.
    pub fn load_key_points(&mut self, path: &Path) -> usize {
        self.key_points = match Self::read_key_points(path) {
            Ok(points) => {
                info!(count = points.len(), path = %path.display(), "loaded key points");
                points
            }
            Err(err) => {
                warn!("{err}");
                BTreeMap::new()
            }
        };
        self.key_points.len()
    }

    pub fn set_key_points(&mut self, key_points: BTreeMap<HexId, KeyPoint>) {
        self.key_points = key_points;
    }

    /// Key points not yet captured.
    pub fn key_points(&self) -> &BTreeMap<HexId, KeyPoint> {
        &self.key_points
    }

    /// Award the key point on `hex` to `nation`. Each key point can be
    /// captured once; it moves from the map into the nation's holdings.
    pub fn capture_key_point(&mut self, nation: &str, hex: &HexId) -> EconomyResult<KeyPoint> {
        self.account(nation)?;
        let Some(key_point) = self.key_points.remove(hex) else {
            info!(nation, hex = %hex, "no key point on hex or already captured");
            return Err(EconomyError::KeyPointNotFound(hex.clone()));
        };

        self.add_income(nation, key_point.value)?;
        let account = self.account_mut(nation)?;
        let message = format!(
            "Captured {} on hex {hex} worth {} economic points",
            key_point.kind, key_point.value
        );
        info!(nation, "{message}");
        account.record(HistoryKind::KeyPointCaptured, message);
        account.key_points.insert(hex.clone(), key_point.clone());
        Ok(key_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::assert_points;

    fn registry() -> BTreeMap<HexId, KeyPoint> {
        BTreeMap::from([
            (HexId::new("4_3"), KeyPoint::new(KeyPointKind::City, 100)),
            (HexId::new("7_2"), KeyPoint::new(KeyPointKind::Bridge, 50)),
        ])
    }

    #[test]
    fn add_key_point_does_not_touch_bases() {
        let mut economy = EconomySystem::new();
        let hex = economy
            .add_key_point("Polska", 4, 3, KeyPointKind::Junction, 75)
            .unwrap();
        assert_eq!(hex.as_str(), "4_3");
        let polska = economy.get_nation_data("Polska").unwrap();
        assert_eq!(polska.bases.len(), 2);
        assert_eq!(polska.key_points[&hex], KeyPoint::new(KeyPointKind::Junction, 75));
    }

    #[test]
    fn capture_awards_value_once() {
        let mut economy = EconomySystem::new();
        economy.set_key_points(registry());
        let hex = HexId::new("4_3");

        let captured = economy.capture_key_point("Polska", &hex).unwrap();
        assert_eq!(captured.value, 100);
        assert_points(&economy, "Polska", 1300, 800);
        assert!(!economy.key_points().contains_key(&hex));
        assert!(economy.get_nation_data("Polska").unwrap().key_points.contains_key(&hex));

        assert_eq!(
            economy.capture_key_point("Polska", &hex),
            Err(EconomyError::KeyPointNotFound(hex.clone()))
        );
        assert_eq!(
            economy.capture_key_point("Niemcy", &hex),
            Err(EconomyError::KeyPointNotFound(hex))
        );
        assert_points(&economy, "Polska", 1300, 800);
        assert_points(&economy, "Niemcy", 2000, 1500);
    }

    #[test]
    fn unknown_nation_cannot_consume_key_point() {
        let mut economy = EconomySystem::new();
        economy.set_key_points(registry());
        let hex = HexId::new("7_2");
        assert!(matches!(
            economy.capture_key_point("Litwa", &hex),
            Err(EconomyError::NationNotFound(_))
        ));
        assert!(economy.key_points().contains_key(&hex));
    }

    #[test]
    fn capture_is_logged_in_history() {
        let mut economy = EconomySystem::new();
        economy.set_key_points(registry());
        economy.capture_key_point("Niemcy", &HexId::new("7_2")).unwrap();
        let entry = economy.get_nation_data("Niemcy").unwrap().history.last().unwrap().clone();
        assert_eq!(entry.kind, HistoryKind::KeyPointCaptured);
        assert!(entry.message.contains("most"));
    }
}
