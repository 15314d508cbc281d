use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Starting state for one supply base.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaseSetup {
    pub x: f64,
    pub y: f64,
    pub supply_limit: u32,
}

/// Starting state for one nation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NationSetup {
    pub name: String,
    pub economic_points: u32,
    pub supply_points: u32,
    #[serde(default)]
    pub bases: Vec<BaseSetup>,
}

/// Configuration for an economy. `Default` is the 1939 campaign setup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Upper clamp for economic points.
    pub max_economic_points: u32,
    /// Upper clamp for supply points.
    pub max_supply_points: u32,
    /// Economic points after `reset_economy`.
    pub reset_economic_points: u32,
    /// Supply points after `reset_economy`.
    pub reset_supply_points: u32,
    /// Supply limit for bases added without an explicit one.
    pub default_base_supply_limit: u32,
    /// History entries kept per nation before the oldest are dropped.
    pub history_capacity: usize,
    pub nations: Vec<NationSetup>,
}

pub const MAX_ECONOMIC_POINTS: u32 = 5000;
pub const MAX_SUPPLY_POINTS: u32 = 2000;

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            max_economic_points: MAX_ECONOMIC_POINTS,
            max_supply_points: MAX_SUPPLY_POINTS,
            reset_economic_points: 1000,
            reset_supply_points: 500,
            default_base_supply_limit: 100,
            history_capacity: 512,
            nations: vec![
                NationSetup {
                    name: "Polska".to_string(),
                    economic_points: 1200,
                    supply_points: 800,
                    bases: vec![
                        BaseSetup { x: 5.0, y: 5.0, supply_limit: 300 },
                        BaseSetup { x: 10.0, y: 10.0, supply_limit: 500 },
                    ],
                },
                NationSetup {
                    name: "Niemcy".to_string(),
                    economic_points: 2000,
                    supply_points: 1500,
                    bases: vec![
                        BaseSetup { x: 15.0, y: 15.0, supply_limit: 400 },
                        BaseSetup { x: 20.0, y: 20.0, supply_limit: 600 },
                    ],
                },
            ],
        }
    }
}

impl EconomyConfig {
    /// Config with the default limits and no nations.
    pub fn empty() -> Self {
        Self {
            nations: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}
