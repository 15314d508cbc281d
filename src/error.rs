use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::HexId;

/// Soft failures of economy operations. None of them leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("no economic data for nation {0}")]
    NationNotFound(String),
    #[error("nation {0} has no supply bases")]
    NoBases(String),
    #[error("not enough economic points: required {required}, available {available}")]
    InsufficientEconomicPoints { required: u64, available: u32 },
    #[error("not enough supply points: required {required}, available {available}")]
    InsufficientSupplyPoints { required: u64, available: u32 },
    #[error("no key point on hex {0} or it was already captured")]
    KeyPointNotFound(HexId),
}

impl EconomyError {
    /// Amount missing for a rejected deduction, if this is a resource shortfall.
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            EconomyError::InsufficientEconomicPoints {
                required,
                available,
            }
            | EconomyError::InsufficientSupplyPoints {
                required,
                available,
            } => Some(required.saturating_sub(u64::from(*available))),
            _ => None,
        }
    }
}

/// Failures of the turn-gated game session wrapped around the economy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Economy(#[from] EconomyError),
    #[error("both players chose {0}")]
    SameNation(String),
    #[error("{0} is not playing in this session")]
    NotAPlayer(String),
    #[error("it is {active}'s turn, {nation} cannot move")]
    NotYourTurn { nation: String, active: String },
    #[error("hex {0} is already occupied")]
    HexOccupied(HexId),
    #[error("no unit on hex {0}")]
    NoUnit(HexId),
}

#[derive(Debug, Error)]
pub enum KeyPointFileError {
    #[error("failed to read key points from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse key points from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse economy config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read economy config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
