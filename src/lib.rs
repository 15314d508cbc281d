pub mod config;
pub mod economy;
pub mod error;
pub mod flush;
pub mod model;
pub mod session;

#[cfg(test)]
mod testutil;

pub use config::{EconomyConfig, MAX_ECONOMIC_POINTS, MAX_SUPPLY_POINTS};
pub use economy::{EconomySystem, MaintenanceReport, TurnSummary};
pub use error::{ConfigError, EconomyError, KeyPointFileError, SessionError};
pub use model::{HexId, KeyPoint, KeyPointKind, NationAccount, SupplyBase, Unit};
pub use session::{GameSession, TurnSettings};
