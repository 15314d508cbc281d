pub mod account;
pub mod history;
pub mod key_point;
pub mod unit;

pub use account::{NationAccount, SupplyBase};
pub use history::{HistoryEntry, HistoryKind, HistoryLog};
pub use key_point::{HexId, KeyPoint, KeyPointKind};
pub use unit::Unit;
