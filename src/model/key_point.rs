use std::fmt;

use serde::{Deserialize, Serialize};

/// Map hex identifier in the editor's `"col_row"` form (e.g. `"4_3"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexId(String);

impl HexId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_coords(col: i32, row: i32) -> Self {
        Self(format!("{col}_{row}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HexId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Kind of a capturable map objective.
///
/// Serialized with the strings the map editor writes into its data file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum KeyPointKind {
    Bridge,
    City,
    Junction,
    Fortification,
    Custom(String),
}

impl KeyPointKind {
    pub fn as_str(&self) -> &str {
        match self {
            KeyPointKind::Bridge => "most",
            KeyPointKind::City => "miasto",
            KeyPointKind::Junction => "węzeł komunikacyjny",
            KeyPointKind::Fortification => "fortyfikacja",
            KeyPointKind::Custom(s) => s,
        }
    }

    /// Value the map editor assigns when an objective of this kind is placed.
    /// Custom kinds have no preset value.
    pub fn default_value(&self) -> Option<u32> {
        match self {
            KeyPointKind::Bridge => Some(50),
            KeyPointKind::City => Some(100),
            KeyPointKind::Junction => Some(75),
            KeyPointKind::Fortification => Some(150),
            KeyPointKind::Custom(_) => None,
        }
    }
}

impl fmt::Display for KeyPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<KeyPointKind> for String {
    fn from(kind: KeyPointKind) -> Self {
        match kind {
            KeyPointKind::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// Unknown strings become `Custom`, so files from newer editors still load.
impl TryFrom<String> for KeyPointKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "most" => Ok(KeyPointKind::Bridge),
            "miasto" => Ok(KeyPointKind::City),
            "węzeł komunikacyjny" => Ok(KeyPointKind::Junction),
            "fortyfikacja" => Ok(KeyPointKind::Fortification),
            "" => Err("key point type cannot be empty".to_string()),
            _ => Ok(KeyPointKind::Custom(s)),
        }
    }
}

/// A capturable objective: awards `value` economic points to whoever takes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    #[serde(rename = "type")]
    pub kind: KeyPointKind,
    pub value: u32,
}

impl KeyPoint {
    pub fn new(kind: KeyPointKind, value: u32) -> Self {
        Self { kind, value }
    }

    /// Key point carrying the editor's preset value for its kind (0 for custom kinds).
    pub fn with_default_value(kind: KeyPointKind) -> Self {
        let value = kind.default_value().unwrap_or(0);
        Self { kind, value }
    }
}
