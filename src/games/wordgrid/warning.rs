//! Advisory warnings surfaced to the player.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Warning taxonomy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    /// Placement attempted out of turn.
    InvalidTurn,
    /// Letter not in the rack, or cell not on the valid path.
    InvalidTile,
    /// Cursor movement off the board.
    OffBoard,
    /// Acting participant is not connected.
    NotConnected,
}

/// How loudly a warning is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory.
    #[default]
    Warning,
    /// The attempted action did not happen.
    Error,
}

/// A non-fatal, display-only warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    /// Category.
    pub kind: WarningKind,
    /// Human-readable text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// Cell the warning refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Warning {
    /// Creates a warning with default severity.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity: Severity::Warning,
            position: None,
        }
    }

    /// Pins the warning to a cell.
    pub fn at(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Raises the severity.
    pub fn severe(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
