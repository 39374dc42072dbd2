//! First-class composition actions.
//!
//! Input collaborators translate key presses and pointer drops into
//! actions; the composition state applies them one at a time.

use super::position::Position;
use super::types::Letter;
use super::warning::{Warning, WarningKind};
use serde::{Deserialize, Serialize};

/// A provisional, uncommitted tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GhostPlacement {
    /// Target cell.
    pub position: Position,
    /// Letter shown on the ghost (assigned letter for blanks).
    pub letter: Letter,
    /// Backed by a blank from the rack.
    pub is_blank: bool,
}

impl std::fmt::Display for GhostPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_blank {
            write!(f, "{}(blank)@{}", self.letter, self.position)
        } else {
            write!(f, "{}@{}", self.letter, self.position)
        }
    }
}

/// An operation on the composition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComposeAction {
    /// Select a cell, toggling direction when it is already selected.
    Select {
        /// Cell to select.
        position: Position,
    },
    /// Flip the typing direction.
    ToggleDirection,
    /// Move the cursor by a unit offset.
    MoveCursor {
        /// Row delta.
        d_row: i64,
        /// Column delta.
        d_col: i64,
    },
    /// Place a ghost tile.
    Place {
        /// Target cell.
        position: Position,
        /// Requested letter.
        letter: char,
        /// Place from a blank.
        is_blank: bool,
    },
    /// Take back the last ghost.
    Undo,
    /// Re-apply the last undone ghost.
    Redo,
    /// Drop all in-progress composition.
    Clear,
}

/// Why a composition operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ComposeError {
    /// Target cell is outside the current valid path.
    #[display("Cell {} is not on the current path", _0)]
    NotInPath(#[error(not(source))] Position),

    /// A ghost already sits on the target cell.
    #[display("Cell {} already holds a pending tile", _0)]
    AlreadyPlaced(#[error(not(source))] Position),

    /// Rack has no tile (or blank) left for the letter.
    #[display("Tile {} is not available in the rack", _0)]
    TileUnavailable(#[error(not(source))] Letter),

    /// Requested character is not a letter.
    #[display("'{}' is not a letter", _0)]
    NotALetter(#[error(not(source))] char),

    /// Cursor movement would leave the board.
    #[display("Cannot move the cursor off the board")]
    OffBoard,

    /// Acting player does not own the current turn.
    #[display("Not your turn. Waiting for {}", _0)]
    NotYourTurn(#[error(not(source))] String),

    /// No cell is selected.
    #[display("Select a square first")]
    NoSelection,

    /// Rack slot holds no tile.
    #[display("Rack slot {} is empty", _0)]
    EmptySlot(#[error(not(source))] usize),
}

impl ComposeError {
    /// Maps the refusal onto the warning taxonomy.
    pub fn kind(&self) -> WarningKind {
        match self {
            ComposeError::NotInPath(_)
            | ComposeError::AlreadyPlaced(_)
            | ComposeError::TileUnavailable(_)
            | ComposeError::NotALetter(_)
            | ComposeError::NoSelection
            | ComposeError::EmptySlot(_) => WarningKind::InvalidTile,
            ComposeError::OffBoard => WarningKind::OffBoard,
            ComposeError::NotYourTurn(_) => WarningKind::InvalidTurn,
        }
    }

    /// Builds the advisory warning, pinned to `position` when known.
    pub fn to_warning(&self, position: Option<Position>) -> Warning {
        let position = match self {
            ComposeError::NotInPath(pos) | ComposeError::AlreadyPlaced(pos) => Some(*pos),
            _ => position,
        };
        Warning::new(self.kind(), self.to_string()).at(position)
    }
}
