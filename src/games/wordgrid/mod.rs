//! Word-grid board game: geometry, composition and rules.

mod action;
mod bag;
mod board;
mod composition;
mod invariants;
mod path;
mod position;
mod premium;
mod rack;
pub mod rules;
mod types;
mod warning;

pub use action::{ComposeAction, ComposeError, GhostPlacement};
pub use bag::{RACK_SIZE, TileBag, random_rack};
pub use board::{BoardCell, BoardGrid};
pub use composition::{ComposePhase, CompositionState};
pub use invariants::{
    ComposeView, CompositionInvariants, GhostsOnEmptyCells, Invariant, InvariantSet,
    InvariantViolation, RedoDisjoint, UndoMirrorsGhosts, UniqueGhostPositions,
};
pub use path::{compute_valid_path, valid_path};
pub use position::{BOARD_SIZE, Direction, Position};
pub use premium::{Premium, classify};
pub use rack::{Backing, Inventory, RackSymbol, is_available, remaining_rack};
pub use types::{
    GameState, GameStatus, Letter, Move, MoveValidationResult, PlacedTile, PlayerId,
    PlayerState, Tile,
};
pub use warning::{Severity, Warning, WarningKind};
