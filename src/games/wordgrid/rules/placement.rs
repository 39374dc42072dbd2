//! Placement legality for a submitted move.

use super::super::board::BoardGrid;
use super::super::position::{Direction, Position};
use super::super::types::PlacedTile;
use std::collections::HashSet;
use tracing::instrument;

/// Why a submitted placement is illegal.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    /// Move carries no tiles.
    #[display("Move places no tiles")]
    Empty,
    /// A tile is outside the board.
    #[display("Tile at ({}, {}) is off the board", row, col)]
    OffBoard {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// A tile targets an occupied cell.
    #[display("Cell {} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),
    /// Two tiles target the same cell.
    #[display("Cell {} is used twice", _0)]
    Duplicate(#[error(not(source))] Position),
    /// A tile has no letter.
    #[display("Tile at {} has no letter assigned", _0)]
    Unassigned(#[error(not(source))] Position),
    /// Tiles are not in one row or column.
    #[display("Tiles must lie in a single row or column")]
    NotInLine,
    /// The line has a hole.
    #[display("Tiles leave a gap at {}", _0)]
    Gap(#[error(not(source))] Position),
    /// First move misses the center.
    #[display("First move must cover the center square")]
    MissesCenter,
    /// First move is a single tile.
    #[display("First word needs at least two letters")]
    TooShort,
    /// Move does not touch existing tiles.
    #[display("Move must connect to tiles already on the board")]
    Disconnected,
}

/// Checks a placement against the committed board.
///
/// Returns the new tile positions and the line direction. A single tile
/// reports `Horizontal`.
#[instrument(skip(board, tiles), fields(tiles = tiles.len()))]
pub fn validate_placement(
    board: &BoardGrid,
    tiles: &[PlacedTile],
) -> Result<(Vec<Position>, Direction), PlacementError> {
    if tiles.is_empty() {
        return Err(PlacementError::Empty);
    }

    let mut positions = Vec::with_capacity(tiles.len());
    let mut seen = HashSet::new();
    for placed in tiles {
        let pos = Position::new(placed.row, placed.col).ok_or(PlacementError::OffBoard {
            row: placed.row,
            col: placed.col,
        })?;
        if !board.is_empty(pos) {
            return Err(PlacementError::Occupied(pos));
        }
        if !seen.insert(pos) {
            return Err(PlacementError::Duplicate(pos));
        }
        if placed.tile.letter.is_none() {
            return Err(PlacementError::Unassigned(pos));
        }
        positions.push(pos);
    }

    let first = positions[0];
    let direction = if positions.iter().all(|p| p.row() == first.row()) {
        Direction::Horizontal
    } else if positions.iter().all(|p| p.col() == first.col()) {
        Direction::Vertical
    } else {
        return Err(PlacementError::NotInLine);
    };

    // Every cell between the extremes is either new or already on the board.
    let start = positions.iter().copied().min().unwrap_or(first);
    let end = positions.iter().copied().max().unwrap_or(first);
    let mut cursor = Some(start);
    while let Some(pos) = cursor {
        if !seen.contains(&pos) && board.is_empty(pos) {
            return Err(PlacementError::Gap(pos));
        }
        if pos == end {
            break;
        }
        cursor = pos.step(direction);
    }

    if board.is_blank_board() {
        if !seen.contains(&Position::CENTER) {
            return Err(PlacementError::MissesCenter);
        }
        if positions.len() < 2 {
            return Err(PlacementError::TooShort);
        }
    } else if !positions.iter().any(|p| touches_tile(board, *p)) {
        return Err(PlacementError::Disconnected);
    }

    positions.sort();
    Ok((positions, direction))
}

fn touches_tile(board: &BoardGrid, pos: Position) -> bool {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(|(dr, dc)| pos.offset(dr, dc))
        .any(|n| !board.is_empty(n))
}
