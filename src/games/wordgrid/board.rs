//! The 15x15 board grid.

use super::position::{BOARD_SIZE, Position};
use super::premium::{self, Premium};
use super::types::{Move, Tile};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A single board cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct BoardCell {
    /// Tile on the cell, if any.
    pub tile: Option<Tile>,
    /// Premium classification, fixed at grid creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<Premium>,
    /// Placed in a previously committed turn.
    #[serde(default)]
    pub locked: bool,
}

impl BoardCell {
    /// Returns true if no tile occupies the cell.
    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }
}

/// 15x15 board. Serialises as a bare matrix of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardGrid {
    cells: [[BoardCell; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardGrid {
    /// Creates an empty board with premiums assigned.
    #[instrument]
    pub fn new() -> Self {
        let mut grid = Self {
            cells: [[BoardCell::default(); BOARD_SIZE]; BOARD_SIZE],
        };
        grid.apply_premiums();
        grid
    }

    /// Builds a board from raw cells, regenerating premiums.
    ///
    /// Any premium carried by `cells` is discarded.
    pub fn from_cells(cells: [[BoardCell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut grid = Self { cells };
        grid.apply_premiums();
        grid
    }

    fn apply_premiums(&mut self) {
        for pos in Position::all() {
            self.cells[pos.row()][pos.col()].premium = premium::classify(pos);
        }
    }

    /// Gets the cell at a position.
    pub fn get(&self, pos: Position) -> &BoardCell {
        &self.cells[pos.row()][pos.col()]
    }

    /// Checks if a cell holds no tile.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns true if no cell holds a tile.
    pub fn is_blank_board(&self) -> bool {
        Position::all().all(|pos| self.is_empty(pos))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> &[[BoardCell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Places a locked tile, keeping the cell's premium.
    pub fn lock_tile(&mut self, pos: Position, tile: Tile) {
        let cell = &mut self.cells[pos.row()][pos.col()];
        cell.tile = Some(tile);
        cell.locked = true;
    }

    /// Commits a move: every tile becomes locked.
    ///
    /// Tiles with off-board coordinates are skipped.
    #[instrument(skip(self, mv), fields(player_id = %mv.player_id, tiles = mv.tiles.len()))]
    pub fn apply_move(&mut self, mv: &Move) {
        for placed in &mv.tiles {
            match Position::new(placed.row, placed.col) {
                Some(pos) => self.lock_tile(pos, placed.tile),
                None => warn!(row = placed.row, col = placed.col, "Skipping off-board tile"),
            }
        }
        debug!("Move committed to board");
    }

    /// Formats the board as text: letters for tiles, premium marks otherwise.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for row in &self.cells {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match (cell.tile, cell.premium) {
                    (Some(tile), _) => format!(" {} ", tile.letter.map_or('?', |l| l.as_char())),
                    (None, Some(Premium::Center)) => " * ".to_string(),
                    (None, Some(premium)) => format!("{:<3}", premium.to_string()),
                    (None, None) => " . ".to_string(),
                })
                .collect();
            out.push_str(line.join("").trim_end());
            out.push('\n');
        }
        out
    }
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self::new()
    }
}
