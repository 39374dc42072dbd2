//! Tentative move composition.
//!
//! Tracks the cursor, the ghost tiles typed so far and their undo/redo
//! history. The board and rack are borrowed per call; this state never
//! owns them.

use super::action::{ComposeAction, ComposeError, GhostPlacement};
use super::board::BoardGrid;
use super::invariants::{ComposeView, CompositionInvariants, InvariantSet};
use super::path::valid_path;
use super::position::{Direction, Position};
use super::rack::{Backing, Inventory};
use super::types::{Letter, Tile};
use super::warning::Warning;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Coarse state of the composition machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ComposePhase {
    /// Nothing selected.
    Idle,
    /// A cell is selected, no ghosts yet.
    Selecting,
    /// At least one ghost is placed.
    Composing,
}

/// Cursor, ghost tiles, history and warnings for one turn in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionState {
    selected: Option<Position>,
    direction: Direction,
    valid_placements: Vec<Position>,
    ghost_tiles: Vec<GhostPlacement>,
    undo_stack: Vec<GhostPlacement>,
    redo_stack: Vec<GhostPlacement>,
    warnings: Vec<Warning>,
}

impl CompositionState {
    /// Creates an idle composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected cell.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Typing direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cells that may receive the next ghost.
    pub fn valid_placements(&self) -> &[Position] {
        &self.valid_placements
    }

    /// Ghosts in placement order.
    pub fn ghost_tiles(&self) -> &[GhostPlacement] {
        &self.ghost_tiles
    }

    /// Undo history; mirrors the ghost tiles.
    pub fn undo_stack(&self) -> &[GhostPlacement] {
        &self.undo_stack
    }

    /// Redo history.
    pub fn redo_stack(&self) -> &[GhostPlacement] {
        &self.redo_stack
    }

    /// Current warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Ghost on a cell, if any.
    pub fn ghost_at(&self, pos: Position) -> Option<&GhostPlacement> {
        self.ghost_tiles.iter().find(|g| g.position == pos)
    }

    /// Whether a cell is on the valid path.
    pub fn is_valid_target(&self, pos: Position) -> bool {
        self.valid_placements.contains(&pos)
    }

    /// Current phase.
    pub fn phase(&self) -> ComposePhase {
        match (self.selected, self.ghost_tiles.is_empty()) {
            (_, false) => ComposePhase::Composing,
            (Some(_), true) => ComposePhase::Selecting,
            (None, true) => ComposePhase::Idle,
        }
    }

    fn recompute(&mut self, board: &BoardGrid) {
        self.valid_placements = match self.selected {
            Some(pos) => valid_path(board, pos, self.direction),
            None => Vec::new(),
        };
    }

    /// Moves the cursor one step past `pos`. At the board edge the cursor
    /// stays on `pos` with nothing left to type into.
    fn advance_past(&mut self, board: &BoardGrid, pos: Position) {
        match pos.step(self.direction) {
            Some(next) => {
                self.selected = Some(next);
                self.recompute(board);
            }
            None => {
                self.selected = Some(pos);
                self.valid_placements.clear();
            }
        }
    }

    fn refuse(&mut self, error: ComposeError, position: Option<Position>) -> ComposeError {
        warn!(error = %error, ?position, "Composition refused");
        self.warnings = vec![error.to_warning(position)];
        error
    }

    fn check(&self, board: &BoardGrid) {
        debug_assert!(
            CompositionInvariants::check_all(&ComposeView::new(board, self)).is_ok(),
            "Composition invariants violated"
        );
    }

    /// Selects a cell, or toggles direction if it is already selected.
    #[instrument(skip(self, board), fields(direction = %self.direction))]
    pub fn select_square(&mut self, board: &BoardGrid, pos: Position) {
        if self.selected == Some(pos) {
            self.direction = self.direction.toggled();
            debug!(direction = %self.direction, "Toggled direction on reselect");
        } else {
            self.selected = Some(pos);
        }
        self.recompute(board);
    }

    /// Flips direction. No-op without a selection.
    #[instrument(skip(self, board))]
    pub fn toggle_direction(&mut self, board: &BoardGrid) {
        if self.selected.is_none() {
            debug!("No selection, direction unchanged");
            return;
        }
        self.direction = self.direction.toggled();
        self.recompute(board);
    }

    /// Moves the selection by a unit offset, starting from the center
    /// when nothing is selected.
    #[instrument(skip(self, board))]
    pub fn move_cursor(
        &mut self,
        board: &BoardGrid,
        d_row: i64,
        d_col: i64,
    ) -> Result<(), ComposeError> {
        let from = self.selected.unwrap_or(Position::CENTER);
        let Some(to) = from.offset(d_row, d_col) else {
            return Err(self.refuse(ComposeError::OffBoard, Some(from)));
        };
        self.selected = Some(to);
        self.recompute(board);
        Ok(())
    }

    /// Places a ghost tile at `pos`.
    ///
    /// The cell must be on the valid path and free of ghosts, and the rack
    /// must still hold the letter (or a blank) net of earlier ghosts. A
    /// request satisfied only by a blank is recorded as blank-backed.
    #[instrument(skip(self, board, rack), fields(rack = rack.len()))]
    pub fn place_ghost(
        &mut self,
        board: &BoardGrid,
        rack: &[Tile],
        pos: Position,
        letter: char,
        is_blank: bool,
    ) -> Result<(), ComposeError> {
        let Some(letter) = Letter::new(letter) else {
            return Err(self.refuse(ComposeError::NotALetter(letter), Some(pos)));
        };
        if !self.is_valid_target(pos) {
            return Err(self.refuse(ComposeError::NotInPath(pos), Some(pos)));
        }
        if self.ghost_at(pos).is_some() {
            return Err(self.refuse(ComposeError::AlreadyPlaced(pos), Some(pos)));
        }
        let backing = Inventory::net_of(rack, &self.ghost_tiles).resolve(letter, is_blank);
        let Some(backing) = backing else {
            return Err(self.refuse(ComposeError::TileUnavailable(letter), Some(pos)));
        };

        let ghost = GhostPlacement {
            position: pos,
            letter,
            is_blank: backing == Backing::Wildcard,
        };
        self.ghost_tiles.push(ghost);
        self.undo_stack.push(ghost);
        self.redo_stack.clear();
        self.warnings.clear();
        self.advance_past(board, pos);
        debug!(%ghost, selected = ?self.selected, "Ghost placed");
        self.check(board);
        Ok(())
    }

    /// Takes back the most recent ghost. Returns it, or `None` if there
    /// was nothing to undo.
    #[instrument(skip(self, board))]
    pub fn undo(&mut self, board: &BoardGrid) -> Option<GhostPlacement> {
        let ghost = self.undo_stack.pop()?;
        self.ghost_tiles.retain(|g| g.position != ghost.position);
        self.selected = Some(ghost.position);
        self.recompute(board);
        self.redo_stack.push(ghost);
        debug!(%ghost, "Ghost undone");
        self.check(board);
        Some(ghost)
    }

    /// Re-applies the most recently undone ghost without re-checking the
    /// rack.
    #[instrument(skip(self, board))]
    pub fn redo(&mut self, board: &BoardGrid) -> Option<GhostPlacement> {
        let ghost = self.redo_stack.pop()?;
        self.ghost_tiles.push(ghost);
        self.undo_stack.push(ghost);
        self.advance_past(board, ghost.position);
        debug!(%ghost, "Ghost redone");
        self.check(board);
        Some(ghost)
    }

    /// Drops ghosts, history, warnings and the selection.
    #[instrument(skip(self), fields(ghosts = self.ghost_tiles.len()))]
    pub fn clear(&mut self) {
        self.selected = None;
        self.valid_placements.clear();
        self.ghost_tiles.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.warnings.clear();
    }

    /// Replaces the warning list.
    pub fn set_warnings(&mut self, warnings: Vec<Warning>) {
        self.warnings = warnings;
    }

    /// Appends a warning.
    pub fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Applies an action.
    #[instrument(skip(self, board, rack))]
    pub fn apply(
        &mut self,
        board: &BoardGrid,
        rack: &[Tile],
        action: ComposeAction,
    ) -> Result<(), ComposeError> {
        match action {
            ComposeAction::Select { position } => self.select_square(board, position),
            ComposeAction::ToggleDirection => self.toggle_direction(board),
            ComposeAction::MoveCursor { d_row, d_col } => {
                self.move_cursor(board, d_row, d_col)?
            }
            ComposeAction::Place {
                position,
                letter,
                is_blank,
            } => self.place_ghost(board, rack, position, letter, is_blank)?,
            ComposeAction::Undo => {
                self.undo(board);
            }
            ComposeAction::Redo => {
                self.redo(board);
            }
            ComposeAction::Clear => self.clear(),
        }
        Ok(())
    }
}
