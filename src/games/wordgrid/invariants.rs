//! First-class invariants for move composition.
//!
//! Invariants are logical properties that must hold after every
//! composition operation. They are checked in debug builds and can be
//! tested independently.

use super::board::BoardGrid;
use super::composition::CompositionState;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
            (I4::holds(state), I4::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A composition together with the board it is composed against.
#[derive(Debug, Clone, Copy)]
pub struct ComposeView<'a> {
    /// Committed board.
    pub board: &'a BoardGrid,
    /// Composition in progress.
    pub state: &'a CompositionState,
}

impl<'a> ComposeView<'a> {
    /// Pairs a board with a composition.
    pub fn new(board: &'a BoardGrid, state: &'a CompositionState) -> Self {
        Self { board, state }
    }
}

/// Ghosts only sit on empty, unlocked cells.
pub struct GhostsOnEmptyCells;

impl Invariant<ComposeView<'_>> for GhostsOnEmptyCells {
    fn holds(view: &ComposeView<'_>) -> bool {
        view.state.ghost_tiles().iter().all(|g| {
            let cell = view.board.get(g.position);
            cell.is_empty() && !cell.locked
        })
    }

    fn description() -> &'static str {
        "Ghost tiles occupy only empty, unlocked cells"
    }
}

/// No two ghosts share a cell.
pub struct UniqueGhostPositions;

impl Invariant<ComposeView<'_>> for UniqueGhostPositions {
    fn holds(view: &ComposeView<'_>) -> bool {
        let ghosts = view.state.ghost_tiles();
        let distinct: HashSet<_> = ghosts.iter().map(|g| g.position).collect();
        distinct.len() == ghosts.len()
    }

    fn description() -> &'static str {
        "Ghost tile positions are unique"
    }
}

/// The undo stack is exactly the ghost list in placement order.
pub struct UndoMirrorsGhosts;

impl Invariant<ComposeView<'_>> for UndoMirrorsGhosts {
    fn holds(view: &ComposeView<'_>) -> bool {
        view.state.undo_stack() == view.state.ghost_tiles()
    }

    fn description() -> &'static str {
        "Undo stack mirrors ghost tiles"
    }
}

/// Nothing waiting to be redone is currently placed.
pub struct RedoDisjoint;

impl Invariant<ComposeView<'_>> for RedoDisjoint {
    fn holds(view: &ComposeView<'_>) -> bool {
        view.state
            .redo_stack()
            .iter()
            .all(|r| view.state.ghost_at(r.position).is_none())
    }

    fn description() -> &'static str {
        "Redo stack is disjoint from placed ghosts"
    }
}

/// All composition invariants as a composable set.
pub type CompositionInvariants = (
    GhostsOnEmptyCells,
    UniqueGhostPositions,
    UndoMirrorsGhosts,
    RedoDisjoint,
);
