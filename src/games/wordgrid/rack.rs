//! Rack inventory accounting.
//!
//! Ghost placements consume rack tiles before the move is committed, so
//! availability is always computed net of the pending ghosts.

use super::action::GhostPlacement;
use super::types::{Letter, Tile};
use std::collections::HashMap;
use tracing::instrument;

/// Inventory symbol: a real letter or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RackSymbol {
    /// A lettered tile.
    Letter(Letter),
    /// A blank, usable as any letter.
    Wildcard,
}

impl RackSymbol {
    fn of_tile(tile: &Tile) -> Option<Self> {
        if tile.is_blank {
            Some(RackSymbol::Wildcard)
        } else {
            tile.letter.map(RackSymbol::Letter)
        }
    }

    fn of_ghost(ghost: &GhostPlacement) -> Self {
        if ghost.is_blank {
            RackSymbol::Wildcard
        } else {
            RackSymbol::Letter(ghost.letter)
        }
    }
}

/// Which rack tile backs a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// A tile with the exact letter.
    Exact,
    /// A blank standing in for the letter.
    Wildcard,
}

/// Multiset of rack symbols net of pending ghosts.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    counts: HashMap<RackSymbol, i32>,
}

impl Inventory {
    /// Counts the rack, then subtracts one per pending ghost.
    #[instrument(skip_all, fields(rack = rack.len(), pending = pending.len()))]
    pub fn net_of(rack: &[Tile], pending: &[GhostPlacement]) -> Self {
        let mut counts = HashMap::new();
        for symbol in rack.iter().filter_map(RackSymbol::of_tile) {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        for ghost in pending {
            *counts.entry(RackSymbol::of_ghost(ghost)).or_insert(0) -= 1;
        }
        Self { counts }
    }

    /// Remaining count of a symbol (may be negative if ghosts overdraw).
    pub fn count(&self, symbol: RackSymbol) -> i32 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Decides which tile backs a request, preferring the exact letter.
    ///
    /// A blank request can only be backed by a wildcard.
    pub fn resolve(&self, letter: Letter, as_blank: bool) -> Option<Backing> {
        if !as_blank && self.count(RackSymbol::Letter(letter)) > 0 {
            Some(Backing::Exact)
        } else if self.count(RackSymbol::Wildcard) > 0 {
            Some(Backing::Wildcard)
        } else {
            None
        }
    }
}

/// Returns true if `letter` can still be placed from `rack`.
pub fn is_available(rack: &[Tile], pending: &[GhostPlacement], letter: Letter) -> bool {
    Inventory::net_of(rack, pending).resolve(letter, false).is_some()
}

/// Rack tiles left once pending ghosts are taken out, in rack order.
///
/// Wildcard ghosts remove a blank; lettered ghosts remove the first tile
/// with that letter.
pub fn remaining_rack(rack: &[Tile], pending: &[GhostPlacement]) -> Vec<Tile> {
    let mut remaining: Vec<Option<Tile>> = rack.iter().copied().map(Some).collect();
    for ghost in pending {
        let wanted = RackSymbol::of_ghost(ghost);
        if let Some(slot) = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().and_then(RackSymbol::of_tile) == Some(wanted))
        {
            *slot = None;
        }
    }
    remaining.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::wordgrid::position::Position;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn rack(letters: &str) -> Vec<Tile> {
        letters
            .chars()
            .map(|c| {
                if c == '?' {
                    Tile::blank()
                } else {
                    Tile::letter(letter(c))
                }
            })
            .collect()
    }

    fn ghost(row: usize, col: usize, c: char, is_blank: bool) -> GhostPlacement {
        GhostPlacement {
            position: Position::new(row, col).unwrap(),
            letter: letter(c),
            is_blank,
        }
    }

    #[test]
    fn test_exact_then_wildcard_then_exhausted() {
        let rack = rack("AAB?");
        let pending = vec![ghost(7, 7, 'A', false), ghost(7, 8, 'B', false)];

        assert!(is_available(&rack, &pending, letter('A')));
        let inventory = Inventory::net_of(&rack, &pending);
        assert_eq!(inventory.resolve(letter('C'), false), Some(Backing::Wildcard));

        let mut pending = pending;
        pending.push(ghost(7, 9, 'C', true));
        assert!(!is_available(&rack, &pending, letter('C')));
        // One A is still there.
        assert!(is_available(&rack, &pending, letter('A')));
    }

    #[test]
    fn test_blank_ghost_consumes_wildcard_not_letter() {
        let rack = rack("E?");
        let pending = vec![ghost(0, 0, 'E', true)];
        let inventory = Inventory::net_of(&rack, &pending);
        assert_eq!(inventory.count(RackSymbol::Letter(letter('E'))), 1);
        assert_eq!(inventory.count(RackSymbol::Wildcard), 0);
    }

    #[test]
    fn test_blank_request_needs_wildcard() {
        let rack = rack("QU");
        let inventory = Inventory::net_of(&rack, &[]);
        assert_eq!(inventory.resolve(letter('Q'), true), None);
        assert_eq!(inventory.resolve(letter('Q'), false), Some(Backing::Exact));
    }

    #[test]
    fn test_remaining_rack_preserves_order() {
        let rack = rack("CAT?");
        let pending = vec![ghost(7, 7, 'A', false), ghost(7, 8, 'Z', true)];
        let labels: String = remaining_rack(&rack, &pending).iter().map(Tile::label).collect();
        assert_eq!(labels, "CT");
    }
}
