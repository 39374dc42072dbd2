//! Valid typing path from the cursor.

use super::board::BoardGrid;
use super::position::{BOARD_SIZE, Direction, Position};
use tracing::instrument;

/// Computes the contiguous run of empty cells starting at `start`.
///
/// Walks one unit step at a time along `direction`, stopping before the
/// first occupied cell or the board edge, and never returns more than
/// `max_len` cells. Only committed board tiles block the walk; ghost
/// placements are not consulted. An occupied `start` yields an empty run.
#[instrument(skip(board))]
pub fn compute_valid_path(
    board: &BoardGrid,
    start: Position,
    direction: Direction,
    max_len: usize,
) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cursor = Some(start);
    while let Some(pos) = cursor {
        if path.len() >= max_len || !board.is_empty(pos) {
            break;
        }
        path.push(pos);
        cursor = pos.step(direction);
    }
    path
}

/// [`compute_valid_path`] with the full board length as the limit.
pub fn valid_path(board: &BoardGrid, start: Position, direction: Direction) -> Vec<Position> {
    compute_valid_path(board, start, direction, BOARD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::wordgrid::types::{Letter, Tile};
    use proptest::prelude::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn board_with(tiles: &[(usize, usize)]) -> BoardGrid {
        let mut board = BoardGrid::new();
        for &(row, col) in tiles {
            board.lock_tile(pos(row, col), Tile::letter(Letter::new('E').unwrap()));
        }
        board
    }

    #[test]
    fn test_empty_board_runs_to_edge() {
        let board = BoardGrid::new();
        let path = valid_path(&board, pos(7, 10), Direction::Horizontal);
        assert_eq!(path, vec![pos(7, 10), pos(7, 11), pos(7, 12), pos(7, 13), pos(7, 14)]);
    }

    #[test]
    fn test_stops_before_occupied() {
        let board = board_with(&[(10, 3)]);
        let path = valid_path(&board, pos(7, 3), Direction::Vertical);
        assert_eq!(path, vec![pos(7, 3), pos(8, 3), pos(9, 3)]);
    }

    #[test]
    fn test_occupied_start_is_empty() {
        let board = board_with(&[(7, 7)]);
        assert!(valid_path(&board, pos(7, 7), Direction::Horizontal).is_empty());
    }

    #[test]
    fn test_max_len_caps_run() {
        let board = BoardGrid::new();
        assert_eq!(compute_valid_path(&board, pos(0, 0), Direction::Horizontal, 3).len(), 3);
        assert!(compute_valid_path(&board, pos(0, 0), Direction::Horizontal, 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_path_contiguous_and_bounded(
            row in 0usize..15,
            col in 0usize..15,
            vertical in any::<bool>(),
            blockers in proptest::collection::vec((0usize..15, 0usize..15), 0..20),
        ) {
            let board = board_with(&blockers);
            let direction = if vertical { Direction::Vertical } else { Direction::Horizontal };
            let start = pos(row, col);
            let path = valid_path(&board, start, direction);

            prop_assert!(path.len() <= BOARD_SIZE);
            if !board.is_empty(start) {
                prop_assert!(path.is_empty());
            } else {
                prop_assert_eq!(path[0], start);
            }
            for pair in path.windows(2) {
                prop_assert_eq!(pair[0].step(direction), Some(pair[1]));
            }
            for cell in &path {
                prop_assert!(board.is_empty(*cell));
            }
            if let Some(last) = path.last() {
                // The run ends at the edge or right before a tile.
                match last.step(direction) {
                    None => {}
                    Some(next) => prop_assert!(!board.is_empty(next)),
                }
            }
        }
    }
}
