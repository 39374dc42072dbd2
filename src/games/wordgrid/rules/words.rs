//! Word extraction and face-value scoring.

use super::super::board::BoardGrid;
use super::super::position::{Direction, Position};
use tracing::instrument;

/// A word read off the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormedWord {
    /// Uppercase text.
    pub text: String,
    /// Sum of tile face values (blanks count zero).
    pub points: u32,
}

/// Reads the maximal run through `pos` along `direction`.
fn run_through(board: &BoardGrid, pos: Position, direction: Direction) -> Vec<Position> {
    let mut start = pos;
    while let Some(prev) = start.step_back(direction) {
        if board.is_empty(prev) {
            break;
        }
        start = prev;
    }
    let mut run = Vec::new();
    let mut cursor = Some(start);
    while let Some(cell) = cursor {
        if board.is_empty(cell) {
            break;
        }
        run.push(cell);
        cursor = cell.step(direction);
    }
    run
}

fn word_of(board: &BoardGrid, run: &[Position]) -> FormedWord {
    let mut text = String::with_capacity(run.len());
    let mut points = 0;
    for tile in run.iter().filter_map(|p| board.get(*p).tile) {
        text.push(tile.letter.map_or('?', |l| l.as_char()));
        points += tile.points;
    }
    FormedWord { text, points }
}

/// Words formed by `placed`, read from a board that already holds them.
///
/// The main word runs along `direction`; every placed tile may add a
/// cross word. Runs of a single letter are not words.
#[instrument(skip(board, placed), fields(placed = placed.len()))]
pub fn formed_words(
    board: &BoardGrid,
    placed: &[Position],
    direction: Direction,
) -> Vec<FormedWord> {
    let Some(&anchor) = placed.first() else {
        return Vec::new();
    };
    let mut words = Vec::new();

    let main = run_through(board, anchor, direction);
    if main.len() > 1 {
        words.push(word_of(board, &main));
    }
    for &pos in placed {
        let cross = run_through(board, pos, direction.toggled());
        if cross.len() > 1 {
            words.push(word_of(board, &cross));
        }
    }
    words
}
