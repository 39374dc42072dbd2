//! Premium square geometry.
//!
//! The layout is fixed: it never depends on tile occupancy and is
//! regenerated locally instead of trusted from incoming payloads.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Premium classification of a board cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    strum::Display,
    strum::EnumIter,
)]
pub enum Premium {
    /// Letter scores twice.
    #[serde(rename = "DL")]
    #[strum(to_string = "DL")]
    DoubleLetter,
    /// Letter scores three times.
    #[serde(rename = "TL")]
    #[strum(to_string = "TL")]
    TripleLetter,
    /// Word scores twice.
    #[serde(rename = "DW")]
    #[strum(to_string = "DW")]
    DoubleWord,
    /// Word scores three times.
    #[serde(rename = "TW")]
    #[strum(to_string = "TW")]
    TripleWord,
    /// The starting square.
    #[serde(rename = "CENTER")]
    #[strum(to_string = "CENTER")]
    Center,
}

const TRIPLE_WORD: [(usize, usize); 8] = [
    (0, 0), (0, 7), (0, 14),
    (7, 0), (7, 14),
    (14, 0), (14, 7), (14, 14),
];

// The center also lies on the diagonals but reports as `Center`.
const DOUBLE_WORD: [(usize, usize); 16] = [
    (1, 1), (2, 2), (3, 3), (4, 4),
    (13, 13), (12, 12), (11, 11), (10, 10),
    (1, 13), (2, 12), (3, 11), (4, 10),
    (13, 1), (12, 2), (11, 3), (10, 4),
];

const TRIPLE_LETTER: [(usize, usize); 12] = [
    (1, 5), (1, 9),
    (5, 1), (5, 5), (5, 9), (5, 13),
    (9, 1), (9, 5), (9, 9), (9, 13),
    (13, 5), (13, 9),
];

const DOUBLE_LETTER: [(usize, usize); 24] = [
    (0, 3), (0, 11),
    (2, 6), (2, 8),
    (3, 0), (3, 7), (3, 14),
    (6, 2), (6, 6), (6, 8), (6, 12),
    (7, 3), (7, 11),
    (8, 2), (8, 6), (8, 8), (8, 12),
    (11, 0), (11, 7), (11, 14),
    (12, 6), (12, 8),
    (14, 3), (14, 11),
];

/// Classifies a cell. Pure and total over the board.
pub fn classify(position: Position) -> Option<Premium> {
    let key = (position.row(), position.col());
    if position == Position::CENTER {
        Some(Premium::Center)
    } else if TRIPLE_WORD.contains(&key) {
        Some(Premium::TripleWord)
    } else if DOUBLE_WORD.contains(&key) {
        Some(Premium::DoubleWord)
    } else if TRIPLE_LETTER.contains(&key) {
        Some(Premium::TripleLetter)
    } else if DOUBLE_LETTER.contains(&key) {
        Some(Premium::DoubleLetter)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cells_of(premium: Premium) -> Vec<Position> {
        Position::all()
            .filter(|pos| classify(*pos) == Some(premium))
            .collect()
    }

    fn rotate(pos: Position) -> Position {
        Position::new(pos.col(), 14 - pos.row()).unwrap()
    }

    #[test]
    fn test_single_center() {
        assert_eq!(cells_of(Premium::Center), vec![Position::CENTER]);
    }

    #[test]
    fn test_counts() {
        assert_eq!(cells_of(Premium::TripleWord).len(), 8);
        // 16 diagonal cells plus the center make the 17-cell pattern.
        assert_eq!(cells_of(Premium::DoubleWord).len(), 16);
        assert_eq!(cells_of(Premium::TripleLetter).len(), 12);
        assert_eq!(cells_of(Premium::DoubleLetter).len(), 24);
    }

    #[test]
    fn test_triple_word_rotation_symmetric() {
        let cells = cells_of(Premium::TripleWord);
        for pos in &cells {
            assert!(cells.contains(&rotate(*pos)), "{} rotates off the set", pos);
        }
    }

    #[test]
    fn test_display_codes() {
        assert_eq!(Premium::TripleWord.to_string(), "TW");
        assert_eq!(Premium::Center.to_string(), "CENTER");
    }

    proptest! {
        #[test]
        fn prop_layout_rotation_symmetric(row in 0usize..15, col in 0usize..15) {
            let pos = Position::new(row, col).unwrap();
            prop_assert_eq!(classify(pos), classify(rotate(pos)));
        }
    }
}
