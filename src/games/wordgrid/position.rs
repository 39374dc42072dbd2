//! Board coordinates and typing direction.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 15;

/// A cell coordinate, always inside the 15x15 board.
///
/// Construction goes through [`Position::new`], so holding a `Position`
/// means the coordinate is in range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

#[derive(Deserialize, schemars::JsonSchema)]
struct RawPosition {
    row: i64,
    col: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = String;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::from_signed(raw.row, raw.col)
            .ok_or_else(|| format!("position ({}, {}) is off the board", raw.row, raw.col))
    }
}

impl Position {
    /// The center cell, (7, 7).
    pub const CENTER: Position = Position { row: 7, col: 7 };

    /// Creates a position, or `None` if it falls outside the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Creates a position from signed coordinates.
    pub fn from_signed(row: i64, col: i64) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Self::new(row, col)
    }

    /// Row index (0-14).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index (0-14).
    pub fn col(self) -> usize {
        self.col
    }

    /// Moves by a signed offset, or `None` when the result leaves the board.
    #[instrument(level = "trace")]
    pub fn offset(self, d_row: i64, d_col: i64) -> Option<Self> {
        let row = (self.row as i64).checked_add(d_row)?;
        let col = (self.col as i64).checked_add(d_col)?;
        Self::from_signed(row, col)
    }

    /// Next cell along `direction`.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.unit();
        self.offset(d_row, d_col)
    }

    /// Previous cell along `direction`.
    pub fn step_back(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.unit();
        self.offset(-d_row, -d_col)
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // One-based, the way players read the board.
        write!(f, "{},{}", self.row + 1, self.col + 1)
    }
}

/// Typing direction of the cursor.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    strum::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Left to right.
    #[default]
    #[serde(rename = "H")]
    #[strum(to_string = "H")]
    Horizontal,
    /// Top to bottom.
    #[serde(rename = "V")]
    #[strum(to_string = "V")]
    Vertical,
}

impl Direction {
    /// Returns the other direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Unit step as `(d_row, d_col)`.
    pub fn unit(self) -> (i64, i64) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }

    /// Arrow glyph shown next to the cursor.
    pub fn arrow(self) -> char {
        match self {
            Direction::Horizontal => '→',
            Direction::Vertical => '↓',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_off_board() {
        assert!(Position::new(14, 14).is_some());
        assert!(Position::new(15, 0).is_none());
        assert!(Position::new(0, 15).is_none());
    }

    #[test]
    fn test_step_stops_at_edge() {
        let edge = Position::new(7, 14).unwrap();
        assert_eq!(edge.step(Direction::Horizontal), None);
        assert_eq!(edge.step(Direction::Vertical), Position::new(8, 14));
    }

    #[test]
    fn test_offset_negative() {
        assert_eq!(Position::new(0, 3).unwrap().offset(-1, 0), None);
        assert_eq!(Position::CENTER.offset(-1, 1), Position::new(6, 8));
    }

    #[test]
    fn test_offset_extreme_deltas() {
        assert_eq!(Position::CENTER.offset(i64::MAX, 0), None);
        assert_eq!(Position::CENTER.offset(0, i64::MIN), None);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: Position = serde_json::from_str(r#"{"row":3,"col":4}"#).unwrap();
        assert_eq!(ok, Position::new(3, 4).unwrap());
        assert!(serde_json::from_str::<Position>(r#"{"row":-1,"col":4}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"row":2,"col":15}"#).is_err());
    }

    #[test]
    fn test_all_covers_board() {
        assert_eq!(Position::all().count(), BOARD_SIZE * BOARD_SIZE);
    }
}
