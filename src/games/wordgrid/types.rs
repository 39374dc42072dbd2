//! Core domain types for the word grid.

use super::board::BoardGrid;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Unique identifier for a player.
pub type PlayerId = String;

/// One of the 26 letters, always stored uppercase.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

impl Letter {
    /// Creates a letter from any ASCII letter, uppercasing it.
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    /// Returns the uppercase character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Standard face value of the letter.
    pub fn points(self) -> u32 {
        match self.0 {
            'A' | 'E' | 'I' | 'L' | 'N' | 'O' | 'R' | 'S' | 'T' | 'U' => 1,
            'D' | 'G' => 2,
            'B' | 'C' | 'M' | 'P' => 3,
            'F' | 'H' | 'V' | 'W' | 'Y' => 4,
            'K' => 5,
            'J' | 'X' => 8,
            _ => 10,
        }
    }

    /// All 26 letters in alphabetical order.
    pub fn alphabet() -> impl Iterator<Item = Letter> {
        ('A'..='Z').map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::new(c).ok_or_else(|| format!("'{}' is not a letter", c))
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.0
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical tile, on a rack or on the board.
///
/// A blank has no letter until it is assigned during placement and scores
/// zero whatever letter it stands for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Face letter, `None` for an unassigned blank.
    pub letter: Option<Letter>,
    /// Point value.
    #[serde(default)]
    pub points: u32,
    /// Whether this is a blank (wildcard) tile.
    #[serde(default)]
    pub is_blank: bool,
}

impl Tile {
    /// A regular tile carrying its standard face value.
    pub fn letter(letter: Letter) -> Self {
        Self {
            letter: Some(letter),
            points: letter.points(),
            is_blank: false,
        }
    }

    /// An unassigned blank.
    pub fn blank() -> Self {
        Self {
            letter: None,
            points: 0,
            is_blank: true,
        }
    }

    /// A blank standing for `letter`.
    pub fn assigned_blank(letter: Letter) -> Self {
        Self {
            letter: Some(letter),
            points: 0,
            is_blank: true,
        }
    }

    /// Rack label: the letter, or `?` for a blank.
    pub fn label(&self) -> char {
        match (self.is_blank, self.letter) {
            (true, _) | (false, None) => '?',
            (false, Some(letter)) => letter.as_char(),
        }
    }
}

/// Lifecycle of a game.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Waiting for players.
    #[default]
    Waiting,
    /// Turns are being played.
    Active,
    /// Temporarily halted.
    Paused,
    /// Game over.
    Finished,
}

/// A seated player as seen by this client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Player's unique ID.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Running score.
    #[serde(default)]
    score: u32,
    /// Up to seven tiles; order is the player's arrangement.
    #[serde(default)]
    rack: Vec<Tile>,
    /// Whether the player's connection is live.
    #[serde(default)]
    is_connected: bool,
}

impl PlayerState {
    /// Creates a connected player with an empty rack.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
            rack: Vec::new(),
            is_connected: true,
        }
    }

    /// Replaces the rack.
    pub fn with_rack(mut self, rack: Vec<Tile>) -> Self {
        self.rack = rack;
        self
    }

    /// Mutable access to the rack.
    pub fn rack_mut(&mut self) -> &mut Vec<Tile> {
        &mut self.rack
    }

    /// Adds points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Marks the connection state.
    pub fn set_connected(&mut self, connected: bool) {
        self.is_connected = connected;
    }
}

/// A tile placed at a board coordinate in a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlacedTile {
    /// Row (0-14).
    pub row: usize,
    /// Column (0-14).
    pub col: usize,
    /// The tile, with blanks carrying their assigned letter.
    pub tile: Tile,
}

/// A composed placement handed to the move sender.
///
/// `formed_words` and `total_points` come back from the external
/// validator; the composition engine never computes them.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema, derive_new::new,
)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    /// The player making the move.
    pub player_id: PlayerId,
    /// Tiles in placement order.
    pub tiles: Vec<PlacedTile>,
    /// Words the move forms.
    #[new(default)]
    #[serde(default)]
    pub formed_words: Vec<String>,
    /// Points scored.
    #[new(default)]
    #[serde(default)]
    pub total_points: u32,
}

/// Verdict of the external validator on a submitted move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveValidationResult {
    /// Whether the move was accepted.
    pub is_valid: bool,
    /// Why the move was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Points awarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// Words formed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
}

impl MoveValidationResult {
    /// An accepted move.
    pub fn accepted(score: u32, words: Vec<String>) -> Self {
        Self {
            is_valid: true,
            reason: None,
            score: Some(score),
            words: Some(words),
        }
    }

    /// A rejected move.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
            score: None,
            words: None,
        }
    }
}

/// Complete shared game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Game ID.
    pub id: String,
    /// The board.
    pub board: BoardGrid,
    /// Seated players.
    pub players: Vec<PlayerState>,
    /// Whose turn it is, if known.
    pub current_turn_player_id: Option<PlayerId>,
    /// Tiles left in the bag.
    pub bag_count: u32,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Most recent committed move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_move: Option<Move>,
}

impl GameState {
    /// Creates an empty game waiting for players.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            board: BoardGrid::new(),
            players: Vec::new(),
            current_turn_player_id: None,
            bag_count: 100,
            status: GameStatus::Waiting,
            last_move: None,
        }
    }

    /// Looks up a player by ID.
    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Mutable lookup of a player by ID.
    pub fn player_mut(&mut self, id: &str) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.id() == id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_uppercases() {
        assert_eq!(Letter::new('q').map(Letter::as_char), Some('Q'));
        assert_eq!(Letter::new('1'), None);
        assert_eq!(Letter::new('é'), None);
    }

    #[test]
    fn test_letter_serde_single_char() {
        let letter: Letter = serde_json::from_str("\"z\"").unwrap();
        assert_eq!(letter.as_char(), 'Z');
        assert_eq!(serde_json::to_string(&letter).unwrap(), "\"Z\"");
        assert!(serde_json::from_str::<Letter>("\"7\"").is_err());
    }

    #[test]
    fn test_blank_scores_zero() {
        let q = Letter::new('Q').unwrap();
        assert_eq!(Tile::letter(q).points, 10);
        assert_eq!(Tile::assigned_blank(q).points, 0);
        assert_eq!(Tile::blank().label(), '?');
    }

    #[test]
    fn test_player_rack_defaults_empty() {
        let player: PlayerState =
            serde_json::from_str(r#"{"id":"p1","name":"Ada"}"#).unwrap();
        assert!(player.rack().is_empty());
        assert_eq!(*player.score(), 0);
    }
}
