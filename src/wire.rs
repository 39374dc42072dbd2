//! Decoding of authoritative game-state payloads.
//!
//! Payloads are parsed into typed values here, so reconciliation only ever
//! sees validated data. The board is the one tolerated shape: anything
//! that is not a 15x15 matrix degrades cell by cell to empty cells rather
//! than failing the whole payload.

use crate::games::wordgrid::{
    BOARD_SIZE, BoardCell, BoardGrid, GameState, GameStatus, Move, PlayerId, PlayerState, Tile,
};
use derive_more::{Display, Error};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Wire shape of an authoritative state, as the schema describes it.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStatePayload {
    /// Game ID.
    #[serde(default)]
    pub id: Option<String>,
    /// 15x15 matrix of cells.
    #[serde(default)]
    #[schemars(with = "Option<Vec<Vec<BoardCell>>>")]
    pub board: Option<Value>,
    /// Seated players.
    #[serde(default)]
    pub players: Option<Vec<PlayerState>>,
    /// Whose turn it is.
    #[serde(default)]
    pub current_turn_player_id: Option<PlayerId>,
    /// Tiles left in the bag.
    #[serde(default)]
    pub bag_count: Option<u32>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<GameStatus>,
    /// Most recent committed move.
    #[serde(default)]
    pub last_move: Option<Move>,
}

#[derive(Deserialize)]
struct CellPayload {
    #[serde(default)]
    tile: Option<Tile>,
}

/// A decoded authoritative update. `None` fields mean "no update".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingState {
    /// Game ID.
    pub id: Option<String>,
    /// Normalised board with premiums regenerated.
    pub board: Option<BoardGrid>,
    /// Seated players; empty means no update.
    pub players: Vec<PlayerState>,
    /// Whose turn it is.
    pub current_turn_player_id: Option<PlayerId>,
    /// Tiles left in the bag.
    pub bag_count: Option<u32>,
    /// Lifecycle status.
    pub status: Option<GameStatus>,
    /// Most recent committed move.
    pub last_move: Option<Move>,
}

impl From<GameStatePayload> for IncomingState {
    fn from(payload: GameStatePayload) -> Self {
        Self {
            id: payload.id,
            board: payload.board.map(normalize_board),
            players: payload.players.unwrap_or_default(),
            current_turn_player_id: payload.current_turn_player_id,
            bag_count: payload.bag_count,
            status: payload.status,
            last_move: payload.last_move,
        }
    }
}

impl From<GameState> for IncomingState {
    fn from(state: GameState) -> Self {
        Self {
            id: Some(state.id),
            board: Some(state.board),
            players: state.players,
            current_turn_player_id: state.current_turn_player_id,
            bag_count: Some(state.bag_count),
            status: Some(state.status),
            last_move: state.last_move,
        }
    }
}

/// Coerces an arbitrary JSON board into a 15x15 grid.
///
/// Rows that are not 15-wide arrays become empty rows, cells that do not
/// decode become empty cells, and any tile is taken as locked.
#[instrument(skip(value))]
pub fn normalize_board(value: Value) -> BoardGrid {
    let mut cells = [[BoardCell::default(); BOARD_SIZE]; BOARD_SIZE];
    let Value::Array(rows) = value else {
        warn!("Board is not an array, using an empty board");
        return BoardGrid::from_cells(cells);
    };
    if rows.len() != BOARD_SIZE {
        warn!(rows = rows.len(), "Board has the wrong number of rows");
    }

    for (r, row) in rows.into_iter().take(BOARD_SIZE).enumerate() {
        let Value::Array(row) = row else {
            warn!(row = r, "Row is not an array, leaving it empty");
            continue;
        };
        if row.len() != BOARD_SIZE {
            warn!(row = r, width = row.len(), "Row has the wrong width, leaving it empty");
            continue;
        }
        for (c, cell) in row.into_iter().enumerate() {
            match serde_json::from_value::<CellPayload>(cell) {
                Ok(CellPayload { tile }) => {
                    cells[r][c] = BoardCell {
                        tile,
                        premium: None,
                        locked: tile.is_some(),
                    };
                }
                Err(e) => debug!(row = r, col = c, error = %e, "Malformed cell, leaving it empty"),
            }
        }
    }
    BoardGrid::from_cells(cells)
}

/// Decodes a JSON payload into an [`IncomingState`].
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn decode_state(json: &str) -> Result<IncomingState, DecodeError> {
    let payload: GameStatePayload = serde_json::from_str(json)?;
    Ok(payload.into())
}

/// Encodes a game state for the wire.
pub fn encode_state(state: &GameState) -> Result<String, DecodeError> {
    Ok(serde_json::to_string(state)?)
}

/// Payload decoding error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Decode error: {} at {}:{}", message, file, line)]
pub struct DecodeError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DecodeError {
    /// Creates a new decode error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}
