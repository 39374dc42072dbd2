//! Strictly Tiles library - type-safe move composition for a word-tile board
//!
//! A player builds a placement one letter at a time on a 15x15 board that
//! already holds tiles from earlier turns. The composition engine tracks
//! the cursor, the provisional "ghost" tiles and their undo history, and
//! never lets a ghost land where the rules forbid it.
//!
//! # Architecture
//!
//! - **Games**: board geometry, paths, rack accounting and the composition
//!   state machine (`games::wordgrid`)
//! - **Wire**: strict decoding of authoritative payloads
//! - **Reconcile**: merging authoritative state into the local view
//! - **Session**: one game, one composition, turn gating and submission
//! - **Referee**: an in-process authority for pass-and-play
//!
//! # Example
//!
//! ```
//! use strictly_tiles::{GameSession, GameState, Identity, Letter, PlayerState, Position, Tile};
//!
//! let mut game = GameState::new("demo");
//! let rack = "CAT".chars().filter_map(Letter::new).map(Tile::letter).collect();
//! game.players.push(PlayerState::new("p1", "Ada").with_rack(rack));
//!
//! let mut session = GameSession::new(game, Identity::Fixed("p1".into()));
//! session.select(Position::CENTER);
//! for c in "CAT".chars() {
//!     session.place_letter(c, false).unwrap();
//! }
//! assert_eq!(session.composition().ghost_tiles().len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod games;
mod reconcile;
mod referee;
mod session;
mod turn;
mod wire;

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV, ConfigError, TilesConfig};

// Crate-level exports - Boundary decoding
pub use wire::{
    DecodeError, GameStatePayload, IncomingState, decode_state, encode_state, normalize_board,
};

// Crate-level exports - Reconciliation
pub use reconcile::{LocalState, MergeOptions, merge_authoritative};

// Crate-level exports - Turn gating
pub use turn::{Participation, check_turn};

// Crate-level exports - Session management
pub use session::{GameSession, Identity, MoveSender, SubmitError};

// Crate-level exports - Local authority
pub use referee::{
    AcceptAll, ChannelMoveSender, LocalReferee, Referee, RefereeRequest, WordList, WordValidator,
};

// Crate-level exports - Word grid types
pub use games::wordgrid::{
    BOARD_SIZE, BoardCell, BoardGrid, ComposeAction, ComposeError, ComposePhase,
    CompositionState, Direction, GameState, GameStatus, GhostPlacement, Letter, Move,
    MoveValidationResult, PlacedTile, PlayerId, PlayerState, Position, Premium, RACK_SIZE,
    Severity, Tile, TileBag, Warning, WarningKind, classify, compute_valid_path, is_available,
};
