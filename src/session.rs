//! Game session hosting one board and one composition.

use crate::games::wordgrid::{
    BoardGrid, ComposeAction, ComposeError, CompositionState, GameState, Move,
    MoveValidationResult, PlacedTile, PlayerId, PlayerState, Position, Tile, Warning,
    WarningKind,
};
use crate::reconcile::{LocalState, MergeOptions, merge_authoritative};
use crate::turn::{Participation, check_turn};
use crate::wire::{DecodeError, IncomingState, decode_state};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Whose hands are on the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A fixed player.
    Fixed(PlayerId),
    /// Whoever owns the turn (pass-and-play).
    HotSeat,
}

/// Delivers composed moves to the authority.
#[async_trait::async_trait]
pub trait MoveSender: Send + Sync {
    /// Submits a move and waits for the verdict.
    async fn submit_move(&self, mv: Move) -> Result<MoveValidationResult, SubmitError>;

    /// Gives up the turn.
    async fn pass(&self, player_id: PlayerId) -> Result<MoveValidationResult, SubmitError>;

    /// Returns rack tiles to the bag for fresh ones.
    async fn exchange(
        &self,
        player_id: PlayerId,
        tiles: Vec<Tile>,
    ) -> Result<MoveValidationResult, SubmitError>;
}

/// A game session: the local view of one game plus the turn being composed.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: LocalState,
    identity: Identity,
    merge_options: MergeOptions,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session over `game`.
    #[instrument(skip(game), fields(game_id = %game.id))]
    pub fn new(game: GameState, identity: Identity) -> Self {
        info!(?identity, "Creating game session");
        Self {
            state: LocalState::new(game),
            identity,
            merge_options: MergeOptions::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Sets merge behaviour.
    pub fn with_merge_options(mut self, options: MergeOptions) -> Self {
        self.merge_options = options;
        self
    }

    /// Seeds the bootstrap RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Full local state.
    pub fn state(&self) -> &LocalState {
        &self.state
    }

    /// Last known shared state.
    pub fn game(&self) -> &GameState {
        &self.state.game
    }

    /// The committed board.
    pub fn board(&self) -> &BoardGrid {
        &self.state.game.board
    }

    /// Turn in progress.
    pub fn composition(&self) -> &CompositionState {
        &self.state.composition
    }

    /// Player acting locally, if known.
    pub fn acting_id(&self) -> Option<PlayerId> {
        match &self.identity {
            Identity::Fixed(id) => Some(id.clone()),
            Identity::HotSeat => self.state.game.current_turn_player_id.clone(),
        }
    }

    /// The acting player. Only an unresolved hot seat falls back to the
    /// first seat; a fixed identity that holds no seat acts for nobody.
    pub fn acting_player(&self) -> Option<&PlayerState> {
        acting_player(&self.state.game, self.acting_id().as_deref())
    }

    /// Rack of the acting player.
    pub fn acting_rack(&self) -> &[Tile] {
        self.acting_player().map_or(&[][..], |p| p.rack().as_slice())
    }

    fn refuse(&mut self, error: ComposeError, position: Option<Position>) -> ComposeError {
        warn!(error = %error, ?position, "Session refused action");
        self.state
            .composition
            .set_warnings(vec![error.to_warning(position)]);
        error
    }

    fn gate(&mut self, position: Option<Position>) -> Result<(), ComposeError> {
        check_turn(&*self).map_err(|e| self.refuse(e, position))
    }

    fn note_connection(&mut self) {
        let Some(player) = self.acting_player() else {
            return;
        };
        if !player.is_connected() {
            let message = format!("{} is not connected", player.name());
            debug!(player_id = %player.id(), "Acting player disconnected");
            self.state
                .composition
                .push_warning(Warning::new(WarningKind::NotConnected, message));
        }
    }

    /// Selects a cell; reselecting toggles direction.
    pub fn select(&mut self, pos: Position) {
        let LocalState { game, composition } = &mut self.state;
        composition.select_square(&game.board, pos);
    }

    /// Flips the typing direction.
    pub fn toggle_direction(&mut self) {
        let LocalState { game, composition } = &mut self.state;
        composition.toggle_direction(&game.board);
    }

    /// Moves the cursor by a unit offset.
    pub fn move_cursor(&mut self, d_row: i64, d_col: i64) -> Result<(), ComposeError> {
        let LocalState { game, composition } = &mut self.state;
        composition.move_cursor(&game.board, d_row, d_col)
    }

    /// Places a ghost at `pos` after the turn check.
    #[instrument(skip(self))]
    pub fn place_ghost(
        &mut self,
        pos: Position,
        letter: char,
        is_blank: bool,
    ) -> Result<(), ComposeError> {
        self.gate(Some(pos))?;
        let acting = self.acting_id();
        let LocalState { game, composition } = &mut self.state;
        let rack = acting_player(game, acting.as_deref()).map_or(&[][..], |p| p.rack().as_slice());
        composition.place_ghost(&game.board, rack, pos, letter, is_blank)?;
        self.note_connection();
        Ok(())
    }

    /// Places a ghost at the current selection.
    #[instrument(skip(self))]
    pub fn place_letter(&mut self, letter: char, is_blank: bool) -> Result<(), ComposeError> {
        let Some(pos) = self.state.composition.selected() else {
            return Err(self.refuse(ComposeError::NoSelection, None));
        };
        self.place_ghost(pos, letter, is_blank)
    }

    /// Drops rack tile `rack_index` onto `pos`.
    ///
    /// An unassigned blank stands for `A`.
    #[instrument(skip(self))]
    pub fn drop_rack_tile(&mut self, pos: Position, rack_index: usize) -> Result<(), ComposeError> {
        self.gate(Some(pos))?;
        let Some(tile) = self.acting_rack().get(rack_index).copied() else {
            return Err(self.refuse(ComposeError::EmptySlot(rack_index), Some(pos)));
        };
        if self.state.composition.selected() != Some(pos) {
            self.select(pos);
        }
        let letter = tile.letter.map_or('A', |l| l.as_char());
        self.place_ghost(pos, letter, tile.is_blank)
    }

    /// Takes back the last ghost.
    pub fn undo(&mut self) {
        let LocalState { game, composition } = &mut self.state;
        composition.undo(&game.board);
    }

    /// Re-applies the last undone ghost.
    pub fn redo(&mut self) {
        let LocalState { game, composition } = &mut self.state;
        composition.redo(&game.board);
    }

    /// Drops the turn in progress.
    pub fn cancel(&mut self) {
        self.state.composition.clear();
    }

    /// Replaces displayed warnings.
    pub fn set_warnings(&mut self, warnings: Vec<Warning>) {
        self.state.composition.set_warnings(warnings);
    }

    /// Applies an action, gating placements on turn ownership.
    pub fn apply(&mut self, action: ComposeAction) -> Result<(), ComposeError> {
        match action {
            ComposeAction::Place {
                position,
                letter,
                is_blank,
            } => self.place_ghost(position, letter, is_blank),
            other => {
                let LocalState { game, composition } = &mut self.state;
                composition.apply(&game.board, &[], other)
            }
        }
    }

    /// Builds the move for the current ghosts, or `None` when there is
    /// nothing to submit or nobody acting.
    ///
    /// Regular tiles take their points from the rack; blanks score zero.
    #[instrument(skip(self))]
    pub fn build_move(&self) -> Option<Move> {
        let ghosts = self.state.composition.ghost_tiles();
        if ghosts.is_empty() {
            return None;
        }
        let player = self.acting_player()?;
        let rack = player.rack();

        let tiles = ghosts
            .iter()
            .map(|ghost| {
                let tile = if ghost.is_blank {
                    Tile::assigned_blank(ghost.letter)
                } else {
                    rack.iter()
                        .find(|t| !t.is_blank && t.letter == Some(ghost.letter))
                        .copied()
                        .unwrap_or_else(|| Tile::letter(ghost.letter))
                };
                PlacedTile {
                    row: ghost.position.row(),
                    col: ghost.position.col(),
                    tile,
                }
            })
            .collect();
        Some(Move::new(player.id().clone(), tiles))
    }

    /// Submits the composed move.
    ///
    /// Composition is cleared only once the authority accepts the move. A
    /// rejection is shown as a warning and leaves the ghosts in place.
    #[instrument(skip(self, sender))]
    pub async fn submit<S: MoveSender + ?Sized>(
        &mut self,
        sender: &S,
    ) -> Result<MoveValidationResult, SubmitError> {
        self.gate(None)
            .map_err(|e| SubmitError::new(e.to_string()))?;
        let Some(mv) = self.build_move() else {
            self.refuse(ComposeError::NoSelection, None);
            return Err(SubmitError::new("No tiles placed"));
        };

        info!(player_id = %mv.player_id, tiles = mv.tiles.len(), "Submitting move");
        let result = sender.submit_move(mv).await?;
        self.settle(&result);
        Ok(result)
    }

    /// Passes the turn.
    #[instrument(skip(self, sender))]
    pub async fn pass<S: MoveSender + ?Sized>(
        &mut self,
        sender: &S,
    ) -> Result<MoveValidationResult, SubmitError> {
        self.gate(None)
            .map_err(|e| SubmitError::new(e.to_string()))?;
        let Some(player_id) = self.acting_player().map(|p| p.id().clone()) else {
            return Err(SubmitError::new("No acting player"));
        };
        info!(%player_id, "Passing turn");
        let result = sender.pass(player_id).await?;
        self.settle(&result);
        Ok(result)
    }

    /// Rack tiles to exchange: those standing on the board as ghosts, or
    /// the whole rack when nothing is composed.
    pub fn exchange_tiles(&self) -> Vec<Tile> {
        let rack = self.acting_rack();
        let ghosts = self.state.composition.ghost_tiles();
        if ghosts.is_empty() {
            return rack.to_vec();
        }
        ghosts
            .iter()
            .map(|ghost| {
                if ghost.is_blank {
                    Tile::blank()
                } else {
                    Tile::letter(ghost.letter)
                }
            })
            .collect()
    }

    /// Swaps `tiles` for new ones from the bag, ending the turn.
    #[instrument(skip(self, sender, tiles), fields(tiles = tiles.len()))]
    pub async fn exchange<S: MoveSender + ?Sized>(
        &mut self,
        sender: &S,
        tiles: Vec<Tile>,
    ) -> Result<MoveValidationResult, SubmitError> {
        self.gate(None)
            .map_err(|e| SubmitError::new(e.to_string()))?;
        let Some(player_id) = self.acting_player().map(|p| p.id().clone()) else {
            return Err(SubmitError::new("No acting player"));
        };
        if tiles.is_empty() {
            return Err(SubmitError::new("No tiles to exchange"));
        }
        info!(%player_id, "Exchanging tiles");
        let result = sender.exchange(player_id, tiles).await?;
        self.settle(&result);
        Ok(result)
    }

    fn settle(&mut self, result: &MoveValidationResult) {
        if result.is_valid {
            info!(score = ?result.score, words = ?result.words, "Move accepted");
            self.state.composition.clear();
        } else {
            let reason = result
                .reason
                .clone()
                .unwrap_or_else(|| "Move rejected".to_string());
            warn!(%reason, "Move rejected");
            self.state
                .composition
                .set_warnings(vec![Warning::new(WarningKind::InvalidTile, reason).severe()]);
        }
    }

    /// Decodes and merges an authoritative payload.
    #[instrument(skip(self, json))]
    pub fn receive_authoritative(&mut self, json: &str) -> Result<(), DecodeError> {
        let incoming = decode_state(json)?;
        self.apply_incoming(incoming);
        Ok(())
    }

    /// Merges an already decoded authoritative update.
    pub fn apply_incoming(&mut self, incoming: IncomingState) {
        let local = std::mem::take(&mut self.state);
        self.state = merge_authoritative(local, incoming, &self.merge_options, &mut self.rng);
    }
}

impl Participation for GameSession {
    fn current_identity(&self) -> Option<PlayerId> {
        self.acting_id()
    }

    fn current_turn_owner(&self) -> Option<PlayerId> {
        self.state.game.current_turn_player_id.clone()
    }

    fn is_participant(&self, id: &str) -> bool {
        self.state.game.player(id).is_some()
    }
}

fn acting_player<'a>(game: &'a GameState, id: Option<&str>) -> Option<&'a PlayerState> {
    match id {
        Some(id) => game.player(id),
        None => game.players.first(),
    }
}

/// Move submission error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Submit error: {} at {}:{}", message, file, line)]
pub struct SubmitError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SubmitError {
    /// Creates a new submit error with caller location tracking.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::wordgrid::{ComposePhase, Letter};

    fn rack(letters: &str) -> Vec<Tile> {
        letters
            .chars()
            .map(|c| Letter::new(c).map_or_else(Tile::blank, Tile::letter))
            .collect()
    }

    fn session(identity: Identity, owner: &str) -> GameSession {
        let mut game = GameState::new("g1");
        game.players = vec![
            PlayerState::new("p1", "Ada").with_rack(rack("CATXXX?")),
            PlayerState::new("p2", "Bo").with_rack(rack("DOGEEEE")),
        ];
        game.current_turn_player_id = Some(owner.into());
        GameSession::new(game, identity)
    }

    #[test]
    fn test_place_letter_without_selection() {
        let mut session = session(Identity::HotSeat, "p1");
        assert_eq!(session.place_letter('C', false), Err(ComposeError::NoSelection));
        assert_eq!(session.composition().warnings()[0].kind, WarningKind::InvalidTile);
    }

    #[test]
    fn test_hot_seat_uses_turn_owner_rack() {
        let mut session = session(Identity::HotSeat, "p2");
        session.select(Position::CENTER);
        session.place_letter('D', false).unwrap();
        assert!(session.place_letter('C', false).is_err());
    }

    #[test]
    fn test_unseated_identity_acts_for_nobody() {
        let mut session = session(Identity::Fixed("p9".into()), "p1");
        assert!(session.acting_player().is_none());
        assert!(session.acting_rack().is_empty());

        session.select(Position::CENTER);
        assert!(session.place_letter('C', false).is_err());
        assert!(session.composition().ghost_tiles().is_empty());
        assert!(session.build_move().is_none());
    }

    #[test]
    fn test_exchange_tiles_prefers_ghosts() {
        let mut session = session(Identity::HotSeat, "p1");
        assert_eq!(session.exchange_tiles(), rack("CATXXX?"));

        session.select(Position::CENTER);
        session.place_letter('X', false).unwrap();
        session.place_letter('Q', true).unwrap();
        assert_eq!(session.exchange_tiles(), rack("X?"));
    }

    #[test]
    fn test_drop_blank_defaults_to_a() {
        let mut session = session(Identity::Fixed("p1".into()), "p1");
        session.drop_rack_tile(Position::CENTER, 6).unwrap();
        let ghost = session.composition().ghost_tiles()[0];
        assert_eq!(ghost.letter.as_char(), 'A');
        assert!(ghost.is_blank);
    }

    #[test]
    fn test_drop_onto_selected_keeps_direction() {
        let mut session = session(Identity::Fixed("p1".into()), "p1");
        session.select(Position::CENTER);
        session.toggle_direction();
        session.drop_rack_tile(Position::CENTER, 0).unwrap();
        assert_eq!(session.composition().selected(), Position::new(8, 7));
    }

    #[test]
    fn test_drop_empty_slot() {
        let mut session = session(Identity::Fixed("p1".into()), "p1");
        assert_eq!(
            session.drop_rack_tile(Position::CENTER, 7),
            Err(ComposeError::EmptySlot(7))
        );
    }

    #[test]
    fn test_build_move_scores_from_rack() {
        let mut session = session(Identity::Fixed("p1".into()), "p1");
        session.select(Position::CENTER);
        session.place_letter('C', false).unwrap();
        session.place_letter('Q', false).unwrap();

        let mv = session.build_move().unwrap();
        assert_eq!(mv.player_id, "p1");
        assert_eq!(mv.tiles[0].tile.points, 3);
        assert!(mv.tiles[1].tile.is_blank);
        assert_eq!(mv.tiles[1].tile.points, 0);
        assert_eq!((mv.tiles[1].row, mv.tiles[1].col), (7, 8));
    }

    #[test]
    fn test_disconnected_player_gets_advisory() {
        let mut game = GameState::new("g1");
        let mut player = PlayerState::new("p1", "Ada").with_rack(rack("A"));
        player.set_connected(false);
        game.players = vec![player];
        let mut session = GameSession::new(game, Identity::Fixed("p1".into()));
        session.select(Position::CENTER);
        session.place_letter('A', false).unwrap();
        assert_eq!(session.composition().ghost_tiles().len(), 1);
        assert_eq!(session.composition().warnings()[0].kind, WarningKind::NotConnected);
    }

    #[test]
    fn test_apply_gates_placement_actions() {
        let mut session = session(Identity::Fixed("p2".into()), "p1");
        session
            .apply(ComposeAction::Select {
                position: Position::CENTER,
            })
            .unwrap();
        let err = session
            .apply(ComposeAction::Place {
                position: Position::CENTER,
                letter: 'D',
                is_blank: false,
            })
            .unwrap_err();
        assert_eq!(err, ComposeError::NotYourTurn("p1".into()));
        assert_eq!(session.composition().phase(), ComposePhase::Selecting);
    }

    #[test]
    fn test_receive_authoritative_resets_composition() {
        let mut session = session(Identity::Fixed("p1".into()), "p1");
        session.select(Position::CENTER);
        session.place_letter('C', false).unwrap();
        session
            .receive_authoritative(r#"{"currentTurnPlayerId":"p2","players":[]}"#)
            .unwrap();
        assert_eq!(session.composition().phase(), ComposePhase::Idle);
        assert_eq!(session.game().players.len(), 2);
        assert_eq!(session.game().current_turn_player_id.as_deref(), Some("p2"));
    }
}
