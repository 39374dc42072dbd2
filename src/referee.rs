//! In-process authority for pass-and-play games.
//!
//! [`Referee`] holds the shared game and judges moves. [`LocalReferee`]
//! runs one on a tokio task, taking requests over a channel and
//! publishing every new state as JSON, the same shape a remote host
//! would send.

use crate::config::ConfigError;
use crate::games::wordgrid::rules::{formed_words, validate_placement};
use crate::games::wordgrid::{
    GameState, GameStatus, Move, MoveValidationResult, PlayerId, PlayerState, RACK_SIZE, Tile,
    TileBag,
};
use crate::session::{MoveSender, SubmitError};
use crate::wire::encode_state;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Decides whether a string is a playable word.
pub trait WordValidator: Send + Sync {
    /// Returns true for an acceptable uppercase word.
    fn is_word(&self, word: &str) -> bool;
}

/// Accepts every word.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl WordValidator for AcceptAll {
    fn is_word(&self, _word: &str) -> bool {
        true
    }
}

/// Accepts words from a fixed list.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Builds a list from any words, normalised to uppercase.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Reads one word per line.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read word list: {}", e)))?;
        let list = Self::new(content.lines());
        info!(words = list.len(), "Word list loaded");
        Ok(list)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordValidator for WordList {
    fn is_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Authoritative game state and rules.
pub struct Referee {
    state: GameState,
    bag: TileBag,
    validator: Box<dyn WordValidator>,
    passes: usize,
    rng: StdRng,
}

impl std::fmt::Debug for Referee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Referee")
            .field("state", &self.state)
            .field("bag", &self.bag.len())
            .field("passes", &self.passes)
            .finish()
    }
}

impl Referee {
    /// Seats `names`, shuffles a full bag and deals every rack.
    #[instrument(skip(rng, validator))]
    pub fn new<R: Rng + ?Sized>(
        game_id: &str,
        names: &[String],
        rng: &mut R,
        validator: Box<dyn WordValidator>,
    ) -> Self {
        let mut bag = TileBag::shuffled(rng);
        let mut state = GameState::new(game_id);
        for name in names {
            let mut rack = Vec::new();
            bag.refill(&mut rack);
            state
                .players
                .push(PlayerState::new(name.clone(), name.clone()).with_rack(rack));
        }
        state.current_turn_player_id = state.players.first().map(|p| p.id().clone());
        state.status = GameStatus::Active;
        info!(players = state.players.len(), "Game dealt");
        Self::from_state(state, bag, validator).with_seed(rng.random())
    }

    /// Resumes from an existing state.
    pub fn from_state(
        mut state: GameState,
        bag: TileBag,
        validator: Box<dyn WordValidator>,
    ) -> Self {
        state.bag_count = bag.len() as u32;
        Self {
            state,
            bag,
            validator,
            passes: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the RNG that reshuffles exchanged tiles into the bag.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current authoritative state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn check_turn(&self, player_id: &str) -> Result<(), String> {
        if self.state.status != GameStatus::Active {
            return Err(format!("Game is {}", self.state.status));
        }
        match &self.state.current_turn_player_id {
            Some(owner) if owner == player_id => Ok(()),
            Some(owner) => Err(format!("Not your turn. Waiting for {}", owner)),
            None => Err("No turn in progress".to_string()),
        }
    }

    /// Judges a move and commits it when legal.
    #[instrument(skip(self, mv), fields(player_id = %mv.player_id, tiles = mv.tiles.len()))]
    pub fn submit(&mut self, mv: &Move) -> MoveValidationResult {
        match self.judge(mv) {
            Ok((committed, rack)) => {
                let score = committed.total_points;
                let words = committed.formed_words.clone();
                self.commit(committed, rack);
                MoveValidationResult::accepted(score, words)
            }
            Err(reason) => {
                warn!(%reason, "Move rejected");
                MoveValidationResult::rejected(reason)
            }
        }
    }

    fn judge(&self, mv: &Move) -> Result<(Move, Vec<Tile>), String> {
        self.check_turn(&mv.player_id)?;
        let (positions, direction) =
            validate_placement(&self.state.board, &mv.tiles).map_err(|e| e.to_string())?;

        let player = self
            .state
            .player(&mv.player_id)
            .ok_or_else(|| format!("Unknown player {}", mv.player_id))?;
        let mut rack = player.rack().clone();
        for placed in &mv.tiles {
            if !take_tile(&mut rack, &placed.tile) {
                return Err(format!("Tile {} is not in your rack", placed.tile.label()));
            }
        }

        let mut board = self.state.board.clone();
        board.apply_move(mv);
        let words = formed_words(&board, &positions, direction);
        if words.is_empty() {
            return Err("Move forms no words".to_string());
        }
        if let Some(bad) = words.iter().find(|w| !self.validator.is_word(&w.text)) {
            return Err(format!("{} is not a word", bad.text));
        }

        let mut committed = mv.clone();
        committed.total_points = words.iter().map(|w| w.points).sum();
        committed.formed_words = words.into_iter().map(|w| w.text).collect();
        Ok((committed, rack))
    }

    fn commit(&mut self, mv: Move, mut rack: Vec<Tile>) {
        self.bag.refill(&mut rack);
        self.state.board.apply_move(&mv);
        let rack_empty = rack.is_empty();
        if let Some(player) = self.state.player_mut(&mv.player_id) {
            *player.rack_mut() = rack;
            player.add_score(mv.total_points);
        }
        self.state.bag_count = self.bag.len() as u32;
        self.passes = 0;
        info!(
            player_id = %mv.player_id,
            words = ?mv.formed_words,
            points = mv.total_points,
            "Move committed"
        );
        self.state.last_move = Some(mv);

        if rack_empty && self.bag.is_empty() {
            info!("Rack and bag exhausted, game over");
            self.state.status = GameStatus::Finished;
        } else {
            self.advance_turn();
        }
    }

    /// Gives up the turn. Two full rounds of passes end the game.
    #[instrument(skip(self))]
    pub fn pass(&mut self, player_id: &str) -> MoveValidationResult {
        if let Err(reason) = self.check_turn(player_id) {
            warn!(%reason, "Pass rejected");
            return MoveValidationResult::rejected(reason);
        }
        self.passes += 1;
        if self.passes >= self.state.players.len() * 2 {
            info!("Everyone passed twice, game over");
            self.state.status = GameStatus::Finished;
        } else {
            self.advance_turn();
        }
        MoveValidationResult::accepted(0, Vec::new())
    }

    /// Swaps `tiles` from the player's rack for fresh ones and ends the
    /// turn. Needs a full rack's worth of tiles left in the bag.
    #[instrument(skip(self, tiles), fields(tiles = tiles.len()))]
    pub fn exchange(&mut self, player_id: &str, tiles: &[Tile]) -> MoveValidationResult {
        match self.judge_exchange(player_id, tiles) {
            Ok(mut rack) => {
                let drawn = self.bag.draw(tiles.len());
                rack.extend(drawn);
                self.bag.put_back(tiles.to_vec(), &mut self.rng);
                if let Some(player) = self.state.player_mut(player_id) {
                    *player.rack_mut() = rack;
                }
                self.state.bag_count = self.bag.len() as u32;
                self.passes = 0;
                info!(%player_id, exchanged = tiles.len(), "Tiles exchanged");
                self.advance_turn();
                MoveValidationResult::accepted(0, Vec::new())
            }
            Err(reason) => {
                warn!(%reason, "Exchange rejected");
                MoveValidationResult::rejected(reason)
            }
        }
    }

    fn judge_exchange(&self, player_id: &str, tiles: &[Tile]) -> Result<Vec<Tile>, String> {
        self.check_turn(player_id)?;
        if tiles.is_empty() {
            return Err("Choose at least one tile to exchange".to_string());
        }
        if self.bag.len() < RACK_SIZE {
            return Err(format!(
                "Only {} tiles left in the bag, exchange needs {}",
                self.bag.len(),
                RACK_SIZE
            ));
        }
        let player = self
            .state
            .player(player_id)
            .ok_or_else(|| format!("Unknown player {}", player_id))?;
        let mut rack = player.rack().clone();
        for tile in tiles {
            if !take_tile(&mut rack, tile) {
                return Err(format!("Tile {} is not in your rack", tile.label()));
            }
        }
        Ok(rack)
    }

    fn advance_turn(&mut self) {
        let players = &self.state.players;
        let current = self
            .state
            .current_turn_player_id
            .as_deref()
            .and_then(|id| players.iter().position(|p| p.id() == id))
            .unwrap_or(0);
        let next = players.get((current + 1) % players.len().max(1));
        self.state.current_turn_player_id = next.map(|p| p.id().clone());
        debug!(next = ?self.state.current_turn_player_id, "Turn advanced");
    }
}

/// Removes one tile matching `tile` from `rack`. Blanks match any blank.
fn take_tile(rack: &mut Vec<Tile>, tile: &Tile) -> bool {
    let slot = rack
        .iter()
        .position(|t| t.is_blank == tile.is_blank && (t.is_blank || t.letter == tile.letter));
    match slot {
        Some(index) => {
            rack.remove(index);
            true
        }
        None => false,
    }
}

/// A request to the referee task.
#[derive(Debug)]
pub enum RefereeRequest {
    /// Submit a move.
    Submit {
        /// The move.
        mv: Move,
        /// Verdict channel.
        reply: oneshot::Sender<MoveValidationResult>,
    },
    /// Pass the turn.
    Pass {
        /// Passing player.
        player_id: PlayerId,
        /// Verdict channel.
        reply: oneshot::Sender<MoveValidationResult>,
    },
    /// Swap rack tiles for new ones.
    Exchange {
        /// Exchanging player.
        player_id: PlayerId,
        /// Tiles to return.
        tiles: Vec<Tile>,
        /// Verdict channel.
        reply: oneshot::Sender<MoveValidationResult>,
    },
}

/// Runs a [`Referee`] on its own task.
pub struct LocalReferee;

impl LocalReferee {
    /// Spawns the referee.
    ///
    /// Returns a sender for moves and a stream of JSON states, starting
    /// with the initial deal. The task stops once every sender is dropped.
    #[instrument(skip(referee))]
    pub fn spawn(mut referee: Referee) -> (ChannelMoveSender, mpsc::UnboundedReceiver<String>) {
        let (request_tx, mut request_rx) = mpsc::channel::<RefereeRequest>(16);
        let (state_tx, state_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            publish(&state_tx, referee.state());
            while let Some(request) = request_rx.recv().await {
                let (result, reply) = match request {
                    RefereeRequest::Submit { mv, reply } => (referee.submit(&mv), reply),
                    RefereeRequest::Pass { player_id, reply } => (referee.pass(&player_id), reply),
                    RefereeRequest::Exchange {
                        player_id,
                        tiles,
                        reply,
                    } => (referee.exchange(&player_id, &tiles), reply),
                };
                if result.is_valid {
                    publish(&state_tx, referee.state());
                }
                if reply.send(result).is_err() {
                    debug!("Requester went away before the verdict");
                }
            }
            info!("Referee stopped");
        });

        (ChannelMoveSender { tx: request_tx }, state_rx)
    }
}

fn publish(tx: &mpsc::UnboundedSender<String>, state: &GameState) {
    match encode_state(state) {
        Ok(json) => {
            if tx.send(json).is_err() {
                debug!("No state listener");
            }
        }
        Err(e) => warn!(error = %e, "Failed to encode state"),
    }
}

/// [`MoveSender`] talking to a [`LocalReferee`].
#[derive(Debug, Clone)]
pub struct ChannelMoveSender {
    tx: mpsc::Sender<RefereeRequest>,
}

impl ChannelMoveSender {
    async fn request(
        &self,
        build: impl FnOnce(oneshot::Sender<MoveValidationResult>) -> RefereeRequest,
    ) -> Result<MoveValidationResult, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| SubmitError::new("Referee is not running"))?;
        reply_rx
            .await
            .map_err(|_| SubmitError::new("Referee dropped the request"))
    }
}

#[async_trait::async_trait]
impl MoveSender for ChannelMoveSender {
    async fn submit_move(&self, mv: Move) -> Result<MoveValidationResult, SubmitError> {
        self.request(|reply| RefereeRequest::Submit { mv, reply }).await
    }

    async fn pass(&self, player_id: PlayerId) -> Result<MoveValidationResult, SubmitError> {
        self.request(|reply| RefereeRequest::Pass { player_id, reply })
            .await
    }

    async fn exchange(
        &self,
        player_id: PlayerId,
        tiles: Vec<Tile>,
    ) -> Result<MoveValidationResult, SubmitError> {
        self.request(|reply| RefereeRequest::Exchange {
            player_id,
            tiles,
            reply,
        })
        .await
    }
}
