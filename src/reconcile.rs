//! Merging authoritative state into the local view.

use crate::games::wordgrid::{CompositionState, GameState, PlayerState, random_rack};
use crate::wire::IncomingState;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Everything the local client holds for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalState {
    /// Last known shared state.
    pub game: GameState,
    /// Turn in progress.
    pub composition: CompositionState,
}

impl LocalState {
    /// Wraps a game with an idle composition.
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            composition: CompositionState::new(),
        }
    }
}

/// Knobs for [`merge_authoritative`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Deal a random rack to a seat that has never had one.
    pub bootstrap_racks: bool,
}

/// Folds an authoritative update into `local`.
///
/// The board is replaced when present. Incoming players replace the local
/// list, keeping known racks for any player sent without one; an empty list
/// leaves the players untouched. The turn owner and other scalar fields
/// are only adopted when present. Composition is always cleared.
#[instrument(skip_all, fields(incoming_players = incoming.players.len()))]
pub fn merge_authoritative<R: Rng + ?Sized>(
    local: LocalState,
    incoming: IncomingState,
    options: &MergeOptions,
    rng: &mut R,
) -> LocalState {
    let LocalState {
        mut game,
        mut composition,
    } = local;

    if let Some(board) = incoming.board {
        game.board = board;
    }

    if incoming.players.is_empty() {
        debug!("No players in update, keeping previous list");
    } else {
        let previous = std::mem::take(&mut game.players);
        game.players = incoming
            .players
            .into_iter()
            .map(|player| merge_player(player, &previous, options, rng))
            .collect();
    }

    if let Some(owner) = incoming.current_turn_player_id {
        game.current_turn_player_id = Some(owner);
    }
    if let Some(id) = incoming.id {
        game.id = id;
    }
    if let Some(bag_count) = incoming.bag_count {
        game.bag_count = bag_count;
    }
    if let Some(status) = incoming.status {
        game.status = status;
    }
    if incoming.last_move.is_some() {
        game.last_move = incoming.last_move;
    }

    composition.clear();
    info!(
        game_id = %game.id,
        turn = ?game.current_turn_player_id,
        players = game.players.len(),
        "Authoritative state merged"
    );
    LocalState { game, composition }
}

fn merge_player<R: Rng + ?Sized>(
    player: PlayerState,
    previous: &[PlayerState],
    options: &MergeOptions,
    rng: &mut R,
) -> PlayerState {
    if !player.rack().is_empty() {
        return player;
    }
    let known = previous
        .iter()
        .find(|p| p.id() == player.id())
        .map(|p| p.rack().clone())
        .filter(|rack| !rack.is_empty());

    match known {
        Some(rack) => {
            debug!(player_id = %player.id(), "Keeping known rack");
            player.with_rack(rack)
        }
        None if options.bootstrap_racks => {
            debug!(player_id = %player.id(), "Dealing bootstrap rack");
            player.with_rack(random_rack(rng))
        }
        None => player,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::wordgrid::{
        BoardGrid, GameStatus, Letter, Position, RACK_SIZE, Tile,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tiles(letters: &str) -> Vec<Tile> {
        letters
            .chars()
            .filter_map(Letter::new)
            .map(Tile::letter)
            .collect()
    }

    fn local_with(players: Vec<PlayerState>) -> LocalState {
        let mut game = GameState::new("g1");
        game.players = players;
        game.current_turn_player_id = Some("p1".into());
        LocalState::new(game)
    }

    #[test]
    fn test_empty_rack_keeps_known_rack() {
        let local = local_with(vec![PlayerState::new("p1", "Ada").with_rack(tiles("ABCDEFG"))]);
        let incoming = IncomingState {
            players: vec![PlayerState::new("p1", "Ada")],
            ..Default::default()
        };
        let merged =
            merge_authoritative(local, incoming, &MergeOptions::default(), &mut rand::rng());
        assert_eq!(merged.game.players[0].rack(), &tiles("ABCDEFG"));
    }

    #[test]
    fn test_incoming_rack_wins() {
        let local = local_with(vec![PlayerState::new("p1", "Ada").with_rack(tiles("ABCDEFG"))]);
        let incoming = IncomingState {
            players: vec![PlayerState::new("p1", "Ada").with_rack(tiles("XYZ"))],
            ..Default::default()
        };
        let merged =
            merge_authoritative(local, incoming, &MergeOptions::default(), &mut rand::rng());
        assert_eq!(merged.game.players[0].rack(), &tiles("XYZ"));
    }

    #[test]
    fn test_empty_player_list_retains_previous() {
        let players = vec![
            PlayerState::new("p1", "Ada").with_rack(tiles("AB")),
            PlayerState::new("p2", "Bo"),
        ];
        let local = local_with(players.clone());
        let merged = merge_authoritative(
            local,
            IncomingState::default(),
            &MergeOptions::default(),
            &mut rand::rng(),
        );
        assert_eq!(merged.game.players, players);
    }

    #[test]
    fn test_players_missing_from_update_are_dropped() {
        let local = local_with(vec![PlayerState::new("p1", "Ada"), PlayerState::new("p2", "Bo")]);
        let incoming = IncomingState {
            players: vec![PlayerState::new("p2", "Bo")],
            ..Default::default()
        };
        let merged =
            merge_authoritative(local, incoming, &MergeOptions::default(), &mut rand::rng());
        assert_eq!(merged.game.players.len(), 1);
        assert_eq!(merged.game.players[0].id(), "p2");
    }

    #[test]
    fn test_turn_owner_retained_when_absent() {
        let local = local_with(vec![]);
        let merged = merge_authoritative(
            local,
            IncomingState {
                status: Some(GameStatus::Active),
                ..Default::default()
            },
            &MergeOptions::default(),
            &mut rand::rng(),
        );
        assert_eq!(merged.game.current_turn_player_id.as_deref(), Some("p1"));
        assert_eq!(merged.game.status, GameStatus::Active);

        let merged = merge_authoritative(
            merged,
            IncomingState {
                current_turn_player_id: Some("p2".into()),
                ..Default::default()
            },
            &MergeOptions::default(),
            &mut rand::rng(),
        );
        assert_eq!(merged.game.current_turn_player_id.as_deref(), Some("p2"));
    }

    #[test]
    fn test_composition_cleared_and_board_replaced() {
        let mut local = local_with(vec![PlayerState::new("p1", "Ada").with_rack(tiles("A"))]);
        let rack = local.game.players[0].rack().clone();
        local.composition.select_square(&local.game.board, Position::CENTER);
        local
            .composition
            .place_ghost(&local.game.board, &rack, Position::CENTER, 'A', false)
            .unwrap();

        let mut board = BoardGrid::new();
        board.lock_tile(Position::CENTER, Tile::letter(Letter::new('Z').unwrap()));
        let incoming = IncomingState {
            board: Some(board.clone()),
            ..Default::default()
        };
        let merged =
            merge_authoritative(local, incoming, &MergeOptions::default(), &mut rand::rng());
        assert_eq!(merged.composition, CompositionState::new());
        assert_eq!(merged.game.board, board);
    }

    #[test]
    fn test_bootstrap_only_when_enabled() {
        let incoming = || IncomingState {
            players: vec![PlayerState::new("p3", "Cy")],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);

        let merged = merge_authoritative(
            local_with(vec![]),
            incoming(),
            &MergeOptions::default(),
            &mut rng,
        );
        assert!(merged.game.players[0].rack().is_empty());

        let merged = merge_authoritative(
            local_with(vec![]),
            incoming(),
            &MergeOptions {
                bootstrap_racks: true,
            },
            &mut rng,
        );
        assert_eq!(merged.game.players[0].rack().len(), RACK_SIZE);
    }
}
