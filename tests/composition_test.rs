//! End-to-end composition through the public API.

use proptest::prelude::*;
use strictly_tiles::games::wordgrid::{GhostPlacement, is_available};
use strictly_tiles::{
    BoardGrid, ComposeError, ComposePhase, CompositionState, Direction, GameSession, GameState,
    Identity, Letter, PlayerState, Position, Tile, WarningKind,
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).expect("on board")
}

fn rack(letters: &str) -> Vec<Tile> {
    letters
        .chars()
        .map(|c| Letter::new(c).map_or_else(Tile::blank, Tile::letter))
        .collect()
}

fn ghost_letters(state: &CompositionState) -> Vec<(Position, char)> {
    state
        .ghost_tiles()
        .iter()
        .map(|g| (g.position, g.letter.as_char()))
        .collect()
}

#[test]
fn test_cat_then_undo() {
    let board = BoardGrid::new();
    let rack = rack("CATXXXX");
    let mut state = CompositionState::new();

    state.select_square(&board, pos(7, 7));
    assert_eq!(state.direction(), Direction::Horizontal);
    state.place_ghost(&board, &rack, pos(7, 7), 'C', false).unwrap();
    state.place_ghost(&board, &rack, pos(7, 8), 'A', false).unwrap();
    state.place_ghost(&board, &rack, pos(7, 9), 'T', false).unwrap();

    assert_eq!(
        ghost_letters(&state),
        vec![(pos(7, 7), 'C'), (pos(7, 8), 'A'), (pos(7, 9), 'T')]
    );
    assert_eq!(state.selected(), Some(pos(7, 10)));

    state.undo(&board);
    assert_eq!(ghost_letters(&state), vec![(pos(7, 7), 'C'), (pos(7, 8), 'A')]);
    assert_eq!(state.selected(), Some(pos(7, 9)));
}

#[test]
fn test_path_stops_at_locked_tile() {
    let mut board = BoardGrid::new();
    board.lock_tile(pos(7, 10), Tile::letter(Letter::new('S').unwrap()));
    let mut state = CompositionState::new();
    state.select_square(&board, pos(7, 7));
    assert_eq!(state.valid_placements(), &[pos(7, 7), pos(7, 8), pos(7, 9)]);

    state.select_square(&board, pos(7, 10));
    assert!(state.valid_placements().is_empty());
}

#[test]
fn test_rack_accounting_with_wildcard() {
    let rack = rack("AAB?");
    let a = Letter::new('A').unwrap();
    let c = Letter::new('C').unwrap();
    let mut pending = vec![
        GhostPlacement {
            position: pos(7, 7),
            letter: a,
            is_blank: false,
        },
        GhostPlacement {
            position: pos(7, 8),
            letter: Letter::new('B').unwrap(),
            is_blank: false,
        },
    ];
    assert!(is_available(&rack, &pending, a));
    assert!(is_available(&rack, &pending, c));

    pending.push(GhostPlacement {
        position: pos(7, 9),
        letter: c,
        is_blank: true,
    });
    assert!(!is_available(&rack, &pending, c));
    assert!(is_available(&rack, &pending, a));
}

#[test]
fn test_turn_gate_blocks_non_owner() {
    let mut game = GameState::new("g1");
    game.players = vec![
        PlayerState::new("p1", "Ada").with_rack(rack("CAT")),
        PlayerState::new("p2", "Bo").with_rack(rack("DOG")),
    ];
    game.current_turn_player_id = Some("p2".into());
    let mut session = GameSession::new(game, Identity::Fixed("p1".into()));

    session.select(pos(7, 7));
    let err = session.place_ghost(pos(7, 7), 'C', false).unwrap_err();
    assert_eq!(err, ComposeError::NotYourTurn("p2".into()));
    assert!(session.composition().ghost_tiles().is_empty());
    assert_eq!(session.composition().warnings()[0].kind, WarningKind::InvalidTurn);
    assert_eq!(session.composition().phase(), ComposePhase::Selecting);
}

proptest! {
    #[test]
    fn prop_undo_all_then_redo_all_restores(
        row in 0usize..15,
        col in 0usize..15,
        vertical in any::<bool>(),
        word in "[A-Z]{1,7}",
    ) {
        let board = BoardGrid::new();
        let rack = rack(&word);
        let mut state = CompositionState::new();
        state.select_square(&board, pos(row, col));
        if vertical {
            state.toggle_direction(&board);
        }
        for c in word.chars() {
            let Some(at) = state.valid_placements().first().copied() else {
                break;
            };
            state.place_ghost(&board, &rack, at, c, false).unwrap();
        }
        let placed = state.ghost_tiles().to_vec();

        for _ in 0..placed.len() {
            prop_assert!(state.undo(&board).is_some());
        }
        prop_assert!(state.ghost_tiles().is_empty());
        for _ in 0..placed.len() {
            prop_assert!(state.redo(&board).is_some());
        }
        prop_assert_eq!(state.ghost_tiles(), placed.as_slice());
    }
}
