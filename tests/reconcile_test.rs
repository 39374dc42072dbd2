//! Decoding authoritative payloads and merging them into local state.

use strictly_tiles::{
    GameState, LocalState, MergeOptions, PlayerState, Position, Premium, Tile, Letter,
    decode_state, merge_authoritative,
};

fn tiles(letters: &str) -> Vec<Tile> {
    letters.chars().filter_map(Letter::new).map(Tile::letter).collect()
}

fn local() -> LocalState {
    let mut game = GameState::new("g1");
    game.players = vec![
        PlayerState::new("p1", "Ada").with_rack(tiles("ABCDEFG")),
        PlayerState::new("p2", "Bo").with_rack(tiles("HIJKLMN")),
    ];
    game.current_turn_player_id = Some("p1".into());
    LocalState::new(game)
}

#[test]
fn test_payload_without_racks_keeps_local_racks() {
    let json = r#"{
        "id": "g1",
        "players": [
            {"id": "p1", "name": "Ada", "score": 12, "rack": [], "isConnected": true},
            {"id": "p2", "name": "Bo", "score": 3, "isConnected": false}
        ],
        "currentTurnPlayerId": null,
        "bagCount": 80,
        "status": "active"
    }"#;
    let incoming = decode_state(json).unwrap();
    let merged = merge_authoritative(local(), incoming, &MergeOptions::default(), &mut rand::rng());

    let p1 = merged.game.player("p1").unwrap();
    assert_eq!(p1.rack(), &tiles("ABCDEFG"));
    assert_eq!(*p1.score(), 12);
    assert_eq!(merged.game.player("p2").unwrap().rack(), &tiles("HIJKLMN"));
    assert!(!merged.game.player("p2").unwrap().is_connected());
    assert_eq!(merged.game.current_turn_player_id.as_deref(), Some("p1"));
    assert_eq!(merged.game.bag_count, 80);
}

#[test]
fn test_malformed_board_degrades_to_empty_with_premiums() {
    let mut state = local();
    state
        .game
        .board
        .lock_tile(Position::CENTER, Tile::letter(Letter::new('Z').unwrap()));

    let incoming = decode_state(r#"{"board": [[1, 2, 3], "nope"]}"#).unwrap();
    let merged = merge_authoritative(state, incoming, &MergeOptions::default(), &mut rand::rng());
    assert!(merged.game.board.is_blank_board());
    assert_eq!(merged.game.board.get(Position::CENTER).premium, Some(Premium::Center));
}

#[test]
fn test_wrong_field_type_is_a_decode_error() {
    assert!(decode_state(r#"{"players": "everyone"}"#).is_err());
    assert!(decode_state("not json").is_err());
}
