//! Tests for loading client configuration.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use strictly_tiles::TilesConfig;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("tiles.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_defaults_fill_missing_fields() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "seed = 42\n");

    let config = TilesConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.players().len(), 2);
    assert_eq!(config.debounce(), Duration::from_millis(8));
    assert_eq!(*config.seed(), Some(42));
    assert!(!config.merge_options().bootstrap_racks);
    assert!(config.identity().is_none());
}

#[test]
fn test_full_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"players = ["Ada", "Bo", "Cy"]
identity = "Bo"
debounce_ms = 0
bootstrap_racks = true
dictionary = "words.txt"
log_file = "play.log"
"#,
    );

    let config = TilesConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.players(), &["Ada", "Bo", "Cy"]);
    assert_eq!(config.identity().as_deref(), Some("Bo"));
    assert!(config.debounce().is_zero());
    assert!(config.merge_options().bootstrap_racks);
    assert_eq!(config.log_file().to_str(), Some("play.log"));
}

#[test]
fn test_identity_must_be_seated() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "players = [\"Ada\"]\nidentity = \"Zed\"\n");
    let err = TilesConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Zed"));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "this is not valid toml !!!@@@");
    assert!(TilesConfig::from_file(&path).is_err());
    assert!(TilesConfig::from_file(dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_cli_overrides_win() {
    let config = TilesConfig::default().with_overrides(None, Some(7));
    assert_eq!(*config.seed(), Some(7));
    assert!(config.dictionary().is_none());
}
