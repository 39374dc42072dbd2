//! Strictly Tiles - Unified CLI
//!
//! Terminal play against a local referee, plus tools for inspecting the
//! board layout and authoritative payloads.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_tiles::{BoardGrid, GameStatePayload, TilesConfig, decode_state};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { dictionary, seed } => {
            let config = TilesConfig::load(cli.config.as_deref())?.with_overrides(dictionary, seed);
            tui::run_play(config).await
        }
        Command::Layout => {
            initialize_tracing();
            print!("{}", BoardGrid::new().display());
            Ok(())
        }
        Command::Schema => {
            initialize_tracing();
            let schema = schemars::schema_for!(GameStatePayload);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        Command::Decode { file } => {
            initialize_tracing();
            run_decode(&file)
        }
    }
}

/// Decode a payload file and print what it carries.
#[instrument(fields(file = %file.display()))]
fn run_decode(file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let incoming = decode_state(&json)?;
    info!("Payload decoded");

    println!("id:      {}", incoming.id.as_deref().unwrap_or("-"));
    println!(
        "status:  {}",
        incoming.status.map_or_else(|| "-".to_string(), |s| s.to_string())
    );
    println!(
        "turn:    {}",
        incoming.current_turn_player_id.as_deref().unwrap_or("-")
    );
    println!(
        "bag:     {}",
        incoming.bag_count.map_or_else(|| "-".to_string(), |n| n.to_string())
    );
    for player in &incoming.players {
        let rack: String = player.rack().iter().map(|t| t.label()).collect();
        println!(
            "player:  {} ({}) score {} rack [{}]{}",
            player.name(),
            player.id(),
            player.score(),
            rack,
            if *player.is_connected() { "" } else { " disconnected" }
        );
    }
    if let Some(mv) = &incoming.last_move {
        println!(
            "last:    {} played {:?} for {}",
            mv.player_id, mv.formed_words, mv.total_points
        );
    }
    match &incoming.board {
        Some(board) => print!("\n{}", board.display()),
        None => println!("board:   (not included)"),
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,strictly_tiles=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
