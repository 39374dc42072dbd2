//! Command-line interface for strictly_tiles.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Tiles - type-safe move composition for a word-tile board
#[derive(Parser, Debug)]
#[command(name = "strictly_tiles")]
#[command(about = "Compose and play word-tile moves in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (falls back to $STRICTLY_TILES_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a pass-and-play game in the terminal
    Play {
        /// Word list to check words against (overrides the config)
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Seed for the tile bag (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the premium square layout
    Layout,

    /// Print the JSON schema of the authoritative state payload
    Schema,

    /// Decode an authoritative state payload and summarise it
    Decode {
        /// JSON file to decode
        file: PathBuf,
    },
}
