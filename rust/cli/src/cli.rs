use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fourfold",
    version,
    about = "Fourfold card game: collect four of a kind before anyone else"
)]
pub struct FourfoldCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a full game, one thread per player
    Play {
        /// Number of players; asked on stdin when missing
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        players: Option<u32>,
        /// Pack file, one card value per line; asked on stdin when missing
        #[arg(long)]
        pack: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Directory for the player and deck reports
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write every event to this JSONL file
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Validate a pack and show the initial deal
    Deal {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        players: u32,
        #[arg(long)]
        pack: PathBuf,
    },
    /// Generate a valid pack file
    Pack {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        players: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
