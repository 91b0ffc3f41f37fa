//! Command-line interface for wordeau.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wordeau - guess the five-letter word in six tries
#[derive(Parser, Debug)]
#[command(name = "wordeau")]
#[command(about = "Terminal client for the Wordeau word game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the TOML config file (defaults are used if it is missing)
    #[arg(short, long, default_value = "wordeau.toml")]
    pub config: PathBuf,

    /// Database file for the persisted session (overrides config)
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, resuming the saved game if there is one
    Play {
        /// Config file and database location
        #[command(flatten)]
        common: CommonArgs,

        /// Guess service URL (overrides config and WORDEAU_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// Switch to normal mode before playing
        #[arg(long, conflicts_with = "hard")]
        normal: bool,

        /// Switch to hard mode before playing
        #[arg(long)]
        hard: bool,
    },

    /// Print the saved game
    Status {
        /// Config file and database location
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Forget the saved game (the difficulty setting is kept)
    Reset {
        /// Config file and database location
        #[command(flatten)]
        common: CommonArgs,
    },
}
