//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod game;
mod restore;
mod select;
mod status;
mod swap;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes shared by all commands.
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Meiswap - per-character Mei sprite substitution for Higurashi
#[derive(Parser)]
#[command(name = "mei")]
#[command(about = "Meiswap - per-character Mei sprite substitution for Higurashi (Ep01-Ep03)")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: discovered meiswap.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select the game installation by its episode executable
    Game {
        /// Path to HigurashiEp01.exe, HigurashiEp02.exe or HigurashiEp03.exe
        exe: PathBuf,
    },
    /// List known characters and their outfit counts
    Characters,
    /// List the selectable options for one character
    Options {
        /// Character folder name (see `characters`)
        character: String,
    },
    /// Set the substitution mode for one character
    Set {
        /// Character folder name (see `characters`)
        character: String,

        /// "Best Match", "Random Outfits", "Random Outfits & Expressions",
        /// or an outfit name from `options`
        option: String,
    },
    /// Show the current per-character selections
    Selections,
    /// Back up the originals (first run only) and replace live sprites
    Swap {
        /// Seed for the random modes (omit for a fresh roll per run)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory the sprites/mei replacement tree lives under
        #[arg(long, value_name = "DIR")]
        assets: Option<PathBuf>,
    },
    /// Copy the backed-up originals back over the live sprites
    Restore,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Game { exe } => game::run_game(config_path, &exe),
        Commands::Characters => select::run_characters(),
        Commands::Options { character } => select::run_options(&character),
        Commands::Set { character, option } => select::run_set(config_path, &character, &option),
        Commands::Selections => status::run_selections(config_path),
        Commands::Swap { seed, assets } => swap::run_swap(config_path, seed, assets.as_deref()),
        Commands::Restore => restore::run_restore(config_path),
    }
}
