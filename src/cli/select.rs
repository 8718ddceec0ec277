//! Character browsing and selection commands

use std::path::Path;
use std::process::ExitCode;

use crate::catalog::CharacterCatalog;
use crate::config;
use crate::menu::{options_for, MenuEffect, MenuInput, SelectionFlow};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the characters command
pub fn run_characters() -> ExitCode {
    let characters = CharacterCatalog::builtin();
    for folder in characters.folders() {
        let count = characters.outfits(folder).len();
        println!("{} ({} outfit{})", folder, count, if count == 1 { "" } else { "s" });
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the options command
pub fn run_options(character: &str) -> ExitCode {
    let characters = CharacterCatalog::builtin();
    if !characters.contains(character) {
        eprintln!("Error: Unknown character '{}'", character);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    for option in options_for(&characters, character) {
        println!("{}", option);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the set command
///
/// Drives the selection flow through character and option to its commit,
/// then persists the full selection map.
pub fn run_set(config_path: Option<&Path>, character: &str, option: &str) -> ExitCode {
    let characters = CharacterCatalog::builtin();
    let mut flow = SelectionFlow::new(&characters);

    if let Err(e) = flow.handle(MenuInput::Open) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }
    if let Err(e) = flow.handle(MenuInput::ChooseCharacter(character.to_string())) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    let MenuEffect::Commit { folder, selection } =
        match flow.handle(MenuInput::ChooseOption(option.to_string())) {
            Ok(Some(effect)) => effect,
            Ok(None) => {
                eprintln!("Error: selection flow did not commit");
                return ExitCode::from(EXIT_ERROR);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };

    let mut cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let mut store = cfg.selection_store();
    store.set(folder.clone(), selection.clone());
    cfg.record_selections(&store);

    let write_path = config::config_write_path(config_path);
    if let Err(e) = config::save_config(&write_path, &cfg) {
        eprintln!("Error: Failed to save '{}': {}", write_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("{} -> {}", folder, selection);
    ExitCode::from(EXIT_SUCCESS)
}
