//! Selection listing command

use std::path::Path;
use std::process::ExitCode;

use crate::catalog::CharacterCatalog;
use crate::config;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the selections command
///
/// Characters without an explicit entry show their best-match default.
pub fn run_selections(config_path: Option<&Path>) -> ExitCode {
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let store = cfg.selection_store();

    let characters = CharacterCatalog::builtin();
    for folder in characters.folders() {
        println!("{} -> {}", folder, store.get(folder));
    }
    ExitCode::from(EXIT_SUCCESS)
}
