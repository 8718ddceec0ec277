//! Game-selection command

use std::path::Path;
use std::process::ExitCode;

use crate::config;
use crate::install::GameInstall;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the game command
pub fn run_game(config_path: Option<&Path>, exe: &Path) -> ExitCode {
    let install = match GameInstall::from_exe(exe) {
        Ok(install) => install,
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
    cfg.game_path = Some(install.exe_path.clone());
    cfg.sprite_path = Some(install.sprite_dir.clone());

    let write_path = config::config_write_path(config_path);
    if let Err(e) = config::save_config(&write_path, &cfg) {
        eprintln!("Error: Failed to save '{}': {}", write_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Game selected: {}", install.exe_path.display());
    println!("Sprite directory: {}", install.sprite_dir.display());
    ExitCode::from(EXIT_SUCCESS)
}
