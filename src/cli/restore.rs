//! Restore command

use std::path::Path;
use std::process::ExitCode;

use crate::config;
use crate::restore;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the restore command
pub fn run_restore(config_path: Option<&Path>) -> ExitCode {
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let sprite_dir = match cfg.sprite_path {
        Some(ref path) => path.clone(),
        None => {
            eprintln!("Error: No game selected. Run 'mei game <exe>' first.");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let report = match restore::restore(&sprite_dir) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    println!(
        "Restored {} sprite{} ({} failed)",
        report.restored,
        if report.restored == 1 { "" } else { "s" },
        report.failed
    );
    ExitCode::from(EXIT_SUCCESS)
}
