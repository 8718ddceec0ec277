//! Swap command

use std::path::Path;
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{CharacterCatalog, SpriteCatalog};
use crate::config;
use crate::resolve::PathResolver;
use crate::swap::SwapEngine;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the swap command
pub fn run_swap(config_path: Option<&Path>, seed: Option<u64>, assets: Option<&Path>) -> ExitCode {
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
    let assets_root = match assets {
        Some(path) => path.to_path_buf(),
        None => cfg.assets_root.clone(),
    };

    let catalog = SpriteCatalog::builtin();
    let characters = CharacterCatalog::builtin();
    let resolver = PathResolver::new(&assets_root, &catalog);
    let store = cfg.selection_store();
    let engine = SwapEngine::new(&catalog, &characters, &resolver, &store);

    let result = match seed {
        Some(seed) => engine.randomize(&sprite_dir, &mut StdRng::seed_from_u64(seed)),
        None => engine.randomize(&sprite_dir, &mut rand::rng()),
    };
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if report.backup_created {
        println!(
            "Backed up {} original sprite{}",
            report.backed_up,
            if report.backed_up == 1 { "" } else { "s" }
        );
    }
    println!(
        "Replaced {} sprite{} ({} missing assets, {} failed, {} not installed)",
        report.replaced,
        if report.replaced == 1 { "" } else { "s" },
        report.missing,
        report.failed,
        report.skipped
    );
    ExitCode::from(EXIT_SUCCESS)
}
