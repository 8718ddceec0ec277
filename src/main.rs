//! Meiswap - Command-line tool for swapping Higurashi sprites with Mei art

use std::process::ExitCode;

use meiswap::cli;

fn main() -> ExitCode {
    // Engines log per-file failures through the `log` facade; default to
    // warnings so RUST_LOG=debug exposes the per-key replacement trace.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    cli::run()
}
