//! Tool configuration (`meiswap.toml`).
//!
//! Provides the persisted schema plus discovery, loading, and saving.

mod loader;
mod schema;

pub use loader::{
    config_write_path, find_config, find_config_from, load_config, save_config, ConfigError,
    CONFIG_FILE,
};
pub use schema::Config;
