//! Configuration loading, discovery, and persistence for `meiswap.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::Config;

/// Configuration file name searched for.
pub const CONFIG_FILE: &str = "meiswap.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("failed to parse meiswap.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Find meiswap.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for meiswap.toml
/// 2. Check XDG_CONFIG_HOME/meiswap/meiswap.toml (or ~/.config/meiswap/meiswap.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find meiswap.toml in the XDG config directory.
fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("meiswap").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find meiswap.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a meiswap.toml file.
///
/// If a path is provided, loads from that file. Otherwise uses
/// `find_config()` to locate one; no config file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(Config::default()),
    }
}

fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Persist the configuration, creating parent directories as needed.
///
/// The tool saves on every mutation (game selection, selection commit), so
/// this is the single write path for `meiswap.toml`.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// The path mutations are written back to: the explicit override, the
/// discovered file, or `meiswap.toml` in the current directory.
pub fn config_write_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => find_config().unwrap_or_else(|| PathBuf::from(CONFIG_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(&config_path, "").expect("should write config");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(&config_path, "").expect("should write config");

        let subdir = temp.path().join("sprites").join("mei");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            r#"
game_path = "/games/HigurashiEp01.exe"
sprite_path = "/games/HigurashiEp01_Data/StreamingAssets/CGAlt/sprite"

[selections]
satoko = "Casual (variant: v002)"
rena = "Random Outfits"
"#,
        )
        .expect("should write config");

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.game_path, Some(PathBuf::from("/games/HigurashiEp01.exe")));
        assert_eq!(config.assets_root, PathBuf::from("."));
        assert_eq!(config.selections["rena"], "Random Outfits");
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(&config_path, "this is not valid toml {{{").expect("should write config");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("nested").join(CONFIG_FILE);

        let mut selections = BTreeMap::new();
        selections.insert("satoko".to_string(), "Best Match".to_string());
        let config = Config {
            game_path: Some(PathBuf::from("/games/HigurashiEp02.exe")),
            sprite_path: Some(PathBuf::from("/games/sprite")),
            assets_root: PathBuf::from("."),
            selections,
        };

        save_config(&config_path, &config).expect("should save config");
        let reloaded = load_config(Some(&config_path)).expect("should reload config");
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_config_write_path_explicit() {
        let explicit = PathBuf::from("/tmp/custom.toml");
        assert_eq!(config_write_path(Some(&explicit)), explicit);
    }
}
