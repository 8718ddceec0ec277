//! Configuration schema for `meiswap.toml`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::selection::SelectionStore;

fn default_assets_root() -> PathBuf {
    PathBuf::from(".")
}

/// Persisted tool state: the selected game plus per-character selections.
///
/// Selections are stored in their free-text form (see [`crate::selection`])
/// so the file stays hand-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Selected episode executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_path: Option<PathBuf>,
    /// Live sprite directory derived from the executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_path: Option<PathBuf>,
    /// Directory the `sprites/mei` replacement tree lives under.
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,
    /// Character folder -> free-text selection string.
    #[serde(default)]
    pub selections: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_path: None,
            sprite_path: None,
            assets_root: default_assets_root(),
            selections: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Structured view of the persisted selection strings.
    pub fn selection_store(&self) -> SelectionStore {
        SelectionStore::from_config_strings(&self.selections)
    }

    /// Record the full selection map back into its persisted form.
    pub fn record_selections(&mut self, store: &SelectionStore) {
        self.selections = store.to_config_strings();
    }
}
