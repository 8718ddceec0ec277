//! Builtin sprite and character catalogs.
//!
//! The game-key table and the per-character outfit lists are embedded JSON
//! data files, loaded once at startup and read-only afterwards. The prefix
//! table used for character-folder resolution lives here as well.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::Deserialize;

/// Folder a sprite key resolves to when no prefix matches.
pub const UNKNOWN_FOLDER: &str = "unknown";

/// Sprite-key prefix to character-folder table.
///
/// Resolution picks the longest matching prefix, so "sato" wins over "sa"
/// for satoshi keys while plain satoko keys still match "sa".
const PREFIX_FOLDERS: &[(&str, &str)] = &[
    ("aka", "akane"),
    ("aks", "akasaka"),
    ("chibimion", "mion"),
    ("ha", "hanyuu"),
    ("iri", "irie"),
    ("kameda", "haruhi"),
    ("kasa", "kasai"),
    ("kei", "keiichi"),
    ("me", "mion"),
    ("mo", "eua"),
    ("mura", "eua"),
    ("oisi", "ooishi"),
    ("oko", "fuko"),
    ("re", "rena"),
    ("ri", "rika"),
    ("rina", "youhei"),
    ("sa", "satoko"),
    ("sato", "satoshi"),
    ("si", "shion"),
    ("ta", "takano"),
    ("tamura", "tamurahime"),
    ("tetu", "teppei"),
    ("tie", "chie"),
    ("tomi", "tomitake"),
    ("une", "une"),
];

/// Catalog record for one game sprite key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpriteEntry {
    /// Emotion/pose image name within a variant folder.
    pub expression: String,
    /// Best-known matching variant for this key.
    pub variant: String,
}

/// Immutable mapping from game sprite keys to replacement metadata.
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    sprites: HashMap<String, SpriteEntry>,
}

impl SpriteCatalog {
    /// Load the embedded game sprite table.
    pub fn builtin() -> Self {
        let sprites = serde_json::from_str(include_str!("sprites.json"))
            .expect("embedded sprite table is valid JSON");
        Self { sprites }
    }

    /// Look up the catalog record for a sprite key.
    pub fn lookup(&self, key: &str) -> Option<&SpriteEntry> {
        self.sprites.get(key)
    }

    /// Check if a sprite key is in the catalog.
    pub fn contains(&self, key: &str) -> bool {
        self.sprites.contains_key(key)
    }

    /// Number of known sprite keys.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// All (key, entry) pairs in stable sorted order.
    pub fn entries(&self) -> Vec<(&str, &SpriteEntry)> {
        let mut entries: Vec<(&str, &SpriteEntry)> =
            self.sprites.iter().map(|(k, e)| (k.as_str(), e)).collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    /// Resolve the character folder for a sprite key by longest-prefix match.
    ///
    /// Unmapped keys resolve to [`UNKNOWN_FOLDER`] with a warning; this is
    /// never an error.
    pub fn folder_of(&self, key: &str) -> &'static str {
        let mut selected = None;
        let mut longest = 0;
        for (prefix, folder) in PREFIX_FOLDERS {
            if key.starts_with(prefix) && prefix.len() > longest {
                selected = Some(*folder);
                longest = prefix.len();
            }
        }
        match selected {
            Some(folder) => folder,
            None => {
                warn!("no folder mapping for sprite key '{}'", key);
                UNKNOWN_FOLDER
            }
        }
    }
}

/// One replacement outfit: a display name plus the variant folder it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Outfit {
    pub name: String,
    pub variant: String,
}

/// Per-character outfit lists for the replacement art set.
#[derive(Debug, Clone)]
pub struct CharacterCatalog {
    characters: BTreeMap<String, Vec<Outfit>>,
}

impl CharacterCatalog {
    /// Load the embedded character table.
    pub fn builtin() -> Self {
        let characters = serde_json::from_str(include_str!("characters.json"))
            .expect("embedded character table is valid JSON");
        Self { characters }
    }

    /// Check if a character folder is known.
    pub fn contains(&self, folder: &str) -> bool {
        self.characters.contains_key(folder)
    }

    /// Outfits known for a character folder; empty for unknown folders.
    pub fn outfits(&self, folder: &str) -> &[Outfit] {
        self.characters.get(folder).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Character folders in sorted order.
    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }
}
