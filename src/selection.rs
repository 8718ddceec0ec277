//! Per-character substitution modes and the selection store.
//!
//! Selections are persisted as free-text strings (`"Best Match"`,
//! `"Random Outfits"`, `"Random Outfits & Expressions"`, or
//! `"<outfit> (variant: <id>)"`); parsing is total and falls back to
//! best-match for anything it does not recognize.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Display/config label for the best-match mode.
pub const BEST_MATCH: &str = "Best Match";
/// Display/config label for the random-outfit mode.
pub const RANDOM_OUTFITS: &str = "Random Outfits";
/// Display/config label for the random-outfit-and-expression mode.
pub const RANDOM_OUTFITS_AND_EXPRESSIONS: &str = "Random Outfits & Expressions";

/// How one character's sprites are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Use each key's preferred variant.
    #[default]
    BestMatch,
    /// Use one chosen outfit for every key of the character.
    Fixed { name: String, variant: String },
    /// Pick a random outfit per key, keeping the key's expression.
    RandomOutfits,
    /// Pick a random outfit and a random expression from its folder.
    RandomOutfitsAndExpressions,
}

fn fixed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<name>.+) \(variant: (?P<variant>[^)]+)\)$")
            .expect("fixed-selection pattern compiles")
    })
}

impl Selection {
    /// Parse a stored selection string.
    ///
    /// Never fails: empty input and `"best match"` in any case are
    /// [`Selection::BestMatch`], and so is anything unrecognized.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(BEST_MATCH) {
            return Self::BestMatch;
        }
        match raw {
            RANDOM_OUTFITS => return Self::RandomOutfits,
            RANDOM_OUTFITS_AND_EXPRESSIONS => return Self::RandomOutfitsAndExpressions,
            _ => {}
        }
        if let Some(caps) = fixed_pattern().captures(raw) {
            return Self::Fixed {
                name: caps["name"].to_string(),
                variant: caps["variant"].to_string(),
            };
        }
        Self::BestMatch
    }

    /// The variant override carried by this selection, if any.
    pub fn fixed_variant(&self) -> Option<&str> {
        match self {
            Self::Fixed { variant, .. } => Some(variant),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestMatch => f.write_str(BEST_MATCH),
            Self::RandomOutfits => f.write_str(RANDOM_OUTFITS),
            Self::RandomOutfitsAndExpressions => f.write_str(RANDOM_OUTFITS_AND_EXPRESSIONS),
            Self::Fixed { name, variant } => write!(f, "{} (variant: {})", name, variant),
        }
    }
}

/// Current per-character choices, keyed by character folder.
///
/// An explicitly owned store rather than process-wide state so engines can
/// be driven with any map in tests.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selections: BTreeMap<String, Selection>,
}

impl SelectionStore {
    /// Create an empty store; every folder reads as best-match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the persisted free-text selection map.
    pub fn from_config_strings(raw: &BTreeMap<String, String>) -> Self {
        let selections = raw
            .iter()
            .map(|(folder, value)| (folder.clone(), Selection::parse(value)))
            .collect();
        Self { selections }
    }

    /// The selection for a folder; best-match when absent.
    pub fn get(&self, folder: &str) -> Selection {
        self.selections.get(folder).cloned().unwrap_or_default()
    }

    /// Replace the selection for a folder.
    pub fn set(&mut self, folder: impl Into<String>, selection: Selection) {
        self.selections.insert(folder.into(), selection);
    }

    /// Export the full map in its persisted free-text form.
    pub fn to_config_strings(&self) -> BTreeMap<String, String> {
        self.selections.iter().map(|(f, s)| (f.clone(), s.to_string())).collect()
    }

    /// Folders with an explicit selection, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.selections.iter().map(|(f, s)| (f.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
