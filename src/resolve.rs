//! Replacement-asset path resolution with variant fallback.
//!
//! Variant numbering is not complete for every character, so resolution
//! walks a fixed descending list of common variants after the preferred
//! candidate before giving up.

use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::catalog::SpriteCatalog;
use crate::selection::Selection;

/// Variants tried, in order, once the preferred candidate is missing.
pub const FALLBACK_VARIANTS: [&str; 6] = ["v006", "v005", "v004", "v003", "v002", "v001"];

/// Error type for direct single-key resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// Resolution was requested for a key the catalog does not know.
    #[error("sprite key not found: {0}")]
    KeyNotFound(String),
}

/// Computes replacement asset paths under `<assetsRoot>/sprites/mei`.
#[derive(Debug, Clone)]
pub struct PathResolver<'a> {
    mei_root: PathBuf,
    catalog: &'a SpriteCatalog,
}

impl<'a> PathResolver<'a> {
    pub fn new(assets_root: &Path, catalog: &'a SpriteCatalog) -> Self {
        Self { mei_root: assets_root.join("sprites").join("mei"), catalog }
    }

    /// Root of the replacement art tree (`.../sprites/mei`).
    pub fn mei_root(&self) -> &Path {
        &self.mei_root
    }

    /// Resolve the source asset path for a sprite key under a selection.
    ///
    /// A fixed selection's variant is the sole preferred candidate; every
    /// other mode starts from the key's catalog variant. Fails only when the
    /// key itself is unknown.
    pub fn resolve(&self, key: &str, selection: &Selection) -> Result<PathBuf, ResolveError> {
        let entry =
            self.catalog.lookup(key).ok_or_else(|| ResolveError::KeyNotFound(key.to_string()))?;
        let folder = self.catalog.folder_of(key);
        let preferred = selection.fixed_variant().unwrap_or(&entry.variant);
        Ok(self.resolve_asset(folder, &entry.expression, preferred))
    }

    /// Walk the variant fallback list and return the first existing path.
    ///
    /// When every candidate is missing, the preferred candidate's path is
    /// returned anyway (with a warning) so callers can decide to skip; this
    /// never fails.
    pub fn resolve_asset(&self, folder: &str, expression: &str, preferred: &str) -> PathBuf {
        let mut candidates: Vec<&str> = Vec::with_capacity(1 + FALLBACK_VARIANTS.len());
        candidates.push(preferred);
        for variant in FALLBACK_VARIANTS {
            if !candidates.contains(&variant) {
                candidates.push(variant);
            }
        }

        for variant in &candidates {
            let path = self.asset_path(folder, variant, expression);
            if path.exists() {
                return path;
            }
        }

        let fallback = self.asset_path(folder, preferred, expression);
        warn!(
            "no variant found for {}/{}; falling back to {}",
            folder,
            expression,
            fallback.display()
        );
        fallback
    }

    /// `<meiRoot>/<folder>/<variant>/<expression>.png`
    pub fn asset_path(&self, folder: &str, variant: &str, expression: &str) -> PathBuf {
        self.mei_root.join(folder).join(variant).join(format!("{}.png", expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_asset(root: &Path, folder: &str, variant: &str, expression: &str) {
        let dir = root.join("sprites").join("mei").join(folder).join(variant);
        fs::create_dir_all(&dir).expect("should create asset dirs");
        fs::write(dir.join(format!("{}.png", expression)), b"png").expect("should write asset");
    }

    #[test]
    fn test_resolve_best_match_hit() {
        let temp = TempDir::new().expect("should create temp dir");
        write_asset(temp.path(), "satoko", "v001", "futeki_blush_close");

        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);
        let path =
            resolver.resolve("sa1a_warai_a1_1", &Selection::BestMatch).expect("known key");
        assert_eq!(
            path,
            temp.path().join("sprites/mei/satoko/v001/futeki_blush_close.png")
        );
        assert!(path.exists());
    }

    #[test]
    fn test_resolve_unknown_key() {
        let temp = TempDir::new().expect("should create temp dir");
        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);

        let result = resolver.resolve("not_a_sprite", &Selection::BestMatch);
        assert_eq!(result, Err(ResolveError::KeyNotFound("not_a_sprite".to_string())));
    }

    #[test]
    fn test_fallback_walks_descending_variants() {
        let temp = TempDir::new().expect("should create temp dir");
        // Preferred v001 absent; v003 is the only variant on disk.
        write_asset(temp.path(), "satoko", "v003", "futeki_blush_close");

        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);
        let path = resolver.resolve_asset("satoko", "futeki_blush_close", "v001");
        assert_eq!(
            path,
            temp.path().join("sprites/mei/satoko/v003/futeki_blush_close.png")
        );
    }

    #[test]
    fn test_fallback_prefers_earlier_candidates() {
        let temp = TempDir::new().expect("should create temp dir");
        write_asset(temp.path(), "satoko", "v005", "normal_open");
        write_asset(temp.path(), "satoko", "v002", "normal_open");

        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);
        // v006 missing, v005 present: v005 wins over the later v002.
        let path = resolver.resolve_asset("satoko", "normal_open", "v006");
        assert_eq!(path, temp.path().join("sprites/mei/satoko/v005/normal_open.png"));
    }

    #[test]
    fn test_fixed_selection_falls_back_to_next_existing() {
        let temp = TempDir::new().expect("should create temp dir");
        // Fixed v003 lacks the expression, v002 has it.
        write_asset(temp.path(), "satoko", "v002", "futeki_blush_close");

        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);
        let selection =
            Selection::Fixed { name: "Festival".to_string(), variant: "v003".to_string() };
        let path = resolver.resolve("sa1a_warai_a1_1", &selection).expect("known key");
        assert_eq!(
            path,
            temp.path().join("sprites/mei/satoko/v002/futeki_blush_close.png")
        );
    }

    #[test]
    fn test_exhausted_fallback_returns_preferred_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);

        let path = resolver.resolve_asset("satoko", "futeki_blush_close", "v049");
        assert_eq!(
            path,
            temp.path().join("sprites/mei/satoko/v049/futeki_blush_close.png")
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_candidates_deduplicate_preferred() {
        let temp = TempDir::new().expect("should create temp dir");
        // Preferred v001 is also the last fallback entry; exhaustion must
        // still land on it exactly once.
        let catalog = SpriteCatalog::builtin();
        let resolver = PathResolver::new(temp.path(), &catalog);
        let path = resolver.resolve_asset("rena", "smile_open", "v001");
        assert_eq!(path, temp.path().join("sprites/mei/rena/v001/smile_open.png"));
    }
}
