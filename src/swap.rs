//! The swap engine: backup-on-first-use plus bulk sprite replacement.
//!
//! Replacement is a raw byte copy; nothing decodes the images. Per-key
//! failures never abort a run, they are logged and counted in the report.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

use crate::catalog::{CharacterCatalog, SpriteCatalog, SpriteEntry};
use crate::resolve::PathResolver;
use crate::selection::{Selection, SelectionStore};

/// Backup directory created next to the live sprite directory.
pub const BACKUP_DIR_NAME: &str = "sprite_backup";

/// Error type for a whole swap run; per-key I/O problems are not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SwapError {
    /// The live sprite directory does not exist.
    #[error("sprite directory does not exist: {0}")]
    MissingSpriteDir(PathBuf),
    /// The sprite directory has no parent to place the backup next to.
    #[error("sprite directory has no parent: {0}")]
    NoParentDir(PathBuf),
    /// Creating the backup tree itself failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Aggregate outcome of one randomize run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapReport {
    /// Whether this run created the backup tree.
    pub backup_created: bool,
    /// Files copied into the backup (zero unless `backup_created`).
    pub backed_up: usize,
    /// Live sprites overwritten with replacement art.
    pub replaced: usize,
    /// Keys skipped because no replacement asset exists on disk.
    pub missing: usize,
    /// Keys skipped on read/write failure.
    pub failed: usize,
    /// Catalog keys not present in the live directory (episodes not installed).
    pub skipped: usize,
}

/// Replaces live sprites according to the per-character selections.
pub struct SwapEngine<'a> {
    catalog: &'a SpriteCatalog,
    characters: &'a CharacterCatalog,
    resolver: &'a PathResolver<'a>,
    selections: &'a SelectionStore,
}

impl<'a> SwapEngine<'a> {
    pub fn new(
        catalog: &'a SpriteCatalog,
        characters: &'a CharacterCatalog,
        resolver: &'a PathResolver<'a>,
        selections: &'a SelectionStore,
    ) -> Self {
        Self { catalog, characters, resolver, selections }
    }

    /// The backup tree location for a live sprite directory.
    pub fn backup_dir(sprite_dir: &Path) -> Result<PathBuf, SwapError> {
        sprite_dir
            .parent()
            .map(|parent| parent.join(BACKUP_DIR_NAME))
            .ok_or_else(|| SwapError::NoParentDir(sprite_dir.to_path_buf()))
    }

    /// Copy every `.png` under `sprite_dir` into the backup tree, once.
    ///
    /// Returns the number of files copied, or `None` when the backup already
    /// exists. An existing backup is never touched again; it holds the
    /// pristine originals for restore.
    pub fn ensure_backup(sprite_dir: &Path) -> Result<Option<usize>, SwapError> {
        let backup_dir = Self::backup_dir(sprite_dir)?;
        if backup_dir.exists() {
            debug!("backup already present at {}", backup_dir.display());
            return Ok(None);
        }

        fs::create_dir_all(&backup_dir)?;
        let mut copied = 0;
        for path in png_files(sprite_dir) {
            let rel = match path.strip_prefix(sprite_dir) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let dst = backup_dir.join(rel);
            if let Some(parent) = dst.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("could not create backup directory {}: {}", parent.display(), e);
                    continue;
                }
            }
            match fs::copy(&path, &dst) {
                Ok(_) => copied += 1,
                Err(e) => warn!("could not back up {}: {}", path.display(), e),
            }
        }
        Ok(Some(copied))
    }

    /// Replace every installed sprite per the active selections.
    ///
    /// Catalog keys without a live `<key>.png` belong to episodes that are
    /// not installed and are skipped silently.
    pub fn randomize<R: Rng + ?Sized>(
        &self,
        sprite_dir: &Path,
        rng: &mut R,
    ) -> Result<SwapReport, SwapError> {
        if !sprite_dir.is_dir() {
            return Err(SwapError::MissingSpriteDir(sprite_dir.to_path_buf()));
        }

        let mut report = SwapReport::default();
        if let Some(backed_up) = Self::ensure_backup(sprite_dir)? {
            report.backup_created = true;
            report.backed_up = backed_up;
        }

        for (key, entry) in self.catalog.entries() {
            let dst = sprite_dir.join(format!("{}.png", key));
            if !dst.exists() {
                report.skipped += 1;
                continue;
            }

            let folder = self.catalog.folder_of(key);
            let selection = self.selections.get(folder);
            let (variant, expression) = self.choose(folder, entry, &selection, rng);
            let src = self.resolver.resolve_asset(folder, &expression, &variant);
            if !src.exists() {
                report.missing += 1;
                continue;
            }

            let bytes = match fs::read(&src) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("could not read replacement {}: {}", src.display(), e);
                    report.failed += 1;
                    continue;
                }
            };
            if let Err(e) = fs::write(&dst, bytes) {
                warn!("could not write sprite {}: {}", dst.display(), e);
                report.failed += 1;
                continue;
            }

            debug!("replaced {} (variant: {}, expression: {})", key, variant, expression);
            report.replaced += 1;
        }

        Ok(report)
    }

    /// Compute the (variant, expression) pair for one key under a selection.
    fn choose<R: Rng + ?Sized>(
        &self,
        folder: &str,
        entry: &SpriteEntry,
        selection: &Selection,
        rng: &mut R,
    ) -> (String, String) {
        match selection {
            Selection::BestMatch => (entry.variant.clone(), entry.expression.clone()),
            Selection::Fixed { variant, .. } => (variant.clone(), entry.expression.clone()),
            Selection::RandomOutfits => {
                (self.random_variant(folder, entry, rng), entry.expression.clone())
            }
            Selection::RandomOutfitsAndExpressions => {
                let variant = self.random_variant(folder, entry, rng);
                let expression = self.random_expression(folder, &variant, entry, rng);
                (variant, expression)
            }
        }
    }

    /// A uniformly random outfit variant; the catalog variant when the
    /// character has no known outfits.
    fn random_variant<R: Rng + ?Sized>(
        &self,
        folder: &str,
        entry: &SpriteEntry,
        rng: &mut R,
    ) -> String {
        match self.characters.outfits(folder).choose(rng) {
            Some(outfit) => outfit.variant.clone(),
            None => entry.variant.clone(),
        }
    }

    /// A random expression stem from the chosen variant folder; the key's
    /// own expression when the folder is empty or unreadable.
    fn random_expression<R: Rng + ?Sized>(
        &self,
        folder: &str,
        variant: &str,
        entry: &SpriteEntry,
        rng: &mut R,
    ) -> String {
        let dir = self.resolver.mei_root().join(folder).join(variant);
        let stems = png_stems(&dir);
        match stems.choose(rng) {
            Some(stem) => stem.clone(),
            None => entry.expression.clone(),
        }
    }
}

/// All `.png` files under a directory, recursively.
pub(crate) fn png_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.png", dir.display());
    match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(e) => {
            warn!("bad glob pattern '{}': {}", pattern, e);
            Vec::new()
        }
    }
}

/// Expression stems (file names without `.png`) directly inside a directory.
///
/// Sorted so a seeded generator draws the same stem on every run.
fn png_stems(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut stems = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("png") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    stems.sort_unstable();
    stems
}
