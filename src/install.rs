//! Game installation layout detection.
//!
//! The live sprite directory is derived from the selected episode
//! executable: `<exeDir>/<exeBaseName>_Data/StreamingAssets/CGAlt/sprite`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Episode executables this tool knows how to patch.
pub const SUPPORTED_EXECUTABLES: &[&str] =
    &["HigurashiEp01.exe", "HigurashiEp02.exe", "HigurashiEp03.exe"];

/// Error type for installation detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// The selected file is not one of the supported episode executables.
    #[error("'{0}' is not a supported episode executable (expected HigurashiEp01-03.exe)")]
    UnsupportedExecutable(String),
    /// The path does not name a file at all.
    #[error("executable path has no file name: {0}")]
    InvalidPath(PathBuf),
}

/// A selected game installation: the episode executable and its live sprite
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInstall {
    pub exe_path: PathBuf,
    pub sprite_dir: PathBuf,
}

impl GameInstall {
    /// Derive the live sprite directory from an episode executable path.
    pub fn from_exe(exe_path: &Path) -> Result<Self, InstallError> {
        let file_name = exe_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| InstallError::InvalidPath(exe_path.to_path_buf()))?;
        if !SUPPORTED_EXECUTABLES.contains(&file_name) {
            return Err(InstallError::UnsupportedExecutable(file_name.to_string()));
        }

        let stem = file_name.trim_end_matches(".exe");
        let exe_dir = exe_path.parent().unwrap_or_else(|| Path::new("."));
        let sprite_dir = exe_dir
            .join(format!("{}_Data", stem))
            .join("StreamingAssets")
            .join("CGAlt")
            .join("sprite");

        Ok(Self { exe_path: exe_path.to_path_buf(), sprite_dir })
    }
}
