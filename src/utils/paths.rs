//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Handles ~/.content-cascade/ and output directories.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Content Cascade directory (~/.content-cascade/)
pub fn content_cascade_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".content-cascade"))
}

/// Get the config file path (~/.content-cascade/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(content_cascade_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Content Cascade directory, creating if it doesn't exist
pub fn ensure_content_cascade_dir() -> AppResult<PathBuf> {
    let path = content_cascade_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
