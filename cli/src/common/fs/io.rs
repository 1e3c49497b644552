//! # Lattice CLI Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Basic filesystem helpers used across the commands: ensuring directories
//! exist, and the "visible emptiness" check the installer runs before it
//! touches the network or mutates anything.
//!
use crate::core::error::{LatticeError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function attempts to create the
/// directory, including any necessary parent directories (similar to
/// `mkdir -p`). If the path already exists but is not a directory (e.g.,
/// it's a file), an error (`LatticeError::FileSystem`) is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(LatticeError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reports whether a directory contains any *visible* entries.
///
/// An entry is visible unless its file name starts with `.`; dotfiles
/// (shell history, editor droppings) do not count against the installer's
/// empty-directory precondition.
///
/// # Errors
///
/// Returns an `Err` if the directory cannot be read.
pub fn dir_has_visible_entries(path: &Path) -> Result<bool> {
    let entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory {:?}", path))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", path))?;
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with('.') {
            return Ok(true);
        }
    }
    Ok(false)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_nested() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        ensure_dir_exists(&nested)?;
        assert!(nested.is_dir());
        // Idempotent on an existing directory.
        ensure_dir_exists(&nested)?;
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_rejects_file() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x")?;
        assert!(ensure_dir_exists(&file).is_err());
        Ok(())
    }

    #[test]
    fn test_dir_has_visible_entries() -> Result<()> {
        let dir = tempdir()?;
        assert!(!dir_has_visible_entries(dir.path())?);

        // Dotfiles are invisible to the check.
        fs::write(dir.path().join(".gitignore"), "target")?;
        assert!(!dir_has_visible_entries(dir.path())?);

        fs::write(dir.path().join("README.md"), "hello")?;
        assert!(dir_has_visible_entries(dir.path())?);
        Ok(())
    }
}
