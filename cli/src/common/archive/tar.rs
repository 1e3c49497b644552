//! # Lattice CLI TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module provides gzipped tarball (`.tar.gz`) packing and unpacking.
//! Packing turns a database dump directory into a single named archive when
//! a transfer requests one; unpacking extracts a downloaded release archive
//! (or a staged dump archive) into a target directory, optionally stripping
//! leading path components.
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for the archive structure and the
//! `flate2` crate for Gzip compression.
//!
//! - Packing reads a directory recursively; entry paths are relative to the
//!   root of the archived directory.
//! - Unpacking walks the archive entries one by one so each entry's path
//!   can be adjusted (component stripping) before it touches the
//!   filesystem. Release archives carry a single top-level directory
//!   (`lattice-master/...`), which `strip_components = 1` removes.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Packs the contents of `src_dir` into a gzipped TAR archive at `dest`.
///
/// Entry paths inside the archive are relative to `src_dir`, so unpacking
/// into any directory reproduces the tree without the source's own name as
/// a prefix.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The destination file cannot be created.
/// - The `src_dir` directory cannot be read or any entry cannot be added.
/// - Finalizing the TAR structure or the Gzip stream fails.
pub fn pack_dir(src_dir: &Path, dest: &Path) -> Result<()> {
    let file = File::create(dest)
        .with_context(|| format!("Failed to create archive file '{}'", dest.display()))?;
    let enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut tar_builder = tar::Builder::new(enc);

    // "." keeps entry paths relative to the archive root.
    tar_builder.append_dir_all(".", src_dir).with_context(|| {
        format!(
            "Failed to add directory '{}' contents to the tar archive",
            src_dir.display()
        )
    })?;

    let encoder = tar_builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    encoder
        .finish()
        .context("Failed to finish gzip compression stream")?;

    debug!("Packed '{}' into '{}'", src_dir.display(), dest.display());
    Ok(())
}

/// Unpacks a gzipped TAR archive into `dest_dir`, stripping the given
/// number of leading path components from every entry.
///
/// Entries whose paths vanish entirely after stripping (e.g. the top-level
/// directory itself when `strip_components = 1`) are skipped. Parent
/// directories are created as needed.
///
/// # Errors
///
/// Returns an `Err` if the archive cannot be opened or read, or if any
/// entry cannot be written to its destination.
pub fn unpack_archive(archive: &Path, dest_dir: &Path, strip_components: usize) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive '{}'", archive.display()))?;
    let dec = flate2::read::GzDecoder::new(file);
    let mut tar_archive = tar::Archive::new(dec);

    let entries = tar_archive
        .entries()
        .with_context(|| format!("Failed to read archive '{}'", archive.display()))?;
    for entry_result in entries {
        let mut entry = entry_result
            .with_context(|| format!("Corrupt entry in archive '{}'", archive.display()))?;
        let entry_path = entry
            .path()
            .context("Archive entry has an unreadable path")?
            .into_owned();

        let stripped: PathBuf = entry_path.components().skip(strip_components).collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = dest_dir.join(&stripped);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory '{}'", parent.display())
            })?;
        }
        entry.unpack(&target).with_context(|| {
            format!("Failed to unpack archive entry to '{}'", target.display())
        })?;
    }

    debug!(
        "Unpacked '{}' into '{}' (stripped {} component(s))",
        archive.display(),
        dest_dir.display(),
        strip_components
    );
    Ok(())
}
