//! # Lattice CLI Scratch Directories
//!
//! File: cli/src/common/fs/scratch.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Scratch (staging) directories for the migration and installation
//! pipelines. Each pipeline run gets one uniquely named directory under a
//! workspace-relative temp root; every stage that needs intermediate
//! storage references it, and it is released when the run ends.
//!
//! ## Lifecycle
//!
//! The directory is a `tempfile::TempDir`, so release is tied to scope:
//! dropping the guard removes the tree whether the run succeeded, failed
//! validation, or died mid-stage. Success paths call
//! [`TempDir::close`](tempfile::TempDir::close) explicitly so a removal
//! failure is reported instead of swallowed by the drop glue.
//!
//! Names combine an operation prefix with a random suffix, so concurrent
//! invocations cannot collide and no run ever reuses another's directory.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

/// Workspace-relative root under which scratch directories are created.
pub const SCRATCH_ROOT: &str = "tmp";

/// Creates a uniquely named scratch directory under `<base>/tmp`.
///
/// `prefix` identifies the operation (e.g. `"migrate-"`, `"install-"`);
/// tempfile appends a random suffix. The returned guard removes the whole
/// tree on drop.
///
/// # Errors
///
/// Returns an `Err` if the temp root or the scratch directory itself cannot
/// be created.
pub fn create_scratch_dir(base: &Path, prefix: &str) -> Result<TempDir> {
    let root = base.join(SCRATCH_ROOT);
    super::io::ensure_dir_exists(&root)?;
    let scratch = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir_in(&root)
        .with_context(|| {
            format!("Failed to create scratch directory under {:?}", root)
        })?;
    debug!("Created scratch directory: {:?}", scratch.path());
    Ok(scratch)
}
