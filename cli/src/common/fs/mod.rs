//! # Lattice CLI Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Filesystem-related utilities shared by the commands. Functionality is
//! delegated to two submodules:
//!
//! - **`io`**: basic operations — ensuring directories exist and the
//!   installer's visible-emptiness precondition check.
//! - **`scratch`**: uniquely named scratch directories with scope-tied
//!   cleanup, used by the migration and installation pipelines for
//!   intermediate storage.
//!
//! Callers import the specific submodule they need, e.g.
//! `crate::common::fs::io::ensure_dir_exists` or
//! `crate::common::fs::scratch::create_scratch_dir`.
//!

/// Basic file and directory operations.
pub mod io;
/// Scratch directory lifecycle for pipeline runs.
pub mod scratch;
