//! # Lattice CLI Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module is the root of the shared utility modules used throughout
//! the Lattice CLI. It aggregates cross-cutting functionality — database
//! transfers, archive handling, filesystem helpers, networking, process
//! supervision, and terminal UI — keeping command-specific logic
//! (`commands::`) separate from infrastructure (`core::`).
//!
//! ## Architecture
//!
//! Each submodule encapsulates one domain:
//!
//! - **`archive`**: gzipped tarball packing and unpacking.
//! - **`db`**: document-database transfer adapter and admin provisioning.
//! - **`fs`**: directory helpers and scratch-directory lifecycle.
//! - **`network`**: HTTP archive download.
//! - **`process`**: external process supervision with a collapsing status
//!   line, output filtering, and cancellation.
//! - **`ui`**: indicatif-based spinners and progress bars.
//!
//! ## Usage
//!
//! Command handlers import the specific submodule they need:
//!
//! ```rust
//! use crate::common::{archive, db, fs, network, process};
//! use crate::core::error::Result;
//!
//! # async fn run_example() -> Result<()> {
//! let spec = db::transfer::TransferSpec { /* ... */ };
//! let dump = db::transfer::export(&spec).await?;
//! let scratch = fs::scratch::create_scratch_dir(std::path::Path::new("."), "migrate-")?;
//! # Ok(())
//! # }
//! ```
//!

/// Utilities for handling archive files (tarballs).
pub mod archive;
/// Document-database transfer adapter and admin provisioning.
pub mod db;
/// Utilities for filesystem operations (directories, scratch dirs).
pub mod fs;
/// Network operations (HTTP archive download).
pub mod network;
/// External process supervision.
pub mod process;
/// Terminal user interface elements (status line, progress bars).
pub mod ui;
