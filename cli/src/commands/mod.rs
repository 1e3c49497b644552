//! # Lattice CLI Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module aggregates all top-level commands of the Lattice CLI. It is
//! the central point for importing and re-exporting command modules to the
//! application entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `create`: module scaffolding (helpers, plugins, widgets, themes)
//! - `backup`: single transfer-adapter export of a database
//! - `restore`: single transfer-adapter import into a database
//! - `migrate`: staged source → staging → target database migration
//! - `install`: staged fresh installation of a Lattice application
//! - `launch`: supervise the application's dev-server script
//! - `build`: supervise the application's production build script
//!
//! Each command defines its own `*Args` struct and `handle_*` function.
//! The orchestrated commands (`migrate`, `install`) keep their staged
//! pipelines in submodules of their directories.
//!

/// `lattice backup` — export a database to dump files.
pub mod backup;
/// `lattice build` — supervise the production build script.
pub mod build;
/// `lattice create` — scaffold a new module from templates.
pub mod create;
/// `lattice install` — staged fresh installation.
pub mod install;
/// `lattice launch` — supervise the local dev server.
pub mod launch;
/// `lattice migrate` — staged database migration.
pub mod migrate;
/// `lattice restore` — import dump files into a database.
pub mod restore;
