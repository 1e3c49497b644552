//! # Lattice CLI Install Command Group
//!
//! File: cli/src/commands/install/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements `lattice install`: provision a fresh Lattice
//! application in the current directory. The run downloads the framework
//! release archive, extracts it, writes the environment document, seeds
//! the configured database, provisions the admin account, and installs
//! the application's dependencies — in that order, stopping at the first
//! failure.
//!
//! ## Architecture
//!
//! - `params`: interactive collection of installation parameters
//!   (dialoguer prompts; CLI flags prefill answers) ending in a
//!   confirmation gate.
//! - `pipeline`: the staged state machine that sequences the heterogeneous
//!   external operations.
//!
//! ## Examples
//!
//! ```bash
//! # Fully interactive install into the current (empty) directory
//! lattice install
//!
//! # Prefill everything except the password
//! lattice install --username admin --db mongodb://localhost:27017/lattice --port 9000
//!
//! # Allow installing over existing files
//! lattice install --overwrite
//! ```
//!
use crate::core::error::Result;
use clap::Parser;
use std::env;

/// Interactive parameter collection.
mod params;
/// Staged installation state machine.
mod pipeline;

pub use pipeline::InstallParams;

/// Arguments for `lattice install`.
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Admin username (prompted for when omitted).
    #[arg(long)]
    username: Option<String>,

    /// Admin password (prompted for, hidden, when omitted).
    #[arg(long)]
    password: Option<String>,

    /// Database connection string (prompted for when omitted).
    #[arg(long)]
    db: Option<String>,

    /// Local port for the application server (prompted for when omitted).
    #[arg(long)]
    port: Option<u16>,

    /// Install even if the current directory is not empty.
    #[arg(long)]
    overwrite: bool,
}

/// Handler for `lattice install`: runs the installation pipeline in the
/// current working directory.
pub async fn handle_install(args: InstallArgs) -> Result<()> {
    let workspace_root = env::current_dir()
        .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;
    let params = InstallParams {
        username: args.username,
        password: args.password,
        db: args.db,
        port: args.port,
        overwrite: args.overwrite,
    };
    pipeline::run(params, &workspace_root).await?;
    println!("✅ Installation complete. Run 'lattice launch' to start the application.");
    Ok(())
}
