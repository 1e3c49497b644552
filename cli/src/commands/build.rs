//! # Lattice CLI Build Command
//!
//! File: cli/src/commands/build.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements `lattice build`: supervise the application's
//! production build script (`npm run build`) in the current directory,
//! with the same collapsed status line and Ctrl-C handling as `launch`.
//!
use crate::common::process::{self, ProcessOutcome, SuperviseOptions};
use crate::core::error::{LatticeError, Result};
use clap::Parser;
use std::env;

/// Arguments for `lattice build`. The command takes no options; it runs
/// against the application in the current directory.
#[derive(Parser, Debug)]
pub struct BuildArgs {}

/// Handler for `lattice build`.
pub async fn handle_build(_args: BuildArgs) -> Result<()> {
    let cwd = env::current_dir()
        .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;
    let options = SuperviseOptions::npm(&cwd, "Building application...");
    match process::supervise("npm", &["run", "build"], &options).await? {
        ProcessOutcome::Completed => {
            println!("✅ Build complete.");
            Ok(())
        }
        ProcessOutcome::Cancelled => anyhow::bail!(LatticeError::Interrupted),
    }
}
