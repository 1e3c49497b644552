//! # Lattice CLI Launch Command
//!
//! File: cli/src/commands/launch.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements `lattice launch`: supervise the application's
//! local dev-server script (`npm run local`) in the current directory. The
//! supervisor collapses the script's output into one status line and
//! terminates the child on Ctrl-C.
//!
use crate::common::process::{self, ProcessOutcome, SuperviseOptions};
use crate::core::error::{LatticeError, Result};
use clap::Parser;
use std::env;

/// Arguments for `lattice launch`. The command takes no options; it runs
/// against the application in the current directory.
#[derive(Parser, Debug)]
pub struct LaunchArgs {}

/// Handler for `lattice launch`.
pub async fn handle_launch(_args: LaunchArgs) -> Result<()> {
    let cwd = env::current_dir()
        .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;
    let options = SuperviseOptions::npm(&cwd, "Launching application...");
    match process::supervise("npm", &["run", "local"], &options).await? {
        ProcessOutcome::Completed => {
            println!("✅ Application exited.");
            Ok(())
        }
        ProcessOutcome::Cancelled => anyhow::bail!(LatticeError::Interrupted),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_args_take_no_options() {
        assert!(LaunchArgs::try_parse_from(["launch"]).is_ok());
        assert!(LaunchArgs::try_parse_from(["launch", "--port", "80"]).is_err());
    }
}
