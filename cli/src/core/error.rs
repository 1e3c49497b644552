//! # Lattice CLI Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used
//! throughout the Lattice CLI. It provides a consistent approach to error
//! management with detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of three components:
//! - `LatticeError`: A custom error enum using `thiserror` for the error
//!   taxonomy (validation, external operation, user abort, interrupt)
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible
//!   propagation with `.context(...)` at call sites
//! - `exit_code`: The single mapping from the taxonomy to process exit codes
//!
//! ## Exit Code Convention
//!
//! Every run terminates with one of:
//! - `0` — success, or a clean user decline of a confirmation prompt
//! - `1` — validation error (missing required parameters, reported as one
//!   consolidated message before any side effect)
//! - `2` — external operation error (network, subprocess, filesystem,
//!   database) that aborted the remaining pipeline
//! - `130` — operator interrupt delivered during a supervised subprocess
//!
use thiserror::Error;

/// Custom error type for the Lattice CLI.
#[derive(Error, Debug)]
pub enum LatticeError {
    /// Required parameters absent. Carries *every* missing field name so the
    /// user sees one consolidated message instead of failing field-by-field.
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParams(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Database operation failed: {source}")]
    Database {
        #[from]
        source: mongodb::error::Error,
    },

    #[error("Download failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },

    /// The user declined a confirmation prompt. A clean, intentional exit.
    #[error("Aborted by user.")]
    Aborted,

    /// An operator interrupt (Ctrl-C) terminated a supervised subprocess.
    #[error("Interrupted.")]
    Interrupted,
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;

/// Maps an error chain to the process exit code convention above.
///
/// Walks the `anyhow` chain looking for a `LatticeError`; anything that is
/// not part of the taxonomy (I/O errors wrapped only in context, driver
/// errors surfaced directly) counts as an external operation failure.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(lattice_err) = cause.downcast_ref::<LatticeError>() {
            return match lattice_err {
                LatticeError::MissingParams(_) => 1,
                LatticeError::Aborted => 0,
                LatticeError::Interrupted => 130,
                _ => 2,
            };
        }
    }
    2
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_error_display() {
        let missing = LatticeError::MissingParams(vec!["from".into(), "to".into()]);
        assert_eq!(missing.to_string(), "Missing required parameters: from, to");

        let config_err = LatticeError::Config("env document has no PORT".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: env document has no PORT"
        );

        let cmd_err = LatticeError::ExternalCommand {
            cmd: "npm install".into(),
            status: "exit code 1".into(),
        };
        assert_eq!(
            cmd_err.to_string(),
            "External command failed: npm install, Status: exit code 1"
        );
    }

    #[test]
    fn test_exit_code_mapping() {
        let validation = anyhow!(LatticeError::MissingParams(vec!["db".into()]));
        assert_eq!(exit_code(&validation), 1);

        let aborted = anyhow!(LatticeError::Aborted);
        assert_eq!(exit_code(&aborted), 0);

        let interrupted = anyhow!(LatticeError::Interrupted);
        assert_eq!(exit_code(&interrupted), 130);

        let external = anyhow!(LatticeError::FileSystem("scratch unavailable".into()));
        assert_eq!(exit_code(&external), 2);

        // Errors with no taxonomy variant in the chain count as external.
        let plain = anyhow!("socket closed unexpectedly");
        assert_eq!(exit_code(&plain), 2);
    }

    #[test]
    fn test_exit_code_finds_variant_behind_context() {
        let err = anyhow!(LatticeError::MissingParams(vec!["path".into()]))
            .context("backup parameter validation failed");
        assert_eq!(exit_code(&err), 1);
    }
}
