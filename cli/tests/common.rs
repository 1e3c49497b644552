//! # Lattice CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Shared helpers for the integration test files in `cli/tests/`. Each
//! `.rs` file in that directory compiles as a separate test crate linked
//! against the `lattice` binary.
//!

// Allow potentially unused code in this common module, as different test
// files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

/// Creates an `assert_cmd::Command` pointing at the compiled `lattice`
/// binary for the current test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn lattice_cmd() -> Command {
    Command::cargo_bin("lattice").expect("Failed to find lattice binary for testing")
}

/// Connection string for the throwaway database used by live-database
/// tests (all of which are `#[ignore]`d by default).
pub fn test_db_uri(db_name: &str) -> String {
    format!("mongodb://localhost:27017/{}", db_name)
}
