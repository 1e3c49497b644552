//! # Lattice CLI Database Utilities (`common::db`)
//!
//! File: cli/src/common/db/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Document-database access for the operations commands, built on the
//! official driver:
//!
//! - **`transfer`**: the one-directional transfer adapter — export a
//!   database to per-collection dump files (optionally packed into a single
//!   archive) and import such dumps back, with collection filtering and
//!   drop/clear semantics.
//! - **`admin`**: admin account provisioning — salted one-way password
//!   hashing and the well-known admin document upsert performed during
//!   installation.
//!
//! Connection strings follow the standard
//! `mongodb://[user:pass@]host[:port]/dbname` form; the database name in
//! the URI path is required by every operation here.
//!

/// Admin account provisioning (hashing + upsert).
pub mod admin;
/// One-directional export/import transfer adapter.
pub mod transfer;
