//! # Lattice CLI Archive Utilities (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Archive handling for the CLI: gzipped tarball packing (single-archive
//! transfer output) and unpacking (release downloads, staged dump
//! archives), including leading-path-component stripping for release
//! tarballs.
//!

/// Gzipped TAR packing and unpacking.
pub mod tar;
