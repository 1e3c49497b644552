//! # Lattice CLI Restore Command
//!
//! File: cli/src/commands/restore.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements `lattice restore`, a single transfer-adapter
//! import: read a dump (directory tree or packed archive) and load it into
//! a target database, optionally clearing existing data first.
//!
//! `--clear` is destructive. Combined with `--collections` it drops only
//! the named collections; alone it drops the entire target database before
//! restoring.
//!
//! ## Examples
//!
//! ```bash
//! # Restore a full dump
//! lattice restore --db mongodb://localhost:27017/lattice --path ./backups
//!
//! # Replace only the users collection from a packed archive
//! lattice restore --db mongodb://localhost:27017/lattice --path ./backups \
//!     --zip nightly.tar.gz --collections users --clear
//! ```
//!
use crate::common::db::transfer::{self, DropPolicy, TransferSpec};
use crate::core::error::{LatticeError, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `lattice restore`.
///
/// `--db` and `--path` are required, but declared optional here so the
/// handler can report every missing field in one consolidated message.
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Connection string of the database to import into.
    #[arg(long)]
    db: Option<String>,

    /// Directory containing the dump (or the archive named by --zip).
    #[arg(long)]
    path: Option<PathBuf>,

    /// Read the dump out of a packed archive under --path. A bare `--zip`
    /// uses the default archive name.
    #[arg(long, num_args = 0..=1, default_missing_value = "backup.tar.gz", value_name = "NAME")]
    zip: Option<String>,

    /// Dump format: bson (default) or json.
    #[arg(long = "type", value_name = "FORMAT")]
    format: Option<String>,

    /// Collections to restore (comma and/or space separated). Omit for all.
    #[arg(long)]
    collections: Option<String>,

    /// Drop target data before restoring (scoped to --collections when
    /// given, otherwise the whole database). Irreversible.
    #[arg(long)]
    clear: bool,
}

/// Handler for `lattice restore`: validates parameters, then runs one
/// transfer-adapter import.
pub async fn handle_restore(args: RestoreArgs) -> Result<()> {
    let mut missing = Vec::new();
    if args.db.is_none() {
        missing.push("db".to_string());
    }
    if args.path.is_none() {
        missing.push("path".to_string());
    }
    if !missing.is_empty() {
        anyhow::bail!(LatticeError::MissingParams(missing));
    }

    let format = args
        .format
        .as_deref()
        .map(str::parse)
        .transpose()?
        .unwrap_or_default();

    let filter = args
        .collections
        .as_deref()
        .map(transfer::parse_collection_filter);
    let has_filter = filter.as_ref().is_some_and(|set| !set.is_empty());

    let spec = TransferSpec {
        connection_uri: args.db.unwrap_or_default(),
        root_path: args.path.unwrap_or_default(),
        collection_filter: filter,
        drop_policy: DropPolicy::derive(args.clear, has_filter),
        archive_name: args.zip,
        format,
    };

    info!("Starting restore into '{}'", spec.connection_uri);
    let summary = transfer::import(&spec).await?;
    println!(
        "✅ Restore complete: {} document(s) across {} collection(s)",
        summary.documents, summary.collections
    );
    Ok(())
}
