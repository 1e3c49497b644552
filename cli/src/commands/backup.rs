//! # Lattice CLI Backup Command
//!
//! File: cli/src/commands/backup.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements `lattice backup`, a single transfer-adapter
//! export: dump a database's collections to per-collection files under a
//! target directory, optionally packed into one archive.
//!
//! ## Examples
//!
//! ```bash
//! # Dump every collection to ./backups/<dbname>/
//! lattice backup --db mongodb://localhost:27017/lattice --path ./backups
//!
//! # Dump two collections as JSON, packed into a single archive
//! lattice backup --db mongodb://localhost:27017/lattice --path ./backups \
//!     --type json --collections users,sessions --zip nightly.tar.gz
//! ```
//!
use crate::common::db::transfer::{self, DropPolicy, TransferSpec};
use crate::core::error::{LatticeError, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `lattice backup`.
///
/// `--db` and `--path` are required, but declared optional here so the
/// handler can report every missing field in one consolidated message.
#[derive(Parser, Debug)]
pub struct BackupArgs {
    /// Connection string of the database to export.
    #[arg(long)]
    db: Option<String>,

    /// Directory to write the dump into.
    #[arg(long)]
    path: Option<PathBuf>,

    /// Pack the dump into a single named archive instead of a directory
    /// tree. A bare `--zip` uses the default archive name.
    #[arg(long, num_args = 0..=1, default_missing_value = "backup.tar.gz", value_name = "NAME")]
    zip: Option<String>,

    /// Dump format: bson (default) or json.
    #[arg(long = "type", value_name = "FORMAT")]
    format: Option<String>,

    /// Collections to export (comma and/or space separated). Omit for all.
    #[arg(long)]
    collections: Option<String>,
}

/// Handler for `lattice backup`: validates parameters, then runs one
/// transfer-adapter export.
pub async fn handle_backup(args: BackupArgs) -> Result<()> {
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

    let spec = TransferSpec {
        connection_uri: args.db.unwrap_or_default(),
        root_path: args.path.unwrap_or_default(),
        collection_filter: args
            .collections
            .as_deref()
            .map(transfer::parse_collection_filter),
        drop_policy: DropPolicy::None,
        archive_name: args.zip,
        format,
    };

    info!("Starting backup of '{}'", spec.connection_uri);
    let output = transfer::export(&spec).await?;
    println!("✅ Backup complete: {}", output.display());
    Ok(())
}
