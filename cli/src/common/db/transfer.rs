//! # Lattice CLI Transfer Adapter (`common::db::transfer`)
//!
//! File: cli/src/common/db/transfer.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! The transfer adapter performs one directional data transfer against one
//! database connection: `export` walks a database's collections and writes
//! one dump file per collection under `<root>/<dbname>/`, optionally
//! packing the result into a single `.tar.gz`; `import` reads such a dump
//! back into a target database, honoring a collection filter and a
//! drop/clear policy.
//!
//! ## Architecture
//!
//! - A [`TransferSpec`] describes one transfer. Required fields are
//!   validated up front; *every* missing field is reported in one
//!   consolidated error, and no work is attempted on a failed validation.
//! - Dump files are either concatenated BSON documents (the database's
//!   native dump format) or a JSON array of documents, per
//!   [`DataFormat`].
//! - Dropping is destructive and irreversible by design; confirmation is
//!   the CLI layer's responsibility, not this adapter's.
//! - Each call resolves exactly once: `Ok` after the transfer fully
//!   completes, `Err` on the first failure.
//!
//! ## Examples
//!
//! ```rust
//! let spec = TransferSpec {
//!     connection_uri: "mongodb://localhost:27017/lattice".into(),
//!     root_path: PathBuf::from("./backups"),
//!     collection_filter: Some(parse_collection_filter("users, sessions")),
//!     drop_policy: DropPolicy::None,
//!     archive_name: Some("nightly.tar.gz".into()),
//!     format: DataFormat::Bson,
//! };
//! let archive = transfer::export(&spec).await?;
//! ```
//!
use crate::common::archive;
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{LatticeError, Result};
use anyhow::Context;
use futures_util::TryStreamExt;
use mongodb::bson::Document;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// On-disk encoding of dump files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Concatenated BSON documents, the database's native dump encoding.
    #[default]
    Bson,
    /// A JSON array of documents (extended JSON via serde).
    Json,
}

impl DataFormat {
    /// File extension for dump files in this format.
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Bson => "bson",
            DataFormat::Json => "json",
        }
    }
}

impl FromStr for DataFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "bson" => Ok(DataFormat::Bson),
            "json" => Ok(DataFormat::Json),
            other => Err(anyhow::anyhow!(LatticeError::Config(format!(
                "Unknown dump format '{}' (expected 'bson' or 'json')",
                other
            )))),
        }
    }
}

/// Rule controlling whether target data is deleted before an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPolicy {
    /// Leave existing data in place; imported documents are appended.
    #[default]
    None,
    /// Drop the entire target database before importing.
    All,
    /// Drop only the filtered collections before importing.
    FilteredOnly,
}

impl DropPolicy {
    /// Derives the policy from the `--clear` flag and filter presence:
    /// a filtered clear drops only the named collections, an unfiltered
    /// clear drops the whole target.
    pub fn derive(clear: bool, has_filter: bool) -> Self {
        match (clear, has_filter) {
            (false, _) => DropPolicy::None,
            (true, true) => DropPolicy::FilteredOnly,
            (true, false) => DropPolicy::All,
        }
    }
}

/// Description of one directional transfer.
#[derive(Debug, Clone, Default)]
pub struct TransferSpec {
    /// Connection string; its path component names the database.
    pub connection_uri: String,
    /// Directory holding (export) or containing (import) the dump.
    pub root_path: PathBuf,
    /// Collections to transfer; `None` (or an empty set) means all.
    pub collection_filter: Option<BTreeSet<String>>,
    /// Pre-import deletion rule. Ignored by `export`.
    pub drop_policy: DropPolicy,
    /// When set, export packs the dump into this single archive file, and
    /// import reads the dump out of it.
    pub archive_name: Option<String>,
    /// Dump file encoding.
    pub format: DataFormat,
}

impl TransferSpec {
    /// Validates required fields before any operation starts.
    ///
    /// Reports *all* missing fields in one `LatticeError::MissingParams`,
    /// then checks that the connection string parses as a URL. Nothing is
    /// contacted and nothing is written here.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.connection_uri.trim().is_empty() {
            missing.push("db".to_string());
        }
        if self.root_path.as_os_str().is_empty() {
            missing.push("path".to_string());
        }
        if !missing.is_empty() {
            anyhow::bail!(LatticeError::MissingParams(missing));
        }
        url::Url::parse(&self.connection_uri).map_err(|e| {
            anyhow::anyhow!(LatticeError::Config(format!(
                "Invalid connection string '{}': {}",
                self.connection_uri, e
            )))
        })?;
        Ok(())
    }

    /// True when a non-empty collection filter is present.
    fn has_filter(&self) -> bool {
        self.collection_filter
            .as_ref()
            .is_some_and(|set| !set.is_empty())
    }

    /// True when `name` passes the collection filter.
    fn filter_allows(&self, name: &str) -> bool {
        match &self.collection_filter {
            Some(set) if !set.is_empty() => set.contains(name),
            _ => true,
        }
    }
}

/// Result of an import: how much data was restored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub collections: usize,
    pub documents: u64,
}

/// Parses a delimiter-tolerant collection list (commas and/or whitespace)
/// into a set of names. An empty or all-delimiter input yields the empty
/// set, which means "all collections".
pub fn parse_collection_filter(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Connects and resolves the database named by the connection string.
async fn connect(uri: &str) -> Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .with_context(|| format!("Failed to connect to '{}'", uri))?;
    client.default_database().ok_or_else(|| {
        anyhow::anyhow!(LatticeError::Config(format!(
            "Connection string '{}' must include a database name",
            uri
        )))
    })
}

/// Exports a database to per-collection dump files.
///
/// Writes `<root>/<dbname>/<collection>.<ext>` for every collection passing
/// the filter. Filter names with no matching collection at the source are
/// skipped silently. When `archive_name` is set, the dump directory is
/// packed into `<root>/<archive_name>` and removed, and the archive path is
/// returned; otherwise the dump directory path is returned.
pub async fn export(spec: &TransferSpec) -> Result<PathBuf> {
    spec.validate()?;
    let db = connect(&spec.connection_uri).await?;
    info!(
        "Exporting database '{}' to '{}'",
        db.name(),
        spec.root_path.display()
    );

    let names = db
        .list_collection_names()
        .await
        .context("Failed to list source collections")?;
    let selected: Vec<String> = names
        .into_iter()
        .filter(|name| spec.filter_allows(name))
        .collect();

    let dump_dir = spec.root_path.join(db.name());
    ensure_dir_exists(&dump_dir)?;

    for name in &selected {
        let collection = db.collection::<Document>(name);
        let mut cursor = collection
            .find(doc! {})
            .await
            .with_context(|| format!("Failed to read collection '{}'", name))?;

        let mut documents = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .with_context(|| format!("Cursor failed on collection '{}'", name))?
        {
            documents.push(document);
        }

        let file_path = dump_dir.join(format!("{}.{}", name, spec.format.extension()));
        write_dump_file(&file_path, &documents, spec.format)?;
        debug!("Dumped {} document(s) from '{}'", documents.len(), name);
    }

    if let Some(archive_name) = &spec.archive_name {
        let archive_path = spec.root_path.join(archive_name);
        archive::tar::pack_dir(&dump_dir, &archive_path)?;
        fs::remove_dir_all(&dump_dir).with_context(|| {
            format!(
                "Failed to remove dump directory '{}' after packing",
                dump_dir.display()
            )
        })?;
        info!(
            "Export complete: {} collection(s) packed into '{}'",
            selected.len(),
            archive_path.display()
        );
        Ok(archive_path)
    } else {
        info!(
            "Export complete: {} collection(s) in '{}'",
            selected.len(),
            dump_dir.display()
        );
        Ok(dump_dir)
    }
}

/// Imports per-collection dump files into a target database.
///
/// Applies the drop policy first (whole database or filtered collections),
/// then restores every dump file passing the filter. When `archive_name`
/// is set, the dump is first unpacked out of `<root>/<archive_name>` into
/// a scratch subdirectory that is released afterwards.
pub async fn import(spec: &TransferSpec) -> Result<ImportSummary> {
    spec.validate()?;
    let db = connect(&spec.connection_uri).await?;
    info!(
        "Importing into database '{}' from '{}'",
        db.name(),
        spec.root_path.display()
    );

    // Unpack a staged archive, if the transfer uses one. The unpack
    // directory lives inside root_path and is removed when this guard
    // drops.
    let unpacked;
    let data_root: &Path = if let Some(archive_name) = &spec.archive_name {
        let archive_path = spec.root_path.join(archive_name);
        unpacked = tempfile::Builder::new()
            .prefix("unpacked-")
            .tempdir_in(&spec.root_path)
            .context("Failed to create unpack directory")?;
        archive::tar::unpack_archive(&archive_path, unpacked.path(), 0)?;
        unpacked.path()
    } else {
        &spec.root_path
    };

    let dump_dir = resolve_dump_dir(data_root, db.name(), spec.format)?;

    // Destructive phase. Deliberately irreversible; the CLI confirms
    // upstream.
    match spec.drop_policy {
        DropPolicy::None => {}
        DropPolicy::All => {
            warn!("Dropping entire target database '{}'", db.name());
            db.drop()
                .await
                .with_context(|| format!("Failed to drop database '{}'", db.name()))?;
        }
        DropPolicy::FilteredOnly => {
            if let Some(filter) = &spec.collection_filter {
                for name in filter {
                    warn!("Dropping target collection '{}'", name);
                    db.collection::<Document>(name)
                        .drop()
                        .await
                        .with_context(|| format!("Failed to drop collection '{}'", name))?;
                }
            }
        }
    }

    let mut summary = ImportSummary::default();
    let extension = spec.format.extension();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dump_dir)
        .with_context(|| format!("Failed to read dump directory '{}'", dump_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.to_string_lossy() == extension)
        })
        .collect();
    entries.sort();

    for path in entries {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if !spec.filter_allows(&stem) {
            continue;
        }

        let documents = read_dump_file(&path, spec.format)?;
        if !documents.is_empty() {
            db.collection::<Document>(&stem)
                .insert_many(&documents)
                .await
                .with_context(|| format!("Failed to insert into collection '{}'", stem))?;
        }
        debug!("Restored {} document(s) into '{}'", documents.len(), stem);
        summary.collections += 1;
        summary.documents += documents.len() as u64;
    }

    info!(
        "Import complete: {} document(s) across {} collection(s)",
        summary.documents, summary.collections
    );
    Ok(summary)
}

/// Locates the directory actually holding dump files under `root`.
///
/// Preference order: dump files directly in `root`; a subdirectory named
/// after the target database; a single subdirectory of any name (covers
/// migrations where source and target database names differ). Anything
/// else is an error.
fn resolve_dump_dir(root: &Path, db_name: &str, format: DataFormat) -> Result<PathBuf> {
    let has_dump_files = |dir: &Path| -> bool {
        fs::read_dir(dir)
            .map(|entries| {
                entries.filter_map(|e| e.ok()).any(|e| {
                    e.path()
                        .extension()
                        .is_some_and(|ext| ext.to_string_lossy() == format.extension())
                })
            })
            .unwrap_or(false)
    };

    if has_dump_files(root) {
        return Ok(root.to_path_buf());
    }

    let named = root.join(db_name);
    if named.is_dir() {
        return Ok(named);
    }

    let subdirs: Vec<PathBuf> = fs::read_dir(root)
        .with_context(|| format!("Failed to read dump root '{}'", root.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    if let [only] = subdirs.as_slice() {
        return Ok(only.clone());
    }

    anyhow::bail!(LatticeError::FileSystem(format!(
        "No dump found under '{}' (expected {} files or a dump subdirectory)",
        root.display(),
        format.extension()
    )))
}

/// Writes one collection's documents to a dump file.
fn write_dump_file(path: &Path, documents: &[Document], format: DataFormat) -> Result<()> {
    match format {
        DataFormat::Bson => {
            let mut bytes = Vec::new();
            for document in documents {
                document
                    .to_writer(&mut bytes)
                    .with_context(|| format!("Failed to encode document for '{}'", path.display()))?;
            }
            fs::write(path, bytes)
                .with_context(|| format!("Failed to write dump file '{}'", path.display()))?;
        }
        DataFormat::Json => {
            let rendered = serde_json::to_string_pretty(documents)
                .with_context(|| format!("Failed to encode documents for '{}'", path.display()))?;
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write dump file '{}'", path.display()))?;
        }
    }
    Ok(())
}

/// Reads one collection's documents back from a dump file.
fn read_dump_file(path: &Path, format: DataFormat) -> Result<Vec<Document>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read dump file '{}'", path.display()))?;
    match format {
        DataFormat::Bson => {
            let mut reader = Cursor::new(bytes.as_slice());
            let mut documents = Vec::new();
            while (reader.position() as usize) < bytes.len() {
                let document = Document::from_reader(&mut reader).with_context(|| {
                    format!("Corrupt BSON in dump file '{}'", path.display())
                })?;
                documents.push(document);
            }
            Ok(documents)
        }
        DataFormat::Json => serde_json::from_slice(&bytes)
            .with_context(|| format!("Corrupt JSON in dump file '{}'", path.display())),
    }
}
