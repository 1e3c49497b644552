//! # Lattice CLI Environment Document
//!
//! File: cli/src/core/config.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This module implements access to the Lattice application's persisted
//! environment document, the JSON file at `src/env.json` inside an
//! application checkout. The installer's `Configure` stage loads the
//! document shipped with the release archive, overwrites the connection
//! settings collected from the operator, and rewrites the file in place.
//!
//! ## Architecture
//!
//! The document is read into a `serde_json` object map rather than a closed
//! struct so that keys the CLI does not know about survive the rewrite
//! unchanged. Three well-known keys are managed here:
//!
//! - `SERVER_URI` — string URL the application server binds/advertises
//! - `PORT` — integer local port
//! - `DATABASE_URI` — document database connection string
//!
//! Writes replace the whole document (pretty-printed), never a partial
//! patch, so the file on disk always reflects one consistent load-mutate-
//! save cycle.
//!
//! ## Examples
//!
//! ```rust
//! let mut env = config::EnvironmentConfig::load(&app_root.join("src/env.json"))?;
//! env.set_server_uri("http://localhost:9000");
//! env.set_port(9000);
//! env.set_database_uri("mongodb://localhost:27017/lattice");
//! env.save()?;
//! ```
//!
use crate::core::error::{LatticeError, Result};
use anyhow::Context;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Location of the environment document relative to an application root.
pub const ENV_FILE_RELATIVE: &str = "src/env.json";

/// Well-known environment document keys managed by the installer.
pub const KEY_SERVER_URI: &str = "SERVER_URI";
pub const KEY_PORT: &str = "PORT";
pub const KEY_DATABASE_URI: &str = "DATABASE_URI";

/// The application's persisted environment document.
///
/// Holds the full JSON object from disk plus the path it was loaded from,
/// so a later `save` rewrites exactly the file that was read.
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl EnvironmentConfig {
    /// Loads the environment document from `path`.
    ///
    /// The file must exist and contain a JSON object; anything else is a
    /// configuration error. The installer only ever runs this after the
    /// release archive (which ships the document) has been extracted.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read environment document '{}'",
                path.display()
            )
        })?;
        let value: Value = serde_json::from_str(&raw).with_context(|| {
            format!(
                "Failed to parse environment document '{}' as JSON",
                path.display()
            )
        })?;
        let doc = match value {
            Value::Object(map) => map,
            other => {
                anyhow::bail!(LatticeError::Config(format!(
                    "Environment document '{}' must be a JSON object, found {}",
                    path.display(),
                    json_type_name(&other)
                )));
            }
        };
        debug!(
            "Loaded environment document '{}' ({} keys)",
            path.display(),
            doc.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Overwrites the `SERVER_URI` key.
    pub fn set_server_uri(&mut self, uri: &str) {
        self.doc.insert(KEY_SERVER_URI.to_string(), json!(uri));
    }

    /// Overwrites the `PORT` key.
    pub fn set_port(&mut self, port: u16) {
        self.doc.insert(KEY_PORT.to_string(), json!(port));
    }

    /// Overwrites the `DATABASE_URI` key.
    pub fn set_database_uri(&mut self, uri: &str) {
        self.doc.insert(KEY_DATABASE_URI.to_string(), json!(uri));
    }

    /// Returns a managed or unmanaged key, if present.
    #[allow(dead_code)] // Used by tests; handy for future read paths.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// Rewrites the whole document to the path it was loaded from.
    ///
    /// The write is a whole-document replace: every key currently held in
    /// memory (managed and unmanaged alike) is serialized back out.
    pub fn save(&self) -> Result<()> {
        let rendered = serde_json::to_string_pretty(&Value::Object(self.doc.clone()))
            .context("Failed to serialize environment document")?;
        fs::write(&self.path, rendered).with_context(|| {
            format!(
                "Failed to write environment document '{}'",
                self.path.display()
            )
        })?;
        info!("Rewrote environment document '{}'", self.path.display());
        Ok(())
    }
}

/// Human-readable JSON value kind for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_mutate_save_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("env.json");
        fs::write(
            &path,
            r#"{"SERVER_URI":"http://old:3000","PORT":3000,"DATABASE_URI":"mongodb://old/app","EXTRA":"kept"}"#,
        )?;

        let mut env = EnvironmentConfig::load(&path)?;
        env.set_server_uri("http://localhost:9000");
        env.set_port(9000);
        env.set_database_uri("mongodb://localhost:27017/lattice");
        env.save()?;

        let reloaded = EnvironmentConfig::load(&path)?;
        assert_eq!(
            reloaded.get(KEY_SERVER_URI).and_then(Value::as_str),
            Some("http://localhost:9000")
        );
        assert_eq!(reloaded.get(KEY_PORT).and_then(Value::as_u64), Some(9000));
        assert_eq!(
            reloaded.get(KEY_DATABASE_URI).and_then(Value::as_str),
            Some("mongodb://localhost:27017/lattice")
        );
        // Keys the CLI does not manage survive the whole-document rewrite.
        assert_eq!(reloaded.get("EXTRA").and_then(Value::as_str), Some("kept"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope").join("env.json");
        assert!(EnvironmentConfig::load(&missing).is_err());
    }

    #[test]
    fn test_load_rejects_non_object_document() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("env.json");
        fs::write(&path, "[1, 2, 3]")?;
        let err = EnvironmentConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
        Ok(())
    }
}
